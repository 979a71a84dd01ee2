use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strain_core::Message;

/// Translate a terminal event into a dashboard message, if it means one.
pub fn translate(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Resize(cols, rows) => Some(Message::Resize(*cols, *rows)),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        // Raw mode swallows SIGINT.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Message::Quit),
        KeyCode::Char('r') => Some(Message::Reset),
        KeyCode::Char('s') => Some(Message::ToggleSmooth),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn dashboard_keys() {
        assert_eq!(translate(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Message::Quit));
        assert_eq!(translate(&key(KeyCode::Esc, KeyModifiers::NONE)), Some(Message::Quit));
        assert_eq!(translate(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Message::Quit));
        assert_eq!(translate(&key(KeyCode::Char('r'), KeyModifiers::NONE)), Some(Message::Reset));
        assert_eq!(translate(&key(KeyCode::Char('s'), KeyModifiers::NONE)), Some(Message::ToggleSmooth));
        assert_eq!(translate(&key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = Event::Key(KeyEvent {
            code:      KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind:      KeyEventKind::Release,
            state:     KeyEventState::NONE,
        });
        assert_eq!(translate(&release), None);
    }

    #[test]
    fn resize_carries_size() {
        assert_eq!(translate(&Event::Resize(120, 40)), Some(Message::Resize(120, 40)));
    }
}
