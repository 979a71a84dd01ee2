use chrono::{DateTime, Local};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use strain_core::TITLE;
use strain_theme::Theme;

const KEYS: &str = "q quit  r reset  s smooth";

/// One-line top bar: dashboard title and mode on the left, key hints and
/// the wall clock on the right.
pub struct HeaderWidget<'a> {
    title:  &'a str,
    smooth: bool,
    now:    DateTime<Local>,
    theme:  &'a Theme,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(title: &'a str, smooth: bool, now: DateTime<Local>, theme: &'a Theme) -> Self {
        Self { title, smooth, now, theme }
    }

    fn left(&self) -> String {
        if self.smooth {
            format!("{} [smooth]", self.title)
        } else {
            self.title.to_string()
        }
    }

    fn right(&self) -> String {
        format!("{KEYS}  {}", self.now.format("%H:%M:%S"))
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let width = area.width as usize;
        buf.set_style(Rect { height: 1, ..area }, self.theme.text());

        let left = self.left();
        buf.set_stringn(area.x, area.y, &left, width, self.theme.style(TITLE).to_ratatui());

        // Key hints only when they fit beside the title.
        let right = self.right();
        let right_len = right.chars().count();
        if left.chars().count() + 1 + right_len <= width {
            let x = area.x + (width - right_len) as u16;
            buf.set_stringn(x, area.y, &right, right_len, self.theme.text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn title_and_clock() {
        let now = Local.with_ymd_and_hms(2024, 1, 2, 9, 5, 7).single().unwrap();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        HeaderWidget::new("strain", true, now, &theme).render(area, &mut buf);

        let text = line(&buf, 60);
        assert!(text.starts_with("strain [smooth]"));
        assert!(text.ends_with("s smooth  09:05:07"));
    }

    #[test]
    fn narrow_terminal_drops_hints() {
        let now = Local.with_ymd_and_hms(2024, 1, 2, 9, 5, 7).single().unwrap();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        HeaderWidget::new("strain", false, now, &theme).render(area, &mut buf);
        assert_eq!(line(&buf, 12), "strain      ");
    }
}
