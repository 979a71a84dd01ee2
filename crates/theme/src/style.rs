use crate::colors::Color;

/// Resolved colours for one palette attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttrStyle {
    pub fg: Color,
    pub bg: Color,
}

impl AttrStyle {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    #[inline]
    pub fn to_ratatui(self) -> ratatui::style::Style {
        ratatui::style::Style::default()
            .fg(self.fg.to_ratatui())
            .bg(self.bg.to_ratatui())
    }
}
