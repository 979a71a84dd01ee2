use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use strain_renderer::Surface;
use strain_theme::Theme;

/// Paints a rendered [`Surface`] into the terminal buffer, resolving each
/// cell's palette attribute through the [`Theme`].
///
/// The surface is clipped to `area`; cells outside it are dropped.
pub struct GraphWidget<'a> {
    surface: &'a Surface,
    theme:   &'a Theme,
}

impl<'a> GraphWidget<'a> {
    pub fn new(surface: &'a Surface, theme: &'a Theme) -> Self {
        Self { surface, theme }
    }
}

impl Widget for GraphWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.surface.rows().min(area.height as usize);
        for y in 0..rows {
            let Some(row) = self.surface.row(y) else { continue };
            for (x, cell) in row.iter().take(area.width as usize).enumerate() {
                let pos = (area.x + x as u16, area.y + y as u16);
                if let Some(target) = buf.cell_mut(pos) {
                    target
                        .set_char(cell.symbol)
                        .set_style(self.theme.style(cell.attr).to_ratatui());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strain_renderer::Cell;

    #[test]
    fn cells_take_theme_colours() {
        let theme = Theme::default();
        let mut surface = Surface::new(3, 2);
        surface.set(1, 1, Cell::new(' ', "util dark"));
        surface.set(2, 0, Cell::new('▄', "util dark smooth"));

        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        GraphWidget::new(&surface, &theme).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].bg, theme.style("util dark").bg.to_ratatui());
        assert_eq!(buf[(2, 0)].symbol(), "▄");
        assert_eq!(buf[(2, 0)].fg, theme.style("util dark smooth").fg.to_ratatui());
    }

    #[test]
    fn oversized_surface_is_clipped() {
        let theme = Theme::default();
        let mut surface = Surface::new(10, 10);
        surface.set(9, 9, Cell::new('x', "axis"));

        let area = Rect::new(2, 1, 4, 3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 5));
        GraphWidget::new(&surface, &theme).render(area, &mut buf);
        assert!(buf.content().iter().all(|c| c.symbol() != "x"));
    }
}
