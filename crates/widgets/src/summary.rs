use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use strain_core::{Source, AXIS, TITLE};
use strain_theme::Theme;

/// Format a reading the way the graph axis does: whole numbers from 100 up,
/// one decimal below.
pub fn format_value(value: f32) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    sensor:  String,
    current: f32,
    max:     f32,
}

/// Current value and session maximum of every sensor in one source.
#[derive(Debug, Clone)]
pub struct SummaryPanel {
    title: String,
    unit:  String,
    rows:  Vec<Row>,
}

impl SummaryPanel {
    pub fn new(source: &dyn Source) -> Self {
        let mut panel = Self {
            title: source.name().to_string(),
            unit:  source.unit().to_string(),
            rows:  Vec::new(),
        };
        panel.observe(source);
        panel
    }

    /// Take the latest readings; sensors seen for the first time are added.
    pub fn observe(&mut self, source: &dyn Source) {
        for (i, (sensor, &value)) in source.sensors().iter().zip(source.readings()).enumerate() {
            match self.rows.get_mut(i) {
                Some(row) => {
                    row.current = value;
                    row.max = row.max.max(value);
                }
                None => self.rows.push(Row { sensor: sensor.clone(), current: value, max: value }),
            }
        }
    }

    /// Forget the session maxima.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.max = row.current;
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lines needed to draw the panel: title plus one per sensor.
    pub fn height(&self) -> u16 {
        (self.rows.len() + 1).min(u16::MAX as usize) as u16
    }

    /// `(sensor, current, max)` per row, for display and tests.
    pub fn rows(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.rows.iter().map(|r| (r.sensor.as_str(), r.current, r.max))
    }

    fn lines(&self, width: usize) -> Vec<String> {
        let name_width = self.rows.iter().map(|r| r.sensor.chars().count()).max().unwrap_or(0);
        let values: Vec<(String, String)> = self
            .rows
            .iter()
            .map(|r| (format_value(r.current), format_value(r.max)))
            .collect();
        let cur_width = values.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
        let max_width = values.iter().map(|(_, m)| m.len()).max().unwrap_or(0);

        self.rows
            .iter()
            .zip(values)
            .map(|(row, (current, max))| {
                let line = format!(
                    "{:<name_width$} {current:>cur_width$} {unit} ↑{max:>max_width$}",
                    row.sensor,
                    unit = self.unit,
                );
                line.chars().take(width).collect()
            })
            .collect()
    }
}

/// Draws a [`SummaryPanel`]: the source name, then one line per sensor.
pub struct SummaryWidget<'a> {
    panel: &'a SummaryPanel,
    theme: &'a Theme,
}

impl<'a> SummaryWidget<'a> {
    pub fn new(panel: &'a SummaryPanel, theme: &'a Theme) -> Self {
        Self { panel, theme }
    }
}

impl Widget for SummaryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, self.theme.text());

        let width = area.width as usize;
        let title = format!("{} ({})", self.panel.title, self.panel.unit);
        buf.set_stringn(area.x, area.y, title, width, self.theme.style(TITLE).to_ratatui());

        let value_style = self.theme.style(AXIS).to_ratatui();
        for (y, line) in (area.y + 1..area.bottom()).zip(self.panel.lines(width)) {
            buf.set_stringn(area.x, y, line, width, value_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strain_core::{Palette, Result};

    #[derive(Debug)]
    struct Fixed {
        sensors:  Vec<String>,
        readings: Vec<f32>,
    }

    impl Source for Fixed {
        fn name(&self) -> &str {
            "Temp"
        }
        fn unit(&self) -> &str {
            "C"
        }
        fn update(&mut self) -> Result<()> {
            Ok(())
        }
        fn is_available(&self) -> bool {
            true
        }
        fn readings(&self) -> &[f32] {
            &self.readings
        }
        fn sensors(&self) -> &[String] {
            &self.sensors
        }
        fn top(&self) -> f32 {
            100.0
        }
        fn palette(&self) -> Palette {
            Palette::new("a", "b", "c", "d")
        }
    }

    fn fixed(readings: &[f32]) -> Fixed {
        Fixed {
            sensors:  (0..readings.len()).map(|i| format!("s{i}")).collect(),
            readings: readings.to_vec(),
        }
    }

    #[test]
    fn formatting_switches_at_one_hundred() {
        assert_eq!(format_value(99.94), "99.9");
        assert_eq!(format_value(100.4), "100");
        assert_eq!(format_value(2400.0), "2400");
        assert_eq!(format_value(0.0), "0.0");
    }

    #[test]
    fn session_max_is_kept_until_reset() {
        let mut panel = SummaryPanel::new(&fixed(&[60.0]));
        panel.observe(&fixed(&[40.0]));
        assert_eq!(panel.rows().next(), Some(("s0", 40.0, 60.0)));
        panel.reset();
        assert_eq!(panel.rows().next(), Some(("s0", 40.0, 40.0)));
    }

    #[test]
    fn new_sensors_are_appended() {
        let mut panel = SummaryPanel::new(&fixed(&[1.0]));
        panel.observe(&fixed(&[1.0, 2.0]));
        assert_eq!(panel.height(), 3);
    }

    #[test]
    fn renders_title_and_aligned_rows() {
        let panel = SummaryPanel::new(&fixed(&[5.0, 45.5]));
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        SummaryWidget::new(&panel, &Theme::default()).render(area, &mut buf);

        let line = |y: u16| (0..20).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>();
        assert_eq!(line(0).trim_end(), "Temp (C)");
        assert_eq!(line(1).trim_end(), "s0  5.0 C ↑ 5.0");
        assert_eq!(line(2).trim_end(), "s1 45.5 C ↑45.5");
    }
}
