pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::AttrStyle;

use std::collections::HashMap;
use strain_config::ThemeConfig;
use strain_core::{AXIS, BACKGROUND, LINE, TITLE};
use tracing::warn;

/// Built-in graph colours: `(attribute prefix, light, dark)`.
///
/// Each prefix expands to the four attributes of a [`strain_core::Palette`]:
/// `"<prefix> light"`, `"<prefix> dark"` and their `" smooth"` variants.
const GRAPH_COLORS: &[(&str, &str, &str)] = &[
    ("util",      "#a6e3a1", "#40a02b"),
    ("freq",      "#89b4fa", "#1e66f5"),
    ("temp",      "#fab387", "#fe640b"),
    ("high temp", "#f38ba8", "#d20f39"),
    ("fan",       "#f9e2af", "#df8e1d"),
    ("power",     "#cba6f7", "#8839ef"),
];

/// Compiled theme derived from [`ThemeConfig`].
///
/// Maps every palette attribute name used by the graphs and panels to a
/// foreground/background pair.  Calling [`Theme::from_config`] is
/// infallible: invalid colour strings fall back to defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent:     Color,
    attrs:          HashMap<String, AttrStyle>,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let background = Color::from_hex(&cfg.background).unwrap_or(Color::DARK);
        let foreground = Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE);
        let accent     = Color::from_hex(&cfg.accent).unwrap_or(Color::PURPLE);

        let mut attrs = HashMap::new();
        attrs.insert(BACKGROUND.to_string(), AttrStyle::new(foreground, background));
        attrs.insert(TITLE.to_string(), AttrStyle::new(accent, background));
        attrs.insert(AXIS.to_string(), AttrStyle::new(foreground, background));
        attrs.insert(LINE.to_string(), AttrStyle::new(Color::GREY, background));

        for &(prefix, light, dark) in GRAPH_COLORS {
            for (shade, hex) in [("light", light), ("dark", dark)] {
                let color = Color::from_hex(hex).unwrap_or(accent);
                // Whole cells are painted with the background channel; the
                // partial top cell draws a block glyph in the foreground.
                attrs.insert(format!("{prefix} {shade}"), AttrStyle::new(background, color));
                attrs.insert(format!("{prefix} {shade} smooth"), AttrStyle::new(color, background));
            }
        }

        for (name, over) in &cfg.attrs {
            let base = attrs
                .get(name)
                .copied()
                .unwrap_or(AttrStyle::new(foreground, background));
            attrs.insert(
                name.clone(),
                AttrStyle::new(
                    parse_override(name, "fg", over.fg.as_deref()).unwrap_or(base.fg),
                    parse_override(name, "bg", over.bg.as_deref()).unwrap_or(base.bg),
                ),
            );
        }

        Self { background, foreground, accent, attrs }
    }

    /// Colours for a palette attribute; unknown names draw as plain text.
    pub fn style(&self, attr: &str) -> AttrStyle {
        self.attrs
            .get(attr)
            .copied()
            .unwrap_or(AttrStyle::new(self.foreground, self.background))
    }

    /// Plain text on the dashboard background.
    pub fn text(&self) -> ratatui::style::Style {
        self.style(BACKGROUND).to_ratatui()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn parse_override(attr: &str, channel: &str, hex: Option<&str>) -> Option<Color> {
    let hex = hex?;
    let color = Color::from_hex(hex);
    if color.is_none() {
        warn!("theme.attrs.\"{attr}\".{channel} = '{hex}' is not a hex colour; ignoring");
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use strain_config::AttrConfig;

    #[test]
    fn graph_attributes_are_predefined() {
        let theme = Theme::default();
        let fill = theme.style("temp light");
        let smooth = theme.style("temp light smooth");
        assert_eq!(fill.fg, theme.background);
        assert_eq!(smooth.bg, theme.background);
        assert_eq!(fill.bg, smooth.fg);
    }

    #[test]
    fn overrides_replace_single_channels() {
        let mut cfg = ThemeConfig::default();
        cfg.attrs.insert(
            "util dark".into(),
            AttrConfig { fg: None, bg: Some("#ff0000".into()) },
        );
        let theme = Theme::from_config(&cfg);
        let style = theme.style("util dark");
        assert_eq!(style.bg, Color::from_hex("#ff0000").unwrap());
        assert_eq!(style.fg, theme.background);
    }

    #[test]
    fn invalid_override_keeps_builtin() {
        let mut cfg = ThemeConfig::default();
        cfg.attrs.insert(
            "fan light".into(),
            AttrConfig { fg: Some("orange".into()), bg: None },
        );
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.style("fan light"), Theme::default().style("fan light"));
    }

    #[test]
    fn unknown_attribute_is_plain_text() {
        let theme = Theme::default();
        assert_eq!(theme.style("nope"), AttrStyle::new(theme.foreground, theme.background));
    }
}
