use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration structure parsed from `strain.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrainConfig {
    /// Refresh rate, history length and display switches.
    pub global: GlobalConfig,
    /// Which sensor sources to poll and which sensors start hidden.
    pub sources: SourcesConfig,
    /// Alert thresholds.
    pub alerts: AlertConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Lowest accepted refresh interval.
pub const MIN_REFRESH_MS: u64 = 100;

/// Global dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Milliseconds between sensor polls.
    pub refresh_ms: u64,
    /// Samples kept per sensor.
    pub history: usize,
    /// Draw bars with sub-cell resolution.
    pub smooth: bool,
    /// Header line shown above the graphs.
    pub title: String,
    /// Show the summary column beside the graphs.
    pub summary: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 1_000,
            history:    300,
            smooth:     false,
            title:      "strain".to_string(),
            summary:    true,
        }
    }
}

/// Source enable flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub util:  bool,
    pub freq:  bool,
    pub temp:  bool,
    pub fan:   bool,
    pub power: bool,
    /// Sensors hidden at start-up, keyed by source name
    /// (e.g. `Temp = ["acpitz"]`).
    pub hidden: HashMap<String, Vec<String>>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            util:   true,
            freq:   true,
            temp:   true,
            fan:    true,
            power:  true,
            hidden: HashMap::new(),
        }
    }
}

impl SourcesConfig {
    /// Sensors of `source` that should start hidden.
    pub fn hidden_for(&self, source: &str) -> &[String] {
        self.hidden.get(source).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Temperature (°C) above which the temperature graph switches to its
    /// alert colours.
    pub temperature: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { temperature: 80.0 }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Dashboard background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent / highlight color (titles).
    pub accent: String,
    /// Per-attribute overrides keyed by palette attribute name,
    /// e.g. `"temp light" = { bg = "#f38ba8" }`.
    pub attrs: HashMap<String, AttrConfig>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(), // Catppuccin Mocha base
            foreground: "#cdd6f4".to_string(), // Catppuccin Mocha text
            accent:     "#cba6f7".to_string(), // Catppuccin Mocha mauve
            attrs:      HashMap::new(),
        }
    }
}

/// Foreground / background pair for one palette attribute.  Unset channels
/// keep the built-in colour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttrConfig {
    pub fg: Option<String>,
    pub bg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let cfg: StrainConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, StrainConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg: StrainConfig = toml::from_str(
            r##"
            [global]
            smooth = true

            [sources]
            fan = false
            hidden = { Temp = ["acpitz"] }

            [theme.attrs]
            "temp light" = { bg = "#ff0000" }
            "##,
        )
        .unwrap();

        assert!(cfg.global.smooth);
        assert_eq!(cfg.global.refresh_ms, 1_000);
        assert!(!cfg.sources.fan);
        assert!(cfg.sources.util);
        assert_eq!(cfg.sources.hidden_for("Temp"), &["acpitz".to_string()]);
        assert!(cfg.sources.hidden_for("Util").is_empty());
        assert_eq!(cfg.theme.attrs["temp light"].bg.as_deref(), Some("#ff0000"));
        assert_eq!(cfg.theme.attrs["temp light"].fg, None);
    }
}
