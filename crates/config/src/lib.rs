pub mod schema;
pub mod watcher;

pub use schema::{
    AlertConfig, AttrConfig, GlobalConfig, SourcesConfig, StrainConfig, ThemeConfig,
    MIN_REFRESH_MS,
};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};
use strain_core::{Result, StrainError};
use tracing::warn;

/// Load configuration from a TOML file.  Returns `StrainConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<StrainConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(StrainConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| StrainError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: StrainConfig =
        toml::from_str(&raw).map_err(|e| StrainError::Config(format!("TOML parse error: {e}")))?;

    Ok(sanitize(config))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("strain").join("strain.toml")
}

/// Clamp values the dashboard cannot run with.
pub fn sanitize(mut config: StrainConfig) -> StrainConfig {
    if config.global.refresh_ms < MIN_REFRESH_MS {
        warn!(
            "refresh_ms = {} is too fast; using {MIN_REFRESH_MS}",
            config.global.refresh_ms
        );
        config.global.refresh_ms = MIN_REFRESH_MS;
    }
    if config.global.history == 0 {
        warn!("history = 0 would keep no samples; using 1");
        config.global.history = 1;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("strain-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load("/nonexistent/strain/strain.toml").unwrap();
        assert_eq!(cfg, StrainConfig::default());
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let path = temp_file("bad.toml", "[global\nsmooth = ");
        let err = load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, StrainError::Config(_)));
    }

    #[test]
    fn load_sanitizes_values() {
        let path = temp_file("fast.toml", "[global]\nrefresh_ms = 5\nhistory = 0\n");
        let cfg = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.global.refresh_ms, MIN_REFRESH_MS);
        assert_eq!(cfg.global.history, 1);
    }

    #[test]
    fn default_path_ends_in_strain_toml() {
        assert!(default_path().ends_with("strain/strain.toml"));
    }
}
