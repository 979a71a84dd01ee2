//! Sensor sources backed by sysinfo and Linux sysfs, plus CSV / JSON export
//! of their readings.

pub mod export;
pub mod fan;
pub mod freq;
pub mod power;
pub mod sysfs;
pub mod temp;
pub mod util;

#[cfg(test)]
mod testing;

pub use export::{snapshot_json, CsvLogger};
pub use fan::FanSource;
pub use freq::FreqSource;
pub use power::PowerSource;
pub use temp::TempSource;
pub use util::UtilSource;

use strain_config::StrainConfig;
use strain_core::Source;
use tracing::{info, warn};

/// Construct every source enabled in `config`, in display order.
///
/// Sources that find no sensors are dropped here so the shell never lays
/// out an empty graph.
pub fn build_sources(config: &StrainConfig) -> Vec<Box<dyn Source>> {
    let enabled = &config.sources;
    let mut sources: Vec<Box<dyn Source>> = Vec::new();

    if enabled.util {
        sources.push(Box::new(UtilSource::new()));
    }
    if enabled.freq {
        sources.push(Box::new(FreqSource::new()));
    }
    if enabled.temp {
        sources.push(Box::new(TempSource::new(config.alerts.temperature)));
    }
    if enabled.fan {
        sources.push(Box::new(FanSource::new()));
    }
    if enabled.power {
        sources.push(Box::new(PowerSource::new()));
    }

    sources.retain(|source| {
        let available = source.is_available();
        if available {
            info!("{} source: {} sensors", source.name(), source.sensors().len());
        } else {
            warn!("{} source has no sensors on this machine; skipping", source.name());
        }
        available
    });
    sources
}

/// Poll every source, logging failures instead of propagating them so one
/// broken backend cannot stall the others.
pub fn update_all(sources: &mut [Box<dyn Source>]) {
    for source in sources {
        if let Err(e) = source.update() {
            warn!("{} update failed: {e}", source.name());
        }
    }
}

/// `name`, or `name` with the lowest free numeric suffix (`"name 2"`, ...)
/// if it is already taken.
pub(crate) fn unique_name(taken: &[String], name: &str) -> String {
    if !taken.iter().any(|t| t == name) {
        return name.to_string();
    }
    (2..)
        .map(|n| format!("{name} {n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_get_suffixes() {
        let mut taken = Vec::new();
        for _ in 0..3 {
            let name = unique_name(&taken, "acpitz");
            taken.push(name);
        }
        assert_eq!(taken, vec!["acpitz", "acpitz 2", "acpitz 3"]);
    }

    #[test]
    fn disabled_sources_are_not_built() {
        let mut config = StrainConfig::default();
        config.sources.util = false;
        config.sources.freq = false;
        config.sources.temp = false;
        config.sources.fan = false;
        config.sources.power = false;
        assert!(build_sources(&config).is_empty());
    }
}
