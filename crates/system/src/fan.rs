use crate::{sysfs, unique_name};
use std::path::{Path, PathBuf};
use strain_core::{Palette, Result, Source};
use tracing::debug;

const PALETTE: Palette = Palette::new("fan light", "fan dark", "fan light smooth", "fan dark smooth");

const HWMON: &str = "/sys/class/hwmon";

/// Fan speeds in RPM from the Linux hwmon interface.
#[derive(Debug)]
pub struct FanSource {
    root:     PathBuf,
    inputs:   Vec<PathBuf>,
    sensors:  Vec<String>,
    readings: Vec<f32>,
    seen_max: f32,
}

impl FanSource {
    pub fn new() -> Self {
        Self::with_root(HWMON)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut source = Self {
            root:     root.into(),
            inputs:   Vec::new(),
            sensors:  Vec::new(),
            readings: Vec::new(),
            seen_max: 0.0,
        };
        source.scan();
        source
    }

    /// Register `fan*_input` files not already tracked.
    fn scan(&mut self) {
        for chip in sysfs::entries_with_prefix(&self.root, "hwmon") {
            let chip_name = sysfs::read_trimmed(chip.join("name")).unwrap_or_else(|| file_name(&chip));
            for input in sysfs::entries_with_prefix(&chip, "fan") {
                let file = file_name(&input);
                let Some(fan) = file.strip_suffix("_input") else {
                    continue;
                };
                if self.inputs.contains(&input) {
                    continue;
                }
                let label = sysfs::read_trimmed(chip.join(format!("{fan}_label")))
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| format!("{chip_name} {fan}"));
                let name = unique_name(&self.sensors, &label);
                debug!("fan sensor '{name}' at {}", input.display());
                self.sensors.push(name);
                self.inputs.push(input);
                self.readings.push(0.0);
            }
        }
    }
}

impl Default for FanSource {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Source for FanSource {
    fn name(&self) -> &str {
        "Fan"
    }

    fn unit(&self) -> &str {
        "RPM"
    }

    fn update(&mut self) -> Result<()> {
        self.scan();
        for (slot, input) in self.readings.iter_mut().zip(&self.inputs) {
            // A fan whose driver went away reads as stopped.
            *slot = sysfs::read_u64(input).map_or(0.0, |rpm| rpm as f32);
            self.seen_max = self.seen_max.max(*slot);
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.sensors.is_empty()
    }

    fn readings(&self) -> &[f32] {
        &self.readings
    }

    fn sensors(&self) -> &[String] {
        &self.sensors
    }

    fn top(&self) -> f32 {
        self.seen_max.max(1.0)
    }

    fn palette(&self) -> Palette {
        PALETTE
    }
}
