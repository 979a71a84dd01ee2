use strain_core::{Palette, Result, Source};
use sysinfo::System;
use tracing::info;

const PALETTE: Palette = Palette::new("util light", "util dark", "util light smooth", "util dark smooth");

/// Per-core CPU utilisation in percent, led by the all-core average.
///
/// sysinfo computes usage as a delta between two refreshes, so the very
/// first [`update`](Source::update) reports zero for every core.
#[derive(Debug)]
pub struct UtilSource {
    sys:      System,
    sensors:  Vec<String>,
    readings: Vec<f32>,
}

impl UtilSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        let cores = sys.cpus().len();
        let mut source = Self { sys, sensors: Vec::new(), readings: Vec::new() };
        source.track(cores);
        source
    }

    /// Extend the sensor list to `cores` cores plus the average.
    fn track(&mut self, cores: usize) {
        if self.sensors.is_empty() && cores > 0 {
            self.sensors.push("Avg".to_string());
        }
        let known = self.sensors.len().saturating_sub(1);
        if cores > known && known > 0 {
            info!("{} CPU cores came online", cores - known);
        }
        for core in known..cores {
            self.sensors.push(format!("Core {core}"));
        }
        self.readings.resize(self.sensors.len(), 0.0);
    }
}

impl Default for UtilSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for UtilSource {
    fn name(&self) -> &str {
        "Util"
    }

    fn unit(&self) -> &str {
        "%"
    }

    fn update(&mut self) -> Result<()> {
        self.sys.refresh_cpu_usage();
        let per_core: Vec<f32> = self.sys.cpus().iter().map(|c| c.cpu_usage()).collect();
        self.track(per_core.len());
        if per_core.is_empty() {
            return Ok(());
        }

        self.readings[0] = average(&per_core);
        for (slot, usage) in self.readings[1..].iter_mut().zip(&per_core) {
            *slot = *usage;
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
        100.0
    }

    fn palette(&self) -> Palette {
        PALETTE
    }
}

pub(crate) fn average(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}
