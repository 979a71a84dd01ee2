use crate::sysfs;
use crate::util::average;
use std::path::PathBuf;
use strain_core::{Palette, Result, Source};
use sysinfo::System;

const PALETTE: Palette = Palette::new("freq light", "freq dark", "freq light smooth", "freq dark smooth");

const MAX_FREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";

/// Per-core clock frequency in MHz, led by the average.
#[derive(Debug)]
pub struct FreqSource {
    sys:      System,
    sensors:  Vec<String>,
    readings: Vec<f32>,
    /// Hardware ceiling from cpufreq, if the kernel exposes one.
    ceiling:  Option<f32>,
    seen_max: f32,
}

impl FreqSource {
    pub fn new() -> Self {
        Self::with_ceiling_file(MAX_FREQ)
    }

    fn with_ceiling_file(path: impl Into<PathBuf>) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_frequency();
        let cores = sys.cpus().len();

        // cpuinfo_max_freq is in kHz.
        let ceiling = sysfs::read_u64(path.into())
            .filter(|&khz| khz > 0)
            .map(|khz| khz as f32 / 1000.0);

        let mut sensors = Vec::with_capacity(cores + 1);
        if cores > 0 {
            sensors.push("Avg".to_string());
            sensors.extend((0..cores).map(|c| format!("Core {c}")));
        }
        let readings = vec![0.0; sensors.len()];

        Self { sys, sensors, readings, ceiling, seen_max: 0.0 }
    }
}

impl Default for FreqSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for FreqSource {
    fn name(&self) -> &str {
        "Freq"
    }

    fn unit(&self) -> &str {
        "MHz"
    }

    fn update(&mut self) -> Result<()> {
        self.sys.refresh_cpu_frequency();
        let per_core: Vec<f32> = self.sys.cpus().iter().map(|c| c.frequency() as f32).collect();
        if per_core.is_empty() || self.sensors.is_empty() {
            return Ok(());
        }

        for core in self.sensors.len() - 1..per_core.len() {
            self.sensors.push(format!("Core {core}"));
        }
        self.readings.resize(self.sensors.len(), 0.0);

        self.readings[0] = average(&per_core);
        for (slot, mhz) in self.readings[1..].iter_mut().zip(&per_core) {
            *slot = *mhz;
        }
        self.seen_max = per_core.iter().copied().fold(self.seen_max, f32::max);
        Ok(())
    }

    /// Virtual machines often report every core at 0 MHz.
    fn is_available(&self) -> bool {
        !self.sensors.is_empty() && (self.ceiling.is_some() || self.sys.cpus().iter().any(|c| c.frequency() > 0))
    }

    fn readings(&self) -> &[f32] {
        &self.readings
    }

    fn sensors(&self) -> &[String] {
        &self.sensors
    }

    fn top(&self) -> f32 {
        self.ceiling.unwrap_or(self.seen_max).max(1.0)
    }

    fn palette(&self) -> Palette {
        PALETTE
    }
}
