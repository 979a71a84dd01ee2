use crate::{sysfs, unique_name};
use std::path::PathBuf;
use std::time::Instant;
use strain_core::{Palette, Result, Source};
use tracing::debug;

const PALETTE: Palette = Palette::new("power light", "power dark", "power light smooth", "power dark smooth");

const POWERCAP: &str = "/sys/class/powercap";

/// One RAPL domain: a cumulative energy counter in microjoules.
#[derive(Debug)]
struct Domain {
    energy:    PathBuf,
    /// Counter value at which `energy_uj` wraps back to zero.
    wraps_at:  Option<u64>,
    last:      Option<(u64, Instant)>,
}

impl Domain {
    /// Average power since the previous sample, or `None` on the first one.
    fn sample(&mut self, now: Instant) -> Option<f32> {
        let energy = sysfs::read_u64(&self.energy)?;
        let previous = self.last.replace((energy, now));
        let (before, then) = previous?;

        let secs = now.saturating_duration_since(then).as_secs_f64();
        if secs <= 0.0 {
            return None;
        }
        let delta = if energy >= before {
            energy - before
        } else {
            self.wraps_at?.saturating_sub(before) + energy
        };
        Some((delta as f64 / 1_000_000.0 / secs) as f32)
    }
}

/// Package and sub-domain power draw in watts from RAPL energy counters.
///
/// Watts are derived from the change in energy between updates, so the
/// first update after construction reports zero.
#[derive(Debug)]
pub struct PowerSource {
    domains:  Vec<Domain>,
    sensors:  Vec<String>,
    readings: Vec<f32>,
    seen_max: f32,
}

impl PowerSource {
    pub fn new() -> Self {
        Self::with_root(POWERCAP)
    }

    /// Domains whose counter cannot be read (usually a permissions issue)
    /// are skipped.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut source = Self { domains: Vec::new(), sensors: Vec::new(), readings: Vec::new(), seen_max: 0.0 };

        for dir in sysfs::entries_with_prefix(&root, "intel-rapl:") {
            let energy = dir.join("energy_uj");
            if sysfs::read_u64(&energy).is_none() {
                debug!("skipping unreadable RAPL counter {}", energy.display());
                continue;
            }
            let label = sysfs::read_trimmed(dir.join("name")).unwrap_or_else(|| "package".to_string());
            source.sensors.push(unique_name(&source.sensors, &label));
            source.domains.push(Domain {
                wraps_at: sysfs::read_u64(dir.join("max_energy_range_uj")),
                energy,
                last: None,
            });
            source.readings.push(0.0);
        }
        source
    }

    fn sample_at(&mut self, now: Instant) {
        for (slot, domain) in self.readings.iter_mut().zip(&mut self.domains) {
            *slot = domain.sample(now).unwrap_or(0.0);
            self.seen_max = self.seen_max.max(*slot);
        }
    }
}

impl Default for PowerSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for PowerSource {
    fn name(&self) -> &str {
        "Power"
    }

    fn unit(&self) -> &str {
        "W"
    }

    fn update(&mut self) -> Result<()> {
        self.sample_at(Instant::now());
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
