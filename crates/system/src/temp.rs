use crate::unique_name;
use std::collections::HashMap;
use strain_core::{Palette, Result, Source};
use sysinfo::Components;
use tracing::debug;

const PALETTE: Palette = Palette::new("temp light", "temp dark", "temp light smooth", "temp dark smooth");
const ALERT_PALETTE: Palette = Palette::new(
    "high temp light",
    "high temp dark",
    "high temp light smooth",
    "high temp dark smooth",
);

/// Hardware temperature sensors in degrees Celsius.
///
/// Edge-triggered: any sensor above the configured threshold switches the
/// graphs to the alert palette.
#[derive(Debug)]
pub struct TempSource {
    components: Components,
    threshold:  f32,
    sensors:    Vec<String>,
    readings:   Vec<f32>,
    /// Component label → indices into `sensors`, one per occurrence.
    index:      HashMap<String, Vec<usize>>,
    seen_max:   f32,
}

impl TempSource {
    pub fn new(threshold: f32) -> Self {
        let mut source = Self {
            components: Components::new_with_refreshed_list(),
            threshold,
            sensors: Vec::new(),
            readings: Vec::new(),
            index: HashMap::new(),
            seen_max: 0.0,
        };
        let labeled = source.labeled();
        source.ingest(&labeled);
        source
    }

    fn labeled(&self) -> Vec<(String, Option<f32>)> {
        self.components
            .iter()
            .map(|c| (c.label().to_string(), c.temperature()))
            .collect()
    }

    /// Store one reading per component, registering labels not seen before.
    ///
    /// Labels are matched in order of appearance so that two components with
    /// the same label keep distinct series ("acpitz", "acpitz 2").
    fn ingest(&mut self, labeled: &[(String, Option<f32>)]) {
        let mut occurrence: HashMap<&str, usize> = HashMap::new();
        for (label, celsius) in labeled {
            let nth = occurrence.entry(label.as_str()).or_default();
            let slots = self.index.entry(label.clone()).or_default();
            let slot = match slots.get(*nth) {
                Some(&slot) => slot,
                None => {
                    let name = unique_name(&self.sensors, label);
                    debug!("temperature sensor '{name}' registered");
                    self.sensors.push(name);
                    self.readings.push(0.0);
                    slots.push(self.sensors.len() - 1);
                    self.sensors.len() - 1
                }
            };
            *nth += 1;

            // Missing values keep the previous reading.
            if let Some(c) = celsius.filter(|c| c.is_finite()) {
                self.readings[slot] = c;
                self.seen_max = self.seen_max.max(c);
            }
        }
    }
}

impl Source for TempSource {
    fn name(&self) -> &str {
        "Temp"
    }

    fn unit(&self) -> &str {
        "C"
    }

    fn update(&mut self) -> Result<()> {
        self.components.refresh(true);
        let labeled = self.labeled();
        self.ingest(&labeled);
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
        self.seen_max.max(100.0)
    }

    fn edge_triggered(&self) -> Result<bool> {
        Ok(self.readings.iter().any(|&c| c > self.threshold))
    }

    fn palette(&self) -> Palette {
        PALETTE
    }

    fn alert_palette(&self) -> Option<Palette> {
        Some(ALERT_PALETTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(threshold: f32) -> TempSource {
        TempSource {
            components: Components::new(),
            threshold,
            sensors: Vec::new(),
            readings: Vec::new(),
            index: HashMap::new(),
            seen_max: 0.0,
        }
    }

    fn reading(label: &str, c: f32) -> (String, Option<f32>) {
        (label.to_string(), Some(c))
    }

    #[test]
    fn duplicate_labels_get_distinct_series() {
        let mut temp = source(80.0);
        temp.ingest(&[reading("acpitz", 40.0), reading("acpitz", 45.0), reading("nvme", 30.0)]);
        assert_eq!(temp.sensors(), &["acpitz", "acpitz 2", "nvme"]);
        temp.ingest(&[reading("acpitz", 41.0), reading("acpitz", 46.0), reading("nvme", 31.0)]);
        assert_eq!(temp.readings(), &[41.0, 46.0, 31.0]);
    }

    #[test]
    fn new_components_extend_the_list() {
        let mut temp = source(80.0);
        temp.ingest(&[reading("k10temp", 50.0)]);
        temp.ingest(&[reading("k10temp", 51.0), reading("amdgpu", 60.0)]);
        assert_eq!(temp.sensors(), &["k10temp", "amdgpu"]);
    }

    #[test]
    fn missing_value_keeps_previous() {
        let mut temp = source(80.0);
        temp.ingest(&[reading("cpu", 55.0)]);
        temp.ingest(&[("cpu".to_string(), None)]);
        assert_eq!(temp.readings(), &[55.0]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut temp = source(80.0);
        temp.ingest(&[reading("cpu", 80.0)]);
        assert!(!temp.edge_triggered().unwrap());
        temp.ingest(&[reading("cpu", 80.5)]);
        assert!(temp.edge_triggered().unwrap());
        assert_eq!(temp.alert_palette(), Some(ALERT_PALETTE));
    }

    #[test]
    fn top_is_at_least_one_hundred() {
        let mut temp = source(80.0);
        assert_eq!(temp.top(), 100.0);
        temp.ingest(&[reading("cpu", 104.0)]);
        assert_eq!(temp.top(), 104.0);
    }
}
