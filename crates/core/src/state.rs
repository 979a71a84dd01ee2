use crate::source::Source;
use chrono::{DateTime, Local};
use serde::Serialize;

/// A point-in-time copy of every source's readings.
///
/// Used by the CSV logger and the one-shot JSON dump; the graphs read their
/// sources directly.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub taken_at: DateTime<Local>,
    pub sources:  Vec<SourceReadings>,
}

/// Readings of one source at snapshot time.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReadings {
    pub name:    String,
    pub unit:    String,
    pub sensors: Vec<SensorReading>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorReading {
    pub name:  String,
    pub value: f32,
}

impl Snapshot {
    /// Copy the current readings of every available source.
    pub fn capture<'a>(sources: impl IntoIterator<Item = &'a dyn Source>) -> Self {
        let sources = sources
            .into_iter()
            .filter(|s| s.is_available())
            .map(SourceReadings::from_source)
            .collect();

        Self { taken_at: Local::now(), sources }
    }

    /// Total number of sensors across all sources.
    #[must_use]
    pub fn sensor_count(&self) -> usize {
        self.sources.iter().map(|s| s.sensors.len()).sum()
    }
}

impl SourceReadings {
    pub fn from_source(source: &dyn Source) -> Self {
        let sensors = source
            .sensors()
            .iter()
            .zip(source.readings())
            .map(|(name, &value)| SensorReading { name: name.clone(), value })
            .collect();

        Self {
            name: source.name().to_string(),
            unit: source.unit().to_string(),
            sensors,
        }
    }
}
