use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use strain_core::{Result, Snapshot};
use tracing::{debug, info};

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Appends one CSV row per tick.
///
/// The header (`time` then one `Source:sensor` column per sensor) is fixed
/// by the first snapshot written.  Sensors that appear later are not
/// logged; a sensor that drops out leaves its field empty.
pub struct CsvLogger<W: Write> {
    out:          W,
    /// Empty until the first snapshot fixes the column order.
    columns:      Vec<String>,
    wants_header: bool,
}

impl CsvLogger<BufWriter<File>> {
    /// Open `path` for appending.  A non-empty file is assumed to carry a
    /// header already.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let resumed = file.metadata()?.len() > 0;
        info!("Logging readings to {}", path.display());
        let mut logger = Self::new(BufWriter::new(file));
        if resumed {
            debug!("{} is not empty; skipping header", path.display());
            logger.wants_header = false;
        }
        Ok(logger)
    }
}

impl<W: Write> CsvLogger<W> {
    pub fn new(out: W) -> Self {
        Self { out, columns: Vec::new(), wants_header: true }
    }

    pub fn write(&mut self, snapshot: &Snapshot) -> Result<()> {
        let values: HashMap<String, f32> = snapshot
            .sources
            .iter()
            .flat_map(|source| {
                source
                    .sensors
                    .iter()
                    .map(move |s| (column_name(&source.name, &s.name), s.value))
            })
            .collect();

        if self.columns.is_empty() {
            self.columns = ordered_columns(snapshot);
            if self.columns.is_empty() {
                return Ok(());
            }
        }
        if self.wants_header {
            let header: Vec<String> = std::iter::once("time".to_string())
                .chain(self.columns.iter().map(|c| escape_csv(c)))
                .collect();
            writeln!(self.out, "{}", header.join(","))?;
            self.wants_header = false;
        }

        let mut row = vec![snapshot.taken_at.format(TIMESTAMP).to_string()];
        row.extend(
            self.columns
                .iter()
                .map(|c| values.get(c).map(|v| format!("{v:.2}")).unwrap_or_default()),
        );
        writeln!(self.out, "{}", row.join(","))?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn column_name(source: &str, sensor: &str) -> String {
    format!("{source}:{sensor}")
}

fn ordered_columns(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .sources
        .iter()
        .flat_map(|source| source.sensors.iter().map(|s| column_name(&source.name, &s.name)))
        .collect()
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// `{ "Source": { "sensor": value, ... }, ... }` in source order.
pub fn snapshot_json(snapshot: &Snapshot) -> Value {
    let mut root = Map::new();
    for source in &snapshot.sources {
        let sensors: Map<String, Value> = source
            .sensors
            .iter()
            .map(|s| (s.name.clone(), Value::from(f64::from(s.value))))
            .collect();
        root.insert(source.name.clone(), Value::Object(sensors));
    }
    Value::Object(root)
}
