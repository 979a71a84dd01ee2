//! Scripted in-memory source for engine tests.

use strain_core::{Palette, Result, Source, StrainError};

/// Replays one reading vector per `update()`, repeating the last one once
/// the script runs out.
#[derive(Debug)]
pub struct Scripted {
    pub top:       f32,
    pub available: bool,
    pub sensors:   Vec<String>,
    pub script:    Vec<Vec<f32>>,
    /// Edge-trigger result per step; `Err` means unsupported.
    pub edges:     Vec<std::result::Result<bool, ()>>,
    /// Add a sensor with this name when reaching this step.
    pub grow_at:   Option<(usize, String)>,
    readings:      Vec<f32>,
    step:          usize,
}

impl Scripted {
    pub fn new(top: f32, sensors: &[&str], script: Vec<Vec<f32>>) -> Self {
        Self {
            top,
            available: true,
            sensors: sensors.iter().map(|s| s.to_string()).collect(),
            script,
            edges: Vec::new(),
            grow_at: None,
            readings: vec![0.0; sensors.len()],
            step: 0,
        }
    }
}

impl Source for Scripted {
    fn name(&self) -> &str { "Scripted" }
    fn unit(&self) -> &str { "%" }

    fn update(&mut self) -> Result<()> {
        if let Some((at, name)) = &self.grow_at {
            if *at == self.step {
                self.sensors.push(name.clone());
            }
        }
        if let Some(readings) = self.script.get(self.step).or(self.script.last()) {
            self.readings = readings.clone();
        }
        self.step += 1;
        Ok(())
    }

    fn is_available(&self) -> bool { self.available }
    fn readings(&self) -> &[f32] { &self.readings }
    fn sensors(&self) -> &[String] { &self.sensors }
    fn top(&self) -> f32 { self.top }

    fn edge_triggered(&self) -> Result<bool> {
        match self.step.checked_sub(1).and_then(|s| self.edges.get(s)) {
            Some(Ok(triggered)) => Ok(*triggered),
            _ => Err(StrainError::Unsupported("edge trigger")),
        }
    }

    fn palette(&self) -> Palette {
        Palette::new("light", "dark", "light smooth", "dark smooth")
    }
}
