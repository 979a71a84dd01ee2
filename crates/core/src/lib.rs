pub mod error;
pub mod event;
pub mod source;
pub mod state;

pub use error::{Result, StrainError};
pub use event::Message;
pub use source::{Palette, Source, AXIS, BACKGROUND, LINE, TITLE};
pub use state::{SensorReading, Snapshot, SourceReadings};
