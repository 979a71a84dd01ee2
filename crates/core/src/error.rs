use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum StrainError {
    #[error("config error: {0}")]
    Config(String),

    /// Inconsistent series / sub-title / visibility counts in a graph layout.
    #[error("layout error: {0}")]
    Layout(String),

    #[error("system error: {0}")]
    System(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    /// A source does not implement an optional capability.
    #[error("{0} is not supported by this source")]
    Unsupported(&'static str),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl StrainError {
    /// `true` for the "capability absent" case callers are expected to swallow.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

pub type Result<T, E = StrainError> = std::result::Result<T, E>;
