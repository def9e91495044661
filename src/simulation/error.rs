//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.

use crate::types::ConfigValidationError;
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Configuration(#[from] ConfigValidationError),

    /// Aggregation was asked to summarize zero records
    #[error("Cannot summarize an empty set of timing records")]
    EmptyInput,

    /// The records span no positive observation window
    #[error("Observation window must be positive, got {0}")]
    DegenerateWindow(f64),

    /// A hand-built lookup table is malformed
    #[error("Invalid lookup table: {0}")]
    InvalidLookupTable(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a lookup table error
    pub fn invalid_lookup_table(msg: impl Into<String>) -> Self {
        Self::InvalidLookupTable(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// Nothing inside a run is retried; only output failures may succeed
    /// when attempted again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::Configuration(_) => false,
            SimulationError::EmptyInput => false,
            SimulationError::DegenerateWindow(_) => false,
            SimulationError::InvalidLookupTable(_) => false,
            SimulationError::Io(_) => true,
            SimulationError::Serialization(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::Configuration(_) => "Configuration",
            SimulationError::EmptyInput => "Empty Input",
            SimulationError::DegenerateWindow(_) => "Metrics",
            SimulationError::InvalidLookupTable(_) => "Lookup Table",
            SimulationError::Io(_) => "IO",
            SimulationError::Serialization(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SimulationError::from(ConfigValidationError::InvalidServerCount(0));
        assert_eq!(
            error.to_string(),
            "Configuration validation failed: Server count must be greater than 0, got 0"
        );

        assert_eq!(
            SimulationError::EmptyInput.to_string(),
            "Cannot summarize an empty set of timing records"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            SimulationError::from(ConfigValidationError::InvalidObservationCount(0)).category(),
            "Configuration"
        );
        assert_eq!(SimulationError::EmptyInput.category(), "Empty Input");
        assert_eq!(SimulationError::invalid_lookup_table("empty").category(), "Lookup Table");
    }

    #[test]
    fn test_error_recoverability() {
        assert!(!SimulationError::EmptyInput.is_recoverable());
        assert!(!SimulationError::DegenerateWindow(0.0).is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(SimulationError::from(io).is_recoverable());
    }
}
