//! Error types for Verdant
//!
//! Generation itself cannot fail once a configuration is valid; the
//! variants below cover guarded reductions, manual overrides and
//! configuration validation.

use thiserror::Error;

/// Result type alias for Verdant operations
pub type Result<T> = std::result::Result<T, VerdantError>;

/// Main error type for Verdant operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerdantError {
    /// A reduction was asked to pick from an empty set of readings
    #[error("No readings to reduce")]
    NoReadings,

    /// An operation needed at least one series point
    #[error("Series is empty")]
    EmptySeries,

    /// The sensor id is not part of the catalog in use
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    /// A value was rejected for a sensor (non-finite, or not 0/1 for switches)
    #[error("Invalid value {value} for sensor {sensor}")]
    InvalidValue { sensor: String, value: f64 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VerdantError::InvalidValue {
            sensor: "switch_1".to_string(),
            value: 0.5,
        };
        assert_eq!(err.to_string(), "Invalid value 0.5 for sensor switch_1");

        let err = VerdantError::UnknownSensor("ghost".to_string());
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_result_alias() {
        fn guarded(empty: bool) -> Result<u8> {
            if empty {
                Err(VerdantError::NoReadings)
            } else {
                Ok(1)
            }
        }

        assert_eq!(guarded(false), Ok(1));
        assert_eq!(guarded(true), Err(VerdantError::NoReadings));
    }
}
