//! Error types for the guidance engine

use thiserror::Error;

/// Errors produced by the guidance core and its configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuidanceError {
    /// Input that would otherwise poison the statistics (non-finite numbers,
    /// out-of-range percentages, an empty window request)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Runtime configuration that failed to load or validate
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GuidanceError {
    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the caller's data rather than the server
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Rejects a value that is NaN or infinite, naming the offending field.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64, GuidanceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GuidanceError::invalid_input(format!(
            "{field} must be a finite number, got {value}"
        )))
    }
}

/// Rejects a finite value outside `min..=max`.
pub(crate) fn ensure_in_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, GuidanceError> {
    let value = ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(GuidanceError::invalid_input(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}

/// Rejects a finite value below zero.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64, GuidanceError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(GuidanceError::invalid_input(format!(
            "{field} cannot be negative, got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = GuidanceError::invalid_input("window size must be at least 1");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid input: window size must be at least 1"
        );

        let err = GuidanceError::config("bad window");
        assert!(!err.is_invalid_input());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("airTemperature", 12.5), Ok(12.5));
        assert!(ensure_finite("airTemperature", f64::NAN).is_err());
        assert!(ensure_finite("airTemperature", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_in_range() {
        assert!(ensure_in_range("precipitationProbability", 100.0, 0.0, 100.0).is_ok());
        assert!(ensure_in_range("precipitationProbability", 100.5, 0.0, 100.0).is_err());
        assert!(ensure_in_range("precipitationProbability", -1.0, 0.0, 100.0).is_err());
        assert!(ensure_in_range("precipitationProbability", f64::NAN, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("uvIndex", 0.0), Ok(0.0));
        let err = ensure_non_negative("uvIndex", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: uvIndex cannot be negative, got -1");
    }
}
