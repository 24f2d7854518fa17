use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for geometric operations
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors raised by the geometric core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeoError {
    /// A precondition on a numeric argument was violated
    InvalidArgument {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Latitude/longitude outside the valid range or not finite
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
    },
}

impl GeoError {
    pub(crate) fn invalid_argument(parameter: &str, value: impl ToString, reason: &str) -> Self {
        GeoError::InvalidArgument {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidArgument { parameter, value, reason } => {
                write!(f, "Invalid argument {} = {}: {}", parameter, value, reason)
            }
            GeoError::InvalidCoordinate { latitude, longitude } => {
                write!(f, "Invalid coordinate: lat={}, lon={}", latitude, longitude)
            }
        }
    }
}

impl std::error::Error for GeoError {}

/// Errors raised while decoding a probe snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Document is not valid JSON or not a list of probes
    Json { message: String },
    /// Snapshot file could not be read
    Io { message: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Json { message } => write!(f, "Probe snapshot is not valid: {}", message),
            ParseError::Io { message } => write!(f, "Probe snapshot I/O error: {}", message),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        ParseError::Json { message: error.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = GeoError::invalid_argument("radius_km", -1.0, "must be positive");
        assert_eq!(error.to_string(), "Invalid argument radius_km = -1: must be positive");
    }

    #[test]
    fn test_parse_error_from_json() {
        let json_error = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let error = ParseError::from(json_error);
        assert!(matches!(error, ParseError::Json { .. }));
    }
}
