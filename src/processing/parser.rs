//! Probe snapshot decoding
//!
//! Snapshots follow the public probe-list layout:
//!
//! ```json
//! [{ "status": "ready",
//!    "location": { "latitude": 51.5, "longitude": -0.12 },
//!    "stats": { "rtt": 12.4 } }]
//! ```
//!
//! Extra fields are ignored. Entries that fail to decode are skipped and
//! counted rather than failing the whole snapshot.

use crate::core::{GeoPoint, Probe, ProbeStatus};
use crate::validation::error::ParseError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RawProbe {
    #[serde(default)]
    id: Option<String>,
    status: String,
    location: RawLocation,
    #[serde(default)]
    stats: RawStats,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawStats {
    #[serde(default)]
    rtt: f64,
}

/// Decoded snapshot with the number of entries that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSnapshot {
    pub probes: Vec<Probe>,
    pub skipped: usize,
}

impl ProbeSnapshot {
    /// Probes that can contribute to a latency estimate
    pub fn usable(&self) -> impl Iterator<Item = &Probe> {
        self.probes.iter().filter(|p| p.is_usable())
    }
}

/// Decode a probe list from a JSON document
pub fn parse_probes(json: &str) -> Result<ProbeSnapshot, ParseError> {
    let document: Value = serde_json::from_str(json)?;
    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            return Err(ParseError::Json {
                message: format!("expected an array of probes, found {}", json_kind(&other)),
            })
        }
    };

    let mut probes = Vec::with_capacity(entries.len());
    let mut skipped = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawProbe>(entry) {
            Ok(raw) => {
                let id = raw.id.unwrap_or_else(|| format!("probe-{}", index));
                probes.push(Probe::new(
                    id,
                    ProbeStatus::from(raw.status),
                    GeoPoint::new(raw.location.latitude, raw.location.longitude),
                    raw.stats.rtt,
                ));
            }
            Err(e) => {
                warn!(index, error = %e, "skipping malformed probe entry");
                skipped += 1;
            }
        }
    }

    debug!(decoded = probes.len(), skipped, "parsed probe snapshot");
    Ok(ProbeSnapshot { probes, skipped })
}

/// Read and decode a probe snapshot file
pub fn load_probes<P: AsRef<Path>>(path: P) -> Result<ProbeSnapshot, ParseError> {
    let content = fs::read_to_string(&path).map_err(|e| ParseError::Io {
        message: format!("Failed to read '{}': {}", path.as_ref().display(), e),
    })?;
    parse_probes(&content)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"version": "0.28.0", "status": "ready",
         "location": {"continent": "EU", "city": "London", "latitude": 51.5, "longitude": -0.12},
         "stats": {"cpu": {"count": 4}, "rtt": 12.5}},
        {"status": "offline", "location": {"latitude": 40.7, "longitude": -74.0}, "stats": {"rtt": 8.0}},
        {"id": "tokyo-1", "status": "ready", "location": {"latitude": 35.7, "longitude": 139.7}},
        {"status": "ready", "location": {"latitude": "north"}},
        42
    ]"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_probes(SNAPSHOT).unwrap();
        assert_eq!(snapshot.probes.len(), 3);
        assert_eq!(snapshot.skipped, 2);

        let london = &snapshot.probes[0];
        assert_eq!(london.id, "probe-0");
        assert_eq!(london.status, ProbeStatus::Ready);
        assert_eq!(london.location, GeoPoint::new(51.5, -0.12));
        assert_eq!(london.round_trip_time_ms, 12.5);

        assert_eq!(snapshot.probes[1].status, ProbeStatus::Other("offline".to_string()));

        // Missing stats means no round-trip time
        let tokyo = &snapshot.probes[2];
        assert_eq!(tokyo.id, "tokyo-1");
        assert_eq!(tokyo.round_trip_time_ms, 0.0);
    }

    #[test]
    fn test_usable_probes() {
        let snapshot = parse_probes(SNAPSHOT).unwrap();
        let usable: Vec<_> = snapshot.usable().map(|p| p.id.clone()).collect();
        assert_eq!(usable, vec!["probe-0".to_string()]);
    }

    #[test]
    fn test_rejects_non_array_document() {
        let result = parse_probes(r#"{"status": "ready"}"#);
        assert!(matches!(result, Err(ParseError::Json { .. })));
        assert!(parse_probes("not json").is_err());
    }

    #[test]
    fn test_empty_array() {
        let snapshot = parse_probes("[]").unwrap();
        assert!(snapshot.probes.is_empty());
        assert_eq!(snapshot.skipped, 0);
    }

    #[test]
    fn test_missing_file() {
        let result = load_probes("/nonexistent/probes.json");
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
