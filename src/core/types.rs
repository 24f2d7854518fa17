//! Core data types for the latency globe

use crate::validation::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point without range checks.
    ///
    /// Circle vertices are allowed to leave the [-180, 180] longitude band,
    /// so this constructor stays unchecked.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a point, rejecting non-finite or out-of-range coordinates
    pub fn try_new(latitude: f64, longitude: f64) -> GeoResult<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Ok(Self { latitude, longitude })
        } else {
            Err(GeoError::InvalidCoordinate { latitude, longitude })
        }
    }

    /// `[longitude, latitude]`, the GeoJSON position order
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Probe availability as reported by the probe source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProbeStatus {
    Ready,
    Other(String),
}

impl ProbeStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeStatus::Ready)
    }
}

impl From<String> for ProbeStatus {
    fn from(value: String) -> Self {
        if value == "ready" {
            ProbeStatus::Ready
        } else {
            ProbeStatus::Other(value)
        }
    }
}

impl From<&str> for ProbeStatus {
    fn from(value: &str) -> Self {
        ProbeStatus::from(value.to_string())
    }
}

impl From<ProbeStatus> for String {
    fn from(status: ProbeStatus) -> Self {
        match status {
            ProbeStatus::Ready => "ready".to_string(),
            ProbeStatus::Other(other) => other,
        }
    }
}

/// Network measurement probe snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub id: String,
    pub status: ProbeStatus,
    pub location: GeoPoint,
    pub round_trip_time_ms: f64,
}

impl Probe {
    pub fn new(id: impl Into<String>, status: ProbeStatus, location: GeoPoint, round_trip_time_ms: f64) -> Self {
        Self {
            id: id.into(),
            status,
            location,
            round_trip_time_ms,
        }
    }

    /// Ready and carrying a positive round-trip time
    pub fn is_usable(&self) -> bool {
        self.status.is_ready() && self.round_trip_time_ms > 0.0
    }
}

/// Hosting provider of a catalog location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    Colo,
}

impl Provider {
    pub const ALL: [Provider; 4] = [Provider::Aws, Provider::Gcp, Provider::Azure, Provider::Colo];

    /// Human-readable legend label
    pub fn label(self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Gcp => "GCP",
            Provider::Azure => "Azure",
            Provider::Colo => "Co-Location",
        }
    }

    /// Brand color as an `rgba(...)` string
    pub fn color(self, opacity: f64) -> String {
        let (r, g, b) = match self {
            Provider::Aws => (255, 153, 0),
            Provider::Gcp => (66, 133, 244),
            Provider::Azure => (0, 120, 212),
            Provider::Colo => (255, 0, 255),
        };
        format!("rgba({}, {}, {}, {})", r, g, b, opacity)
    }
}

/// Named location on the globe: a cloud region or an exchange site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub id: String,
    pub name: String,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub position: GeoPoint,
}

/// Latency cut-offs separating the color bands (ms)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyThresholds {
    pub low_ms: f64,
    pub high_ms: f64,
}

impl Default for LatencyThresholds {
    fn default() -> Self {
        Self {
            low_ms: 50.0,
            high_ms: 150.0,
        }
    }
}

/// Color band of a latency value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyBand {
    Low,
    Medium,
    High,
}

impl LatencyBand {
    /// Below `low_ms` is low, below `high_ms` is medium, anything else is high
    pub fn classify(latency_ms: f64, thresholds: &LatencyThresholds) -> Self {
        if latency_ms < thresholds.low_ms {
            LatencyBand::Low
        } else if latency_ms < thresholds.high_ms {
            LatencyBand::Medium
        } else {
            LatencyBand::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            LatencyBand::Low => "rgba(0, 255, 0, 0.7)",
            LatencyBand::Medium => "rgba(255, 255, 0, 0.7)",
            LatencyBand::High => "rgba(255, 0, 0, 0.7)",
        }
    }
}
