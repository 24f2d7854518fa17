//! Exchange Latency Globe
//!
//! Geodesic boundary circles and nearest-probe latency estimates for cloud
//! regions and exchange colocation sites, plus the overlay records a globe
//! renderer draws from them.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use self::core::{GeoPoint, LatencyBand, LatencyThresholds, LocationPoint, Probe, ProbeStatus, Provider};
pub use self::core::{DEFAULT_CIRCLE_POINTS, DEFAULT_PROBE_SAMPLE, EARTH_RADIUS_KM, FALLBACK_LATENCY_MS, REGION_RADIUS_KM};
pub use algorithms::{
    estimate_latency, estimate_latency_detailed, generate_circle, haversine_km, GeoCircle, LatencyEstimate,
    ProbeLatencyAggregator, Winding,
};
pub use processing::{parse_probes, CircleCache, LatencySimulator, ProbeSnapshot, TimeRange};
pub use validation::{GeoError, GeoResult, ParseError};
pub use utils::{ConfigError, ConfigurationManager, DashboardConfig};
pub use api::{build_overlays, GlobeOverlays, LocationFilter};
