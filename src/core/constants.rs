//! Physical constants and default parameters

/// Mean Earth radius used for all spherical computations (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of samples used for a circle when the caller has no preference
pub const DEFAULT_CIRCLE_POINTS: usize = 32;

/// Nearest probes averaged for a latency estimate
pub const DEFAULT_PROBE_SAMPLE: usize = 3;

/// Latency reported when no probe qualifies (ms). Not a measurement.
pub const FALLBACK_LATENCY_MS: f64 = 100.0;

/// Radius of the boundary overlay drawn around a cloud region (km)
pub const REGION_RADIUS_KM: f64 = 250.0;
