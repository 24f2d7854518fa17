//! Core geometric and aggregation algorithms

pub mod geodesic;
pub mod circle;
pub mod aggregator;

pub use geodesic::{destination_point, haversine_km, to_unit_vector};
pub use circle::{generate_circle, GeoCircle, Winding};
pub use aggregator::{
    estimate_latency, estimate_latency_detailed, nearest_probes, LatencyEstimate, ProbeLatencyAggregator,
};
