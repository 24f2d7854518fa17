//! Nearest-probe latency estimation
//!
//! A location's latency is estimated as the mean round-trip time of the
//! probes closest to it by great-circle distance. Only probes that are ready
//! and report a positive round-trip time take part.

use crate::algorithms::geodesic::haversine_km;
use crate::core::{GeoPoint, Probe, DEFAULT_PROBE_SAMPLE, FALLBACK_LATENCY_MS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a latency estimate that keeps "no data" distinct from a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LatencyEstimate {
    Measured { value_ms: f64, samples: usize },
    NoData,
}

impl LatencyEstimate {
    pub fn is_measured(&self) -> bool {
        matches!(self, LatencyEstimate::Measured { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            LatencyEstimate::Measured { value_ms, .. } => Some(*value_ms),
            LatencyEstimate::NoData => None,
        }
    }

    /// Collapse to a plain number, substituting `fallback_ms` for no data
    pub fn or_fallback(&self, fallback_ms: f64) -> f64 {
        self.value().unwrap_or(fallback_ms)
    }
}

/// Usable probes ordered by distance to `target`, nearest first.
///
/// The sort is stable, so probes at equal distance keep their input order.
pub fn nearest_probes<'a>(target: GeoPoint, probes: &'a [Probe]) -> Vec<(&'a Probe, f64)> {
    let mut ranked: Vec<(&Probe, f64)> = probes
        .iter()
        .filter(|probe| probe.is_usable())
        .map(|probe| (probe, haversine_km(target, probe.location)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// Mean round-trip time of the `sample_size` nearest usable probes
pub fn estimate_latency_detailed(target: GeoPoint, probes: &[Probe], sample_size: usize) -> LatencyEstimate {
    let ranked = nearest_probes(target, probes);
    let nearest = &ranked[..sample_size.min(ranked.len())];

    if nearest.is_empty() {
        return LatencyEstimate::NoData;
    }

    let total: f64 = nearest.iter().map(|(probe, _)| probe.round_trip_time_ms).sum();
    LatencyEstimate::Measured {
        value_ms: total / nearest.len() as f64,
        samples: nearest.len(),
    }
}

/// Mean round-trip time of the nearest probes, or [`FALLBACK_LATENCY_MS`]
/// when no probe qualifies. The fallback is a sentinel, not a measurement;
/// use [`estimate_latency_detailed`] to tell the two apart.
pub fn estimate_latency(target: GeoPoint, probes: &[Probe], sample_size: usize) -> f64 {
    let estimate = estimate_latency_detailed(target, probes, sample_size);
    if !estimate.is_measured() {
        debug!(%target, probe_count = probes.len(), "no usable probes, using fallback latency");
    }
    estimate.or_fallback(FALLBACK_LATENCY_MS)
}

/// Latency estimator with a configured sample size and fallback value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeLatencyAggregator {
    sample_size: usize,
    fallback_ms: f64,
}

impl Default for ProbeLatencyAggregator {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_PROBE_SAMPLE,
            fallback_ms: FALLBACK_LATENCY_MS,
        }
    }
}

impl ProbeLatencyAggregator {
    pub fn new(sample_size: usize, fallback_ms: f64) -> Self {
        Self { sample_size, fallback_ms }
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn fallback_ms(&self) -> f64 {
        self.fallback_ms
    }

    pub fn estimate(&self, target: GeoPoint, probes: &[Probe]) -> f64 {
        self.estimate_detailed(target, probes).or_fallback(self.fallback_ms)
    }

    pub fn estimate_detailed(&self, target: GeoPoint, probes: &[Probe]) -> LatencyEstimate {
        estimate_latency_detailed(target, probes, self.sample_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProbeStatus;

    fn ready(id: &str, lat: f64, lon: f64, rtt: f64) -> Probe {
        Probe::new(id, ProbeStatus::Ready, GeoPoint::new(lat, lon), rtt)
    }

    #[test]
    fn test_empty_probe_list_returns_fallback() {
        assert_eq!(estimate_latency(GeoPoint::new(0.0, 0.0), &[], 3), 100.0);
        assert_eq!(estimate_latency(GeoPoint::new(-45.0, 170.0), &[], 3), 100.0);
        assert_eq!(
            estimate_latency_detailed(GeoPoint::new(0.0, 0.0), &[], 3),
            LatencyEstimate::NoData
        );
    }

    #[test]
    fn test_farthest_probe_is_excluded() {
        let target = GeoPoint::new(0.0, 0.0);
        let probes = vec![
            ready("far", 0.0, 40.0, 1000.0),
            ready("mid", 0.0, 2.0, 20.0),
            ready("near", 0.0, 1.0, 10.0),
            ready("third", 0.0, 3.0, 30.0),
        ];
        assert_eq!(estimate_latency(target, &probes, 3), 20.0);
    }

    #[test]
    fn test_disqualified_nearest_probe_is_skipped() {
        let target = GeoPoint::new(51.5, 0.0);
        let probes = vec![
            Probe::new("offline", ProbeStatus::Other("offline".into()), GeoPoint::new(51.5, 0.0), 1.0),
            ready("zero-rtt", 51.5, 0.01, 0.0),
            ready("negative", 51.5, 0.02, -4.0),
            ready("valid", 48.8, 2.3, 12.0),
        ];
        let estimate = estimate_latency_detailed(target, &probes, 3);
        assert_eq!(estimate, LatencyEstimate::Measured { value_ms: 12.0, samples: 1 });
    }

    #[test]
    fn test_only_disqualified_probes_falls_back() {
        let probes = vec![Probe::new("x", "unbuffer".into(), GeoPoint::new(0.0, 0.0), 30.0)];
        assert_eq!(estimate_latency(GeoPoint::new(0.0, 0.0), &probes, 3), 100.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let target = GeoPoint::new(0.0, 0.0);
        let probes = vec![
            ready("first", 0.0, 1.0, 10.0),
            ready("second", 0.0, -1.0, 50.0),
            ready("third", 1.0, 0.0, 90.0),
        ];
        let ranked = nearest_probes(target, &probes);
        let ids: Vec<&str> = ranked.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert_eq!(estimate_latency(target, &probes, 1), 10.0);
    }

    #[test]
    fn test_fewer_probes_than_sample_size() {
        let probes = vec![ready("a", 10.0, 10.0, 40.0), ready("b", 11.0, 11.0, 60.0)];
        assert_eq!(estimate_latency(GeoPoint::new(10.0, 10.0), &probes, 5), 50.0);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let probes = vec![ready("b", 0.0, 5.0, 20.0), ready("a", 0.0, 1.0, 10.0)];
        let before = probes.clone();
        let _ = estimate_latency(GeoPoint::new(0.0, 0.0), &probes, 3);
        assert_eq!(probes, before);
    }

    #[test]
    fn test_aggregator_uses_configured_fallback() {
        let aggregator = ProbeLatencyAggregator::new(2, 250.0);
        assert_eq!(aggregator.estimate(GeoPoint::new(0.0, 0.0), &[]), 250.0);

        let zero_sample = ProbeLatencyAggregator::new(0, 100.0);
        let probes = vec![ready("a", 0.0, 0.0, 5.0)];
        assert_eq!(zero_sample.estimate_detailed(GeoPoint::new(0.0, 0.0), &probes), LatencyEstimate::NoData);
    }
}
