//! Simulated pairwise latency and historical series
//!
//! Each ordered location pair gets a base latency drawn once in [5, 300) ms
//! and memoized in a [`BaseLatencyCache`] owned by the simulator. Individual
//! samples add up to ±15% jitter and never drop below 5 ms.

use crate::core::{LatencyBand, LatencyThresholds};
use crate::processing::cache::BaseLatencyCache;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const MIN_BASE_LATENCY_MS: f64 = 5.0;
const MAX_BASE_LATENCY_MS: f64 = 300.0;
const MIN_LATENCY_MS: f64 = 5.0;
/// Peak-to-peak jitter as a fraction of the base latency
const JITTER_FRACTION: f64 = 0.3;

/// Window covered by a historical series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::OneDay
    }
}

impl TimeRange {
    /// Parse a range label; anything unrecognised means 24h
    pub fn from_label(label: &str) -> Self {
        match label {
            "1h" => TimeRange::OneHour,
            "7d" => TimeRange::SevenDays,
            "30d" => TimeRange::ThirtyDays,
            _ => TimeRange::OneDay,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::OneDay => "24h",
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
        }
    }

    /// (total minutes, minutes between samples)
    pub fn span_and_step_minutes(self) -> (i64, i64) {
        match self {
            TimeRange::OneHour => (60, 1),
            TimeRange::OneDay => (24 * 60, 15),
            TimeRange::SevenDays => (7 * 24 * 60, 60),
            TimeRange::ThirtyDays => (30 * 24 * 60, 240),
        }
    }

    pub fn sample_count(self) -> usize {
        let (span, step) = self.span_and_step_minutes();
        (span / step) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    /// RFC 3339 timestamp, UTC, millisecond precision
    pub time: String,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// One simulated latency sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MockLatency {
    pub latency_ms: f64,
    pub band: LatencyBand,
}

pub struct LatencySimulator<R: Rng = StdRng> {
    rng: R,
    base_latencies: BaseLatencyCache,
    thresholds: LatencyThresholds,
}

impl LatencySimulator<StdRng> {
    /// Simulator seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible simulator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for LatencySimulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LatencySimulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            base_latencies: BaseLatencyCache::new(),
            thresholds: LatencyThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: LatencyThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn base_latencies(&self) -> &BaseLatencyCache {
        &self.base_latencies
    }

    /// Base latency of an ordered pair, drawn on first use
    pub fn base_latency(&mut self, from_id: &str, to_id: &str) -> f64 {
        let rng = &mut self.rng;
        self.base_latencies.get_or_insert_with(from_id, to_id, || {
            rng.gen_range(MIN_BASE_LATENCY_MS..MAX_BASE_LATENCY_MS)
        })
    }

    /// One jittered latency sample for the pair, rounded to 0.1 ms
    pub fn mock_latency(&mut self, from_id: &str, to_id: &str) -> MockLatency {
        let base = self.base_latency(from_id, to_id);
        let jitter = self.rng.gen_range(-0.5..0.5) * (base * JITTER_FRACTION);
        let latency = (base + jitter).max(MIN_LATENCY_MS);

        MockLatency {
            latency_ms: round_tenth(latency),
            band: LatencyBand::classify(latency, &self.thresholds),
        }
    }

    /// Evenly spaced samples ending one step before `now`, oldest first
    pub fn historical_data(
        &mut self,
        from_id: &str,
        to_id: &str,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Vec<HistoricalDataPoint> {
        let (span, step) = range.span_and_step_minutes();
        let mut data = Vec::with_capacity(range.sample_count());

        let mut minutes_ago = span;
        while minutes_ago > 0 {
            let timestamp = now - Duration::minutes(minutes_ago);
            let sample = self.mock_latency(from_id, to_id);
            data.push(HistoricalDataPoint {
                time: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                latency_ms: sample.latency_ms,
            });
            minutes_ago -= step;
        }
        data
    }
}

/// Min, max and mean of a series, each rounded to 0.1 ms; zeros when empty
pub fn calculate_stats(data: &[HistoricalDataPoint]) -> LatencyStats {
    if data.is_empty() {
        return LatencyStats::default();
    }

    let min = data.iter().map(|d| d.latency_ms).fold(f64::INFINITY, f64::min);
    let max = data.iter().map(|d| d.latency_ms).fold(f64::NEG_INFINITY, f64::max);
    let avg = data.iter().map(|d| d.latency_ms).sum::<f64>() / data.len() as f64;

    LatencyStats {
        min: round_tenth(min),
        max: round_tenth(max),
        avg: round_tenth(avg),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
