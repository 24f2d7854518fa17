use crate::algorithms::circle::{generate_circle, GeoCircle};
use crate::core::GeoPoint;
use crate::validation::error::GeoResult;
use std::collections::HashMap;
use tracing::debug;

/// Exact identity of a generated circle.
///
/// Coordinates are keyed by bit pattern: generation is deterministic, so only
/// identical inputs may share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CircleKey {
    latitude_bits: u64,
    longitude_bits: u64,
    radius_bits: u64,
    point_count: usize,
}

impl CircleKey {
    fn new(center: GeoPoint, radius_km: f64, point_count: usize) -> Self {
        Self {
            latitude_bits: center.latitude.to_bits(),
            longitude_bits: center.longitude.to_bits(),
            radius_bits: radius_km.to_bits(),
            point_count,
        }
    }
}

/// Caller-owned cache of generated circles
pub struct CircleCache {
    circles: HashMap<CircleKey, GeoCircle>,
    /// Entry limit; the cache is emptied when an insert would exceed it
    max_entries: usize,
    hit_count: usize,
    miss_count: usize,
}

impl Default for CircleCache {
    fn default() -> Self {
        Self {
            circles: HashMap::new(),
            max_entries: 1024,
            hit_count: 0,
            miss_count: 0,
        }
    }
}

impl CircleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            ..Self::default()
        }
    }

    /// Return the cached circle for these inputs, generating it on a miss.
    ///
    /// Invalid arguments are reported on every call and never cached.
    pub fn get_or_generate(&mut self, center: GeoPoint, radius_km: f64, point_count: usize) -> GeoResult<&GeoCircle> {
        let key = CircleKey::new(center, radius_km, point_count);

        if self.circles.contains_key(&key) {
            self.hit_count += 1;
        } else {
            self.miss_count += 1;
            let circle = generate_circle(center, radius_km, point_count)?;
            if self.circles.len() >= self.max_entries {
                debug!(entries = self.circles.len(), "circle cache full, clearing");
                self.circles.clear();
            }
            self.circles.insert(key, circle);
        }

        Ok(&self.circles[&key])
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// (hits, misses, hit rate)
    pub fn get_statistics(&self) -> (usize, usize, f64) {
        hit_statistics(self.hit_count, self.miss_count)
    }

    pub fn clear(&mut self) {
        self.circles.clear();
    }
}

/// Caller-owned memo of per-pair base latencies for the simulator
#[derive(Debug, Default)]
pub struct BaseLatencyCache {
    base_latencies: HashMap<String, f64>,
    hit_count: usize,
    miss_count: usize,
}

impl BaseLatencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directional key; `a -> b` and `b -> a` are distinct pairs
    fn pair_key(from_id: &str, to_id: &str) -> String {
        format!("{}_{}", from_id, to_id)
    }

    pub fn get(&self, from_id: &str, to_id: &str) -> Option<f64> {
        self.base_latencies.get(&Self::pair_key(from_id, to_id)).copied()
    }

    /// Cached base latency for the pair, computing it with `init` on first use
    pub fn get_or_insert_with<F: FnOnce() -> f64>(&mut self, from_id: &str, to_id: &str, init: F) -> f64 {
        let key = Self::pair_key(from_id, to_id);
        if let Some(&base) = self.base_latencies.get(&key) {
            self.hit_count += 1;
            return base;
        }

        self.miss_count += 1;
        let base = init();
        self.base_latencies.insert(key, base);
        base
    }

    pub fn len(&self) -> usize {
        self.base_latencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_latencies.is_empty()
    }

    /// (hits, misses, hit rate)
    pub fn get_statistics(&self) -> (usize, usize, f64) {
        hit_statistics(self.hit_count, self.miss_count)
    }

    pub fn clear(&mut self) {
        self.base_latencies.clear();
    }
}

fn hit_statistics(hits: usize, misses: usize) -> (usize, usize, f64) {
    let total = hits + misses;
    let hit_rate = if total > 0 {
        hits as f64 / total as f64
    } else {
        0.0
    };
    (hits, misses, hit_rate)
}
