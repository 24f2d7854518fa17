//! Geodesic circle polygons
//!
//! A geodesic circle is approximated by sampling destination points at evenly
//! spaced bearings around a center and closing the ring with a copy of the
//! first vertex, which is what polygon renderers expect.
//!
//! Known limitation: a center on a pole (latitude ±90°) makes every vertex
//! longitude degenerate. This is left unguarded.

use crate::algorithms::geodesic::{destination_point, to_unit_vector};
use crate::core::GeoPoint;
use crate::validation::error::{GeoError, GeoResult};
use serde::{Serialize, Serializer};
use std::f64::consts::PI;

/// Orientation of a ring seen from outside the sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    Degenerate,
}

/// Closed ring of vertices around a center point
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCircle {
    center: GeoPoint,
    radius_km: f64,
    points: Vec<GeoPoint>,
}

impl GeoCircle {
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Vertices including the closing duplicate
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct samples (ring length minus the closing vertex)
    pub fn sample_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Ring as `[longitude, latitude]` pairs
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| p.to_lng_lat()).collect()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Orientation of the ring around its own center.
    ///
    /// Sums the triple products `n · (p_i × p_{i+1})` over all edges, where
    /// `n` is the center's unit vector. Rings generated by increasing bearing
    /// (north, east, south, west) come out clockwise.
    pub fn winding(&self) -> Winding {
        let normal = to_unit_vector(self.center);
        let vectors: Vec<_> = self.points.iter().map(|p| to_unit_vector(*p)).collect();
        let signed: f64 = vectors
            .windows(2)
            .map(|edge| normal.dot(&edge[0].cross(&edge[1])))
            .sum();

        if signed.abs() < 1e-15 {
            Winding::Degenerate
        } else if signed < 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

impl Serialize for GeoCircle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.coordinates().serialize(serializer)
    }
}

/// Generate a closed polygon approximating a circle of `radius_km` around `center`.
///
/// Returns `point_count + 1` vertices: one per bearing `i * 2π / point_count`
/// followed by a copy of the first. Longitudes are not normalized.
pub fn generate_circle(center: GeoPoint, radius_km: f64, point_count: usize) -> GeoResult<GeoCircle> {
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(GeoError::invalid_argument(
            "radius_km",
            radius_km,
            "radius must be a positive, finite number of kilometers",
        ));
    }
    if point_count < 3 {
        return Err(GeoError::invalid_argument(
            "point_count",
            point_count,
            "at least 3 points are needed to form a polygon",
        ));
    }

    let mut points = Vec::with_capacity(point_count + 1);
    for i in 0..point_count {
        let bearing = (i as f64 * 2.0 * PI) / point_count as f64;
        points.push(destination_point(center, bearing, radius_km));
    }
    points.push(points[0]);

    Ok(GeoCircle {
        center,
        radius_km,
        points,
    })
}
