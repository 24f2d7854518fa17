//! Spherical geodesy helpers
//!
//! Everything here treats the Earth as a sphere of radius
//! [`EARTH_RADIUS_KM`]. Angles are taken and returned in degrees; the
//! trigonometry itself runs in radians.

use crate::core::{GeoPoint, EARTH_RADIUS_KM};
use nalgebra::Vector3;

/// Great-circle distance between two points using the haversine formula (km)
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Point reached by travelling `distance_km` from `origin` along `bearing_rad`
///
/// Bearing is measured clockwise from north. The longitude of the result is
/// not wrapped into [-180, 180]. At the poles the longitude is degenerate.
pub fn destination_point(origin: GeoPoint, bearing_rad: f64, distance_km: f64) -> GeoPoint {
    let delta = distance_km / EARTH_RADIUS_KM;
    let lat = origin.latitude.to_radians();
    let lng = origin.longitude.to_radians();

    let dest_lat = (lat.sin() * delta.cos() + lat.cos() * delta.sin() * bearing_rad.cos()).asin();
    let dest_lng = lng
        + (bearing_rad.sin() * delta.sin() * lat.cos())
            .atan2(delta.cos() - lat.sin() * dest_lat.sin());

    GeoPoint::new(dest_lat.to_degrees(), dest_lng.to_degrees())
}

/// Unit vector of a point on the sphere (x towards 0°E, z towards the north pole)
pub fn to_unit_vector(point: GeoPoint) -> Vector3<f64> {
    let lat = point.latitude.to_radians();
    let lon = point.longitude.to_radians();
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}
