//! Great-circle helpers.

use super::entities::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line detour applied when no road network answer is available.
pub const ROAD_DETOUR_FACTOR: f64 = 1.25;

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = ((d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2)).min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_km(a.lat, a.lon, b.lat, b.lon)
}

pub fn road_fallback_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    distance_km(a, b) * ROAD_DETOUR_FACTOR
}
