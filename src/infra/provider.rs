//! Contracts for the external data sources the planner talks to.
//!
//! Each provider returns typed values or a [`ProviderError`]; the planner
//! decides which fallback applies, providers never substitute defaults.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{GeoPoint, PortCongestion, RoadLeg};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("no data for {0}")]
    NotFound(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// One free-text geocoding result.
#[derive(Clone, Debug, PartialEq)]
pub struct GeocodeHit {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
    pub country_code: Option<String>,
}

impl GeocodeHit {
    /// Short label: the first comma-separated segment of the display name.
    pub fn label(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .unwrap_or(self.display_name.as_str())
    }

    pub fn to_point(&self) -> GeoPoint {
        let point = GeoPoint::new(self.lat, self.lon, self.label());
        match &self.country_code {
            Some(code) => point.with_country(code.to_ascii_uppercase()),
            None => point,
        }
    }
}

/// A single routed road path.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadPath {
    pub distance_m: f64,
    pub duration_s: f64,
    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Road router answer: alternatives plus how far each query point had to be
/// moved to reach the network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoadRouteSet {
    pub paths: Vec<RoadPath>,
    pub snap_distances_m: Vec<f64>,
}

/// Snapping further than this means the coordinate is not on a road network.
pub const MAX_SNAP_DISTANCE_M: f64 = 50_000.0;

impl RoadRouteSet {
    pub fn has_valid_snap(&self) -> bool {
        self.snap_distances_m
            .iter()
            .all(|distance| distance.is_finite() && *distance <= MAX_SNAP_DISTANCE_M)
    }

    /// Paths with a geometry and a positive length, as road legs. Empty when
    /// the snap is implausible.
    pub fn legs(&self) -> Vec<RoadLeg> {
        if !self.has_valid_snap() {
            return Vec::new();
        }
        self.paths
            .iter()
            .filter(|path| !path.coordinates.is_empty())
            .filter(|path| path.distance_m.is_finite() && path.duration_s.is_finite() && path.distance_m > 0.0)
            .map(|path| RoadLeg {
                distance_km: path.distance_m / 1000.0,
                duration_hours: path.duration_s / 3600.0,
            })
            .collect()
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, ProviderError>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait RoadRouter: Send + Sync {
    /// Up to `max_paths` paths, main route first.
    async fn route(&self, from: &GeoPoint, to: &GeoPoint, max_paths: usize) -> Result<RoadRouteSet, ProviderError>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait CongestionSource: Send + Sync {
    async fn congestion(&self, port_code: &str) -> Result<PortCongestion, ProviderError>;

    async fn all_ports(&self) -> Result<Vec<PortCongestion>, ProviderError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_first_segment() {
        let hit = GeocodeHit {
            lat: 1.0,
            lon: 2.0,
            display_name: "Hamburg, Germany".to_string(),
            country_code: Some("de".to_string()),
        };
        assert_eq!(hit.label(), "Hamburg");
        let point = hit.to_point();
        assert_eq!(point.country_code.as_deref(), Some("DE"));
        assert!(point.port_code.is_none());
    }

    #[test]
    fn far_snap_discards_paths() {
        let path = RoadPath {
            distance_m: 10_000.0,
            duration_s: 600.0,
            coordinates: vec![[13.4, 52.5], [13.5, 52.6]],
        };
        let bare = RoadPath {
            coordinates: Vec::new(),
            ..path.clone()
        };
        let mut set = RoadRouteSet {
            paths: vec![path, bare],
            snap_distances_m: vec![12.0, 80.0],
        };
        assert_eq!(set.legs().len(), 1);
        assert!((set.legs()[0].duration_hours - 1.0 / 6.0).abs() < 1e-9);

        set.snap_distances_m[1] = 75_000.0;
        assert!(set.legs().is_empty());
    }
}
