//! In-memory providers for driving the comparison service without a network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trade_route_compare::domain::GeoPoint;
use trade_route_compare::infra::{
    GeocodeHit, Geocoder, ProviderError, RoadPath, RoadRouteSet, RoadRouter, StaticCongestionTable,
};
use trade_route_compare::{RouteComparisonService, RouteRequest};

/// Answers exact (case-insensitive) queries from a table; everything else is a miss.
#[derive(Default)]
pub struct TableGeocoder {
    places: HashMap<String, GeocodeHit>,
    pub calls: AtomicUsize,
}

impl TableGeocoder {
    pub fn with_place(mut self, query: &str, lat: f64, lon: f64, display_name: &str, country: &str) -> Self {
        self.places.insert(
            query.to_ascii_lowercase(),
            GeocodeHit {
                lat,
                lon,
                display_name: display_name.to_string(),
                country_code: Some(country.to_string()),
            },
        );
        self
    }
}

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.places.get(&query.to_ascii_lowercase()).cloned().into_iter().collect())
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Road router that drives at a fixed speed along a fixed detour.
pub struct FixedSpeedRouter {
    pub speed_kmh: f64,
    pub detour: f64,
}

impl Default for FixedSpeedRouter {
    fn default() -> Self {
        Self {
            speed_kmh: 70.0,
            detour: 1.2,
        }
    }
}

#[async_trait]
impl RoadRouter for FixedSpeedRouter {
    async fn route(&self, from: &GeoPoint, to: &GeoPoint, max_paths: usize) -> Result<RoadRouteSet, ProviderError> {
        let km = trade_route_compare::domain::haversine_km(from.lat, from.lon, to.lat, to.lon) * self.detour;
        let paths = (0..max_paths.max(1))
            .map(|index| {
                let distance_km = km * (1.0 + index as f64 * 0.04);
                RoadPath {
                    distance_m: distance_km * 1000.0,
                    duration_s: distance_km / self.speed_kmh * 3600.0 * (1.0 + index as f64 * 0.02),
                    coordinates: vec![[from.lon, from.lat], [to.lon, to.lat]],
                }
            })
            .collect();
        Ok(RoadRouteSet {
            paths,
            snap_distances_m: vec![25.0, 40.0],
        })
    }

    fn name(&self) -> &str {
        "fixed-speed"
    }
}

/// Road router that always fails, like a provider with no route across an ocean.
pub struct FailingRouter;

#[async_trait]
impl RoadRouter for FailingRouter {
    async fn route(&self, _from: &GeoPoint, _to: &GeoPoint, _max_paths: usize) -> Result<RoadRouteSet, ProviderError> {
        Err(ProviderError::Api("NoRoute".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Road router that never answers within any sensible timeout.
pub struct StalledRouter;

#[async_trait]
impl RoadRouter for StalledRouter {
    async fn route(&self, _from: &GeoPoint, _to: &GeoPoint, _max_paths: usize) -> Result<RoadRouteSet, ProviderError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(RoadRouteSet::default())
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

pub fn service(geocoder: TableGeocoder, router: impl RoadRouter + 'static) -> RouteComparisonService {
    RouteComparisonService::new(Arc::new(geocoder), Arc::new(router), Arc::new(StaticCongestionTable::new()))
}

pub fn request(origin: &str, destination: &str, weight_kg: f64, value_usd: f64) -> RouteRequest {
    RouteRequest {
        origin_port: origin.to_string(),
        destination_port: destination.to_string(),
        cargo_weight_kg: weight_kg,
        cargo_value_usd: value_usd,
        hs_code: None,
        origin_location: None,
        destination_location: None,
    }
}

pub fn inland_geocoder() -> TableGeocoder {
    TableGeocoder::default()
        .with_place("Denver", 39.7392, -104.9903, "Denver, Colorado, United States", "us")
        .with_place("Chicago", 41.8781, -87.6298, "Chicago, Illinois, United States", "us")
        .with_place("Munich", 48.1351, 11.582, "Munich, Bavaria, Germany", "de")
        .with_place("Berlin", 52.52, 13.405, "Berlin, Germany", "de")
}
