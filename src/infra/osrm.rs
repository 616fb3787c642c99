//! Road routing against an OSRM-compatible `/route/v1/driving` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::provider::{ProviderError, RoadPath, RoadRouteSet, RoadRouter};
use super::{base_url, fetch_json};
use crate::domain::GeoPoint;

pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org/";

#[derive(Clone)]
pub struct OsrmClient {
    http: Client,
    base_url: Url,
    profile: String,
}

impl OsrmClient {
    pub fn with_base_url(base: &str, user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let base_url = base_url(base)?;
        let http = Client::builder().user_agent(user_agent).timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            profile: "driving".to_string(),
        })
    }

    fn route_url(&self, from: &GeoPoint, to: &GeoPoint, max_paths: usize) -> Result<Url, ProviderError> {
        let path = format!(
            "route/v1/{}/{},{};{},{}",
            self.profile, from.lon, from.lat, to.lon, to.lat
        );
        // OSRM counts alternatives on top of the main route.
        let alternatives = if max_paths > 1 {
            (max_paths - 1).to_string()
        } else {
            "false".to_string()
        };
        let mut url = self.base_url.join(&path)?;
        url.query_pairs_mut()
            .append_pair("alternatives", &alternatives)
            .append_pair("overview", "simplified")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

#[async_trait]
impl RoadRouter for OsrmClient {
    async fn route(&self, from: &GeoPoint, to: &GeoPoint, max_paths: usize) -> Result<RoadRouteSet, ProviderError> {
        let url = self.route_url(from, to, max_paths)?;
        debug!(%url, "road routing request");

        let envelope: RouteEnvelope = fetch_json(self.http.get(url)).await?;
        if !envelope.code.eq_ignore_ascii_case("ok") {
            return Err(ProviderError::Api(envelope.message.unwrap_or(envelope.code)));
        }
        Ok(RoadRouteSet::from(envelope))
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

#[derive(Debug, Deserialize)]
struct RouteEnvelope {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteDto>,
    #[serde(default)]
    waypoints: Vec<WaypointDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<GeometryDto>,
}

#[derive(Debug, Deserialize)]
struct GeometryDto {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct WaypointDto {
    #[serde(default)]
    distance: Option<f64>,
}

impl From<RouteEnvelope> for RoadRouteSet {
    fn from(envelope: RouteEnvelope) -> Self {
        Self {
            paths: envelope
                .routes
                .into_iter()
                .map(|route| RoadPath {
                    distance_m: route.distance,
                    duration_s: route.duration,
                    coordinates: route.geometry.map(|g| g.coordinates).unwrap_or_default(),
                })
                .collect(),
            snap_distances_m: envelope
                .waypoints
                .into_iter()
                .map(|waypoint| waypoint.distance.unwrap_or(0.0))
                .collect(),
        }
    }
}
