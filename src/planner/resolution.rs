//! Endpoint and gateway resolution.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::geo::distance_km;
use crate::domain::port_data::{find_port, nearest_port, port_by_code};
use crate::domain::GeoPoint;
use crate::infra::{Geocoder, ProviderError};

/// How far a geocoded seaport may be from the endpoint it serves.
pub const MAX_GATEWAY_DISTANCE_KM: f64 = 1200.0;
/// A geocoded gateway this close to a known port borrows its port code.
pub const PORT_SNAP_KM: f64 = 150.0;

#[derive(Debug, Error)]
pub enum ResolutionFailure {
    #[error("empty location query")]
    EmptyQuery,
    #[error("no geocoding results for {0:?}")]
    NoResults(String),
    #[error("geocoder failed for {query:?}: {source}")]
    Provider {
        query: String,
        #[source]
        source: ProviderError,
    },
}

/// Runs a provider call under `limit`; expiry becomes [`ProviderError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(limit)),
    }
}

/// Resolves an endpoint from its port field and free-text query.
///
/// A port field that is a known UN/LOCODE wins outright. Otherwise the query
/// is matched against the port table by name or alias, then handed to the
/// geocoder, whose top hit is used.
pub async fn resolve_endpoint(
    geocoder: &dyn Geocoder,
    timeout: Duration,
    port_code: &str,
    query: &str,
) -> Result<GeoPoint, ResolutionFailure> {
    if let Some(port) = port_by_code(port_code) {
        debug!(port = port.code, "resolved from port code");
        return Ok(port.to_point());
    }

    let query = query.trim();
    if query.is_empty() {
        return Err(ResolutionFailure::EmptyQuery);
    }

    if let Some(port) = find_port(query) {
        debug!(query, port = port.code, "resolved from port table");
        return Ok(port.to_point());
    }

    let hits = with_timeout(timeout, geocoder.search(query))
        .await
        .map_err(|source| ResolutionFailure::Provider {
            query: query.to_string(),
            source,
        })?;

    hits.first()
        .map(|hit| hit.to_point())
        .ok_or_else(|| ResolutionFailure::NoResults(query.to_string()))
}

/// Sea gateway serving `endpoint`. Never fails: the endpoint itself is the
/// last resort.
pub async fn nearest_sea_gateway(geocoder: &dyn Geocoder, timeout: Duration, endpoint: &GeoPoint) -> GeoPoint {
    if endpoint.port_code.is_some() {
        return endpoint.clone();
    }

    let queries = [
        format!("major seaport near {}", endpoint.label),
        format!("port of {}", endpoint.label),
    ];
    for query in &queries {
        match with_timeout(timeout, geocoder.search(query)).await {
            Ok(hits) => {
                let accepted = hits
                    .iter()
                    .map(|hit| hit.to_point())
                    .find(|point| distance_km(point, endpoint) <= MAX_GATEWAY_DISTANCE_KM);
                if let Some(point) = accepted {
                    debug!(endpoint = %endpoint.label, gateway = %point.label, "gateway from geocoder");
                    return tag_known_port(point);
                }
            }
            Err(err) => {
                warn!(provider = geocoder.name(), query = %query, error = %err, "gateway lookup degraded");
            }
        }
    }

    if let Some(port) = nearest_port(endpoint, MAX_GATEWAY_DISTANCE_KM) {
        debug!(endpoint = %endpoint.label, gateway = port.code, "gateway from port table");
        return port.to_point();
    }

    debug!(endpoint = %endpoint.label, "endpoint is its own gateway");
    endpoint.clone()
}

fn tag_known_port(point: GeoPoint) -> GeoPoint {
    match nearest_port(&point, PORT_SNAP_KM) {
        Some(port) if point.port_code.is_none() => point.with_port_code(port.code),
        _ => point,
    }
}

/// Points closer than a kilometre need no road leg between them.
pub fn same_place(a: &GeoPoint, b: &GeoPoint) -> bool {
    distance_km(a, b) < 1.0
}
