//! HTTP clients against a local mock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trade_route_compare::domain::GeoPoint;
use trade_route_compare::infra::{Geocoder, NominatimClient, OsrmClient, ProviderError, RoadRouter};

const AGENT: &str = "trade-routes-tests";

fn nominatim(server: &MockServer) -> NominatimClient {
    NominatimClient::with_base_url(&server.uri(), AGENT, Duration::from_secs(2)).unwrap()
}

fn osrm(server: &MockServer) -> OsrmClient {
    OsrmClient::with_base_url(&server.uri(), AGENT, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn nominatim_parses_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Hamburg"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "lat": "53.5503",
                "lon": "10.0007",
                "display_name": "Hamburg, Germany",
                "address": { "country_code": "de" }
            },
            {
                "lat": 53.6,
                "lon": 9.9,
                "display_name": "Hamburg-Altona, Hamburg, Germany"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let hits = nominatim(&server).with_limit(3).search("Hamburg").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].label(), "Hamburg");
    assert!((hits[0].lat - 53.5503).abs() < 1e-9);
    assert_eq!(hits[0].to_point().country_code.as_deref(), Some("DE"));
    assert_eq!(hits[1].country_code, None);
}

#[tokio::test]
async fn nominatim_empty_result_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(nominatim(&server).search("Atlantis").await.unwrap().is_empty());
}

#[tokio::test]
async fn nominatim_server_error_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = nominatim(&server).search("Hamburg").await;
    assert!(matches!(result, Err(ProviderError::Http(_))));
}

#[tokio::test]
async fn nominatim_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let result = nominatim(&server).search("Hamburg").await;
    assert!(matches!(result, Err(ProviderError::Decode(_))));
}

#[tokio::test]
async fn osrm_returns_alternatives_and_snaps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/route/v1/driving/11.582,48.1351;13.405,52.52"))
        .and(query_param("alternatives", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [
                { "distance": 584000.0, "duration": 20880.0, "geometry": { "coordinates": [[11.58, 48.13], [13.40, 52.52]] } },
                { "distance": 601000.0, "duration": 21600.0 }
            ],
            "waypoints": [ { "distance": 12.4 }, { "distance": 3.1 } ]
        })))
        .mount(&server)
        .await;

    let munich = GeoPoint::new(48.1351, 11.582, "Munich");
    let berlin = GeoPoint::new(52.52, 13.405, "Berlin");
    let set = osrm(&server).route(&munich, &berlin, 3).await.unwrap();

    assert_eq!(set.paths.len(), 2);
    assert!(set.has_valid_snap());
    let legs = set.legs();
    // The second path carries no geometry.
    assert_eq!(legs.len(), 1);
    assert!((legs[0].distance_km - 584.0).abs() < 1e-9);
    assert!((legs[0].duration_hours - 5.8).abs() < 1e-9);
    assert!(set.paths[1].coordinates.is_empty());
}

#[tokio::test]
async fn osrm_no_route_code_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "NoRoute",
            "message": "Impossible route between points",
            "routes": []
        })))
        .mount(&server)
        .await;

    let shenzhen = GeoPoint::new(22.5431, 114.0579, "Shenzhen");
    let los_angeles = GeoPoint::new(33.7701, -118.1937, "Los Angeles");
    let result = osrm(&server).route(&shenzhen, &los_angeles, 1).await;
    match result {
        Err(ProviderError::Api(message)) => assert_eq!(message, "Impossible route between points"),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn osrm_far_snap_yields_no_legs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [ { "distance": 90000.0, "duration": 4000.0 } ],
            "waypoints": [ { "distance": 72000.0 }, { "distance": 5.0 } ]
        })))
        .mount(&server)
        .await;

    let island = GeoPoint::new(-20.0, -140.0, "Open ocean");
    let coast = GeoPoint::new(-17.5, -149.5, "Papeete");
    let set = osrm(&server).route(&island, &coast, 1).await.unwrap();
    assert!(!set.has_valid_snap());
    assert!(set.legs().is_empty());
}
