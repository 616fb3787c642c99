use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comparison request as received from the request-handling layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin_port: String,
    pub destination_port: String,
    pub cargo_weight_kg: f64,
    pub cargo_value_usd: f64,
    #[serde(default)]
    pub hs_code: Option<String>,
    #[serde(default)]
    pub origin_location: Option<String>,
    #[serde(default)]
    pub destination_location: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl RouteRequest {
    /// Rejects requests that cannot be priced before any provider is touched.
    pub fn validate(&self) -> Result<(), RouteError> {
        if !self.cargo_weight_kg.is_finite() || self.cargo_weight_kg <= 0.0 {
            return Err(RouteError::InvalidInput(
                "cargo_weight_kg must be greater than zero".to_string(),
            ));
        }
        if !self.cargo_value_usd.is_finite() || self.cargo_value_usd <= 0.0 {
            return Err(RouteError::InvalidInput(
                "cargo_value_usd must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn weight_tons(&self) -> f64 {
        self.cargo_weight_kg / 1000.0
    }

    /// USD per kg, drives the tie-breaker weight profile.
    pub fn value_density(&self) -> f64 {
        self.cargo_value_usd / self.cargo_weight_kg
    }

    /// Free-text query for the origin: explicit location first, then the port field.
    /// Only consulted when the port field is not a known port code.
    pub fn origin_query(&self) -> &str {
        pick_query(self.origin_location.as_deref(), &self.origin_port)
    }

    pub fn destination_query(&self) -> &str {
        pick_query(self.destination_location.as_deref(), &self.destination_port)
    }
}

fn pick_query<'a>(location: Option<&'a str>, port: &'a str) -> &'a str {
    match location.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => port.trim(),
    }
}

/// A resolved coordinate. Lives only for the duration of one comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub country_code: Option<String>,
    /// Set when the point is, or snaps to, a port of the static table.
    pub port_code: Option<String>,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            label: label.into(),
            country_code: None,
            port_code: None,
        }
    }

    pub fn with_port_code(mut self, code: impl Into<String>) -> Self {
        self.port_code = Some(code.into());
        self
    }

    pub fn with_country(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    pub fn waypoint(&self, kind: WaypointKind) -> Waypoint {
        Waypoint {
            lat: self.lat,
            lon: self.lon,
            label: self.label.clone(),
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Origin,
    Gateway,
    Hub,
    Destination,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub kind: WaypointKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CongestionRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl CongestionRisk {
    /// Port utilisation buckets: above 82 % is high, above 62 % medium.
    pub fn from_utilization(percent: f64) -> Self {
        if percent > 82.0 {
            Self::High
        } else if percent > 62.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Road buckets from the average speed over the whole trip.
    pub fn from_average_speed(kmh: f64) -> Self {
        if kmh < 35.0 {
            Self::High
        } else if kmh < 55.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn ordinal(&self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Medium => 1.0,
            Self::High => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// One candidate route. Value object: never mutated after selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub carrier: String,
    pub transit_days: u32,
    pub cost_usd: f64,
    pub emissions_kg_co2: f64,
    pub congestion_risk: CongestionRisk,
    pub recommended: bool,
    pub savings: Option<f64>,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub origin: String,
    pub destination: String,
    pub routes: Vec<Route>,
    pub recommended_route_id: Option<String>,
}

impl ComparisonResponse {
    pub fn empty(request: &RouteRequest) -> Self {
        Self::from_routes(request, Vec::new())
    }

    pub fn from_routes(request: &RouteRequest, routes: Vec<Route>) -> Self {
        let recommended_route_id = routes
            .iter()
            .find(|route| route.recommended)
            .map(|route| route.id.clone());
        Self {
            origin: request.origin_port.clone(),
            destination: request.destination_port.clone(),
            routes,
            recommended_route_id,
        }
    }
}

/// Reported congestion for a single port.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortCongestion {
    pub port_code: String,
    pub name: String,
    pub utilization_percent: f64,
    pub avg_wait_days: f64,
    pub status: CongestionRisk,
}

impl PortCongestion {
    pub fn new(port_code: &str, name: &str, utilization_percent: f64, avg_wait_days: f64) -> Self {
        Self {
            port_code: port_code.to_string(),
            name: name.to_string(),
            utilization_percent,
            avg_wait_days,
            status: CongestionRisk::from_utilization(utilization_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(weight: f64, value: f64) -> RouteRequest {
        RouteRequest {
            origin_port: "CNSZX".to_string(),
            destination_port: "USLAX".to_string(),
            cargo_weight_kg: weight,
            cargo_value_usd: value,
            hs_code: None,
            origin_location: None,
            destination_location: None,
        }
    }

    #[test]
    fn rejects_non_positive_cargo() {
        assert!(request(0.0, 100.0).validate().is_err());
        assert!(request(10.0, -1.0).validate().is_err());
        assert!(request(f64::NAN, 100.0).validate().is_err());
        assert!(request(10.0, 100.0).validate().is_ok());
    }

    #[test]
    fn location_overrides_port_query() {
        let mut req = request(10.0, 100.0);
        assert_eq!(req.origin_query(), "CNSZX");
        req.origin_location = Some("  Dongguan ".to_string());
        assert_eq!(req.origin_query(), "Dongguan");
        req.origin_location = Some("   ".to_string());
        assert_eq!(req.origin_query(), "CNSZX");
    }

    #[test]
    fn utilization_buckets() {
        assert_eq!(CongestionRisk::from_utilization(85.0), CongestionRisk::High);
        assert_eq!(CongestionRisk::from_utilization(82.0), CongestionRisk::Medium);
        assert_eq!(CongestionRisk::from_utilization(68.0), CongestionRisk::Medium);
        assert_eq!(CongestionRisk::from_utilization(62.0), CongestionRisk::Low);
    }

    #[test]
    fn risk_serializes_uppercase() {
        let json = serde_json::to_string(&CongestionRisk::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }
}
