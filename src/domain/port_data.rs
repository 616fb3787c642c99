//! Read-only reference tables: known ports, transshipment hubs, congestion
//! readings and carrier reliability.

use super::entities::GeoPoint;
use super::geo::haversine_km;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub aliases: &'static [&'static str],
    pub is_hub: bool,
}

impl PortInfo {
    pub fn to_point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon, self.name)
            .with_country(self.country)
            .with_port_code(self.code)
    }

    fn matches_name(&self, query: &str) -> bool {
        self.name
            .split(',')
            .map(str::trim)
            .chain(self.aliases.iter().copied())
            .any(|candidate| candidate.eq_ignore_ascii_case(query))
    }
}

pub const PORTS: &[PortInfo] = &[
    PortInfo { code: "CNSZX", name: "Yantian, Shenzhen", country: "CN", lat: 22.5431, lon: 114.0579, aliases: &["Shenzhen"], is_hub: false },
    PortInfo { code: "CNSHA", name: "Shanghai", country: "CN", lat: 31.2304, lon: 121.4737, aliases: &[], is_hub: false },
    PortInfo { code: "SGSIN", name: "Singapore", country: "SG", lat: 1.2644, lon: 103.8222, aliases: &[], is_hub: true },
    PortInfo { code: "JPTYO", name: "Tokyo", country: "JP", lat: 35.6762, lon: 139.6503, aliases: &[], is_hub: false },
    PortInfo { code: "INNSA", name: "Nhava Sheva", country: "IN", lat: 18.95, lon: 72.95, aliases: &["Mumbai", "JNPT"], is_hub: false },
    PortInfo { code: "NLRTM", name: "Rotterdam", country: "NL", lat: 51.9244, lon: 4.4777, aliases: &[], is_hub: true },
    PortInfo { code: "DEHAM", name: "Hamburg", country: "DE", lat: 53.5461, lon: 9.9661, aliases: &[], is_hub: false },
    PortInfo { code: "ESBCN", name: "Barcelona", country: "ES", lat: 41.3851, lon: 2.1734, aliases: &[], is_hub: false },
    PortInfo { code: "USEWR", name: "Newark", country: "US", lat: 40.7357, lon: -74.1724, aliases: &["New York"], is_hub: false },
    PortInfo { code: "USLAX", name: "Los Angeles", country: "US", lat: 33.7701, lon: -118.1937, aliases: &[], is_hub: false },
    PortInfo { code: "USLGB", name: "Long Beach", country: "US", lat: 33.7544, lon: -118.2166, aliases: &[], is_hub: false },
    PortInfo { code: "AUMEL", name: "Melbourne", country: "AU", lat: -37.8136, lon: 144.9631, aliases: &[], is_hub: false },
    PortInfo { code: "BRSSZ", name: "Santos", country: "BR", lat: -23.9608, lon: -46.3336, aliases: &["Sao Paulo"], is_hub: false },
    PortInfo { code: "PAPAC", name: "Panama Canal", country: "PA", lat: 9.081, lon: -79.68, aliases: &["Panama"], is_hub: true },
    PortInfo { code: "AEJEA", name: "Jebel Ali", country: "AE", lat: 25.0657, lon: 55.1713, aliases: &["Dubai"], is_hub: true },
    PortInfo { code: "EGPSD", name: "Port Said", country: "EG", lat: 31.2653, lon: 32.3019, aliases: &["Suez"], is_hub: true },
];

/// Looks a port up by UN/LOCODE first, then by name segment or alias.
pub fn find_port(query: &str) -> Option<&'static PortInfo> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    PORTS
        .iter()
        .find(|port| port.code.eq_ignore_ascii_case(query))
        .or_else(|| PORTS.iter().find(|port| port.matches_name(query)))
}

pub fn port_by_code(code: &str) -> Option<&'static PortInfo> {
    PORTS.iter().find(|port| port.code.eq_ignore_ascii_case(code.trim()))
}

pub fn hubs() -> impl Iterator<Item = &'static PortInfo> {
    PORTS.iter().filter(|port| port.is_hub)
}

/// Closest known port within `max_km`, ties resolved by table order.
pub fn nearest_port(point: &GeoPoint, max_km: f64) -> Option<&'static PortInfo> {
    let mut best: Option<(&'static PortInfo, f64)> = None;
    for port in PORTS {
        let distance = haversine_km(point.lat, point.lon, port.lat, port.lon);
        if distance > max_km {
            continue;
        }
        if best.map(|(_, current)| distance < current).unwrap_or(true) {
            best = Some((port, distance));
        }
    }
    best.map(|(port, _)| port)
}

/// Utilisation and wait readings used by the static congestion source.
pub const CONGESTION_READINGS: &[(&str, f64, f64)] = &[
    ("USLAX", 85.0, 3.2),
    ("USLGB", 62.0, 1.1),
    ("CNSZX", 71.0, 0.5),
    ("CNSHA", 78.0, 1.8),
    ("SGSIN", 55.0, 0.3),
    ("NLRTM", 68.0, 0.8),
    ("DEHAM", 74.0, 1.4),
    ("AEJEA", 58.0, 0.6),
    ("PAPAC", 79.0, 2.1),
];

/// Used when a port has no reading or its source is unavailable.
pub const DEFAULT_UTILIZATION_PERCENT: f64 = 68.0;
pub const DEFAULT_WAIT_DAYS: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Carrier {
    pub name: &'static str,
    pub reliability: f64,
}

pub const DEFAULT_RELIABILITY: f64 = 0.85;

pub const CARRIERS: &[Carrier] = &[
    Carrier { name: "Maersk", reliability: 0.90 },
    Carrier { name: "Evergreen", reliability: 0.88 },
    Carrier { name: "MSC", reliability: 0.82 },
    Carrier { name: "COSCO", reliability: 0.85 },
    Carrier { name: "CMA CGM", reliability: 0.86 },
    Carrier { name: "Cathay Cargo", reliability: 0.87 },
    Carrier { name: "DHL Aviation", reliability: 0.93 },
    Carrier { name: "Regional Trucking", reliability: 0.84 },
];

pub fn carrier_reliability(name: &str) -> f64 {
    CARRIERS
        .iter()
        .find(|carrier| carrier.name == name)
        .map(|carrier| carrier.reliability)
        .unwrap_or(DEFAULT_RELIABILITY)
}
