//! Candidate route generation.
//!
//! Everything here is pure arithmetic over inputs the planner has already
//! resolved (endpoints, gateways, road answers, congestion readings), so the
//! same inputs always produce the same candidate list.

use std::collections::HashSet;

use super::emissions::{calculate_emissions, TransportMode};
use super::entities::{
    CongestionRisk, GeoPoint, PortCongestion, Route, RouteRequest, Waypoint, WaypointKind,
};
use super::geo::{distance_km, road_fallback_km};
use super::port_data::{hubs, PortInfo, DEFAULT_UTILIZATION_PERCENT, DEFAULT_WAIT_DAYS};

const ROAD_RATE_PER_TON_KM: f64 = 0.11;
const ROAD_BASE_FEE: f64 = 120.0;
const ROAD_FALLBACK_SPEED_KMH: f64 = 60.0;
const DRIVING_HOURS_PER_DAY: f64 = 10.0;
const ROAD_COST_MULTIPLIERS: [f64; 4] = [1.09, 1.00, 0.93, 0.88];
const ROAD_SERVICE_LABELS: [&str; 3] = ["fastest", "balanced", "economy"];

const SEA_BASE_FEE: f64 = 350.0;
const OCEAN_KM_PER_DAY: f64 = 650.0;
const CONGESTION_FEE_PER_TON_DAY: f64 = 35.0;

const DIRECT_OCEAN_RATE: f64 = 0.035;
const DIRECT_OCEAN_DETOUR: f64 = 1.18;
const HUB_OCEAN_RATE: f64 = 0.028;
const HUB_OCEAN_DETOUR: f64 = 1.16;
const HUB_HANDLING_FEE: f64 = 180.0;
const HUB_EXTRA_DAYS: f64 = 1.5;
const HUB_MAX_DETOUR_RATIO: f64 = 1.6;

const MULTIMODAL_OCEAN_RATE: f64 = 0.032;
const MULTIMODAL_OCEAN_DETOUR: f64 = 1.22;
const MULTIMODAL_AIR_DETOUR: f64 = 1.05;
const MULTIMODAL_TRANSFER_FEE: f64 = 220.0;
const MULTIMODAL_TRANSFER_DAYS: f64 = 1.0;

/// Two points closer than this are treated as the same place.
pub const SAME_PLACE_KM: f64 = 50.0;
const MIN_AIR_DISTANCE_KM: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct AirTier {
    id: &'static str,
    name: &'static str,
    carrier: &'static str,
    base_fee: f64,
    rate_per_ton_km: f64,
    detour: f64,
    handling_days: f64,
    km_per_day: f64,
}

const AIR_ECONOMY: AirTier = AirTier {
    id: "air_economy",
    name: "Air Freight Economy",
    carrier: "Cathay Cargo",
    base_fee: 150.0,
    rate_per_ton_km: 0.38,
    detour: 1.08,
    handling_days: 2.0,
    km_per_day: 6000.0,
};

const AIR_EXPRESS: AirTier = AirTier {
    id: "air_express",
    name: "Express Air Freight",
    carrier: "DHL Aviation",
    base_fee: 250.0,
    rate_per_ton_km: 0.62,
    detour: 1.03,
    handling_days: 0.75,
    km_per_day: 9000.0,
};

/// A road answer for one pair of points, either routed or estimated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadLeg {
    pub distance_km: f64,
    pub duration_hours: f64,
}

impl RoadLeg {
    pub const ZERO: RoadLeg = RoadLeg {
        distance_km: 0.0,
        duration_hours: 0.0,
    };

    /// Straight-line estimate with the fixed detour factor.
    pub fn estimate(from: &GeoPoint, to: &GeoPoint) -> Self {
        let distance_km = road_fallback_km(from, to);
        Self {
            distance_km,
            duration_hours: distance_km / ROAD_FALLBACK_SPEED_KMH,
        }
    }

    fn days(&self) -> f64 {
        self.duration_hours / DRIVING_HOURS_PER_DAY
    }

    fn cost(&self, tons: f64) -> f64 {
        tons * self.distance_km * ROAD_RATE_PER_TON_KM
    }

    fn emissions(&self, weight_kg: f64) -> f64 {
        calculate_emissions(weight_kg, TransportMode::Truck, Some(self.distance_km))
    }
}

/// A sea gateway together with the congestion reading used for it.
#[derive(Clone, Debug, PartialEq)]
pub struct PortStop {
    pub point: GeoPoint,
    pub congestion: PortCongestion,
}

impl PortStop {
    pub fn new(point: GeoPoint, congestion: PortCongestion) -> Self {
        Self { point, congestion }
    }

    /// Gateway with the default 68 % / 1.2 day reading.
    pub fn with_default_congestion(point: GeoPoint) -> Self {
        let congestion = PortCongestion::new(
            point.port_code.as_deref().unwrap_or("UNKNOWN"),
            &point.label,
            DEFAULT_UTILIZATION_PERCENT,
            DEFAULT_WAIT_DAYS,
        );
        Self { point, congestion }
    }
}

/// Everything the generator needs for one request.
#[derive(Clone, Debug)]
pub struct CandidateInputs<'a> {
    pub request: &'a RouteRequest,
    pub origin: &'a GeoPoint,
    pub destination: &'a GeoPoint,
    pub origin_gateway: PortStop,
    pub destination_gateway: PortStop,
    pub origin_road_leg: RoadLeg,
    pub destination_road_leg: RoadLeg,
    pub transshipment_hub: Option<PortStop>,
    pub multimodal_hub: Option<PortStop>,
    /// Alternatives from the direct road lookup, fastest first. Empty when
    /// the lookup failed.
    pub road_alternatives: Vec<RoadLeg>,
}

/// Hub that minimises gateway → hub → gateway, unless the detour is too long.
pub fn choose_transshipment_hub(origin_gw: &GeoPoint, destination_gw: &GeoPoint) -> Option<&'static PortInfo> {
    let direct = distance_km(origin_gw, destination_gw);
    if direct <= SAME_PLACE_KM {
        return None;
    }

    let mut best: Option<(&'static PortInfo, f64)> = None;
    for hub in hubs() {
        let point = hub.to_point();
        let first = distance_km(origin_gw, &point);
        let second = distance_km(&point, destination_gw);
        if first <= SAME_PLACE_KM || second <= SAME_PLACE_KM {
            continue;
        }
        let total = first + second;
        if best.map(|(_, current)| total < current).unwrap_or(true) {
            best = Some((hub, total));
        }
    }

    best.filter(|(_, total)| *total <= direct * HUB_MAX_DETOUR_RATIO)
        .map(|(hub, _)| hub)
}

/// Hub nearest the origin gateway among hubs that bring cargo closer to the
/// destination.
pub fn choose_multimodal_hub(origin_gw: &GeoPoint, destination: &GeoPoint) -> Option<&'static PortInfo> {
    let remaining = distance_km(origin_gw, destination);
    let mut best: Option<(&'static PortInfo, f64)> = None;
    for hub in hubs() {
        let point = hub.to_point();
        let leg = distance_km(origin_gw, &point);
        let onward = distance_km(&point, destination);
        if leg <= SAME_PLACE_KM || onward < MIN_AIR_DISTANCE_KM || onward >= remaining {
            continue;
        }
        if best.map(|(_, current)| leg < current).unwrap_or(true) {
            best = Some((hub, leg));
        }
    }
    best.map(|(hub, _)| hub)
}

/// Builds, deduplicates and prices every candidate for the request.
pub fn generate_routes(inputs: &CandidateInputs<'_>) -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(sea_direct(inputs));
    routes.extend(sea_via_hub(inputs));
    routes.extend(multimodal(inputs));
    routes.extend(air_route(inputs, &AIR_ECONOMY));
    routes.extend(air_route(inputs, &AIR_EXPRESS));
    routes.extend(road_routes(inputs));

    if routes.is_empty() {
        routes = fallback_routes(inputs.request, inputs.origin, inputs.destination);
    }

    let mut routes = dedupe_by_id(routes);
    apply_savings(&mut routes);
    routes
}

fn sea_direct(inputs: &CandidateInputs<'_>) -> Option<Route> {
    let origin_gw = &inputs.origin_gateway;
    let destination_gw = &inputs.destination_gateway;
    let straight = distance_km(&origin_gw.point, &destination_gw.point);
    if straight <= SAME_PLACE_KM {
        return None;
    }

    let request = inputs.request;
    let tons = request.weight_tons();
    let ocean_km = straight * DIRECT_OCEAN_DETOUR;
    let wait_days = origin_gw.congestion.avg_wait_days + destination_gw.congestion.avg_wait_days;

    let cost = SEA_BASE_FEE
        + inputs.origin_road_leg.cost(tons)
        + inputs.destination_road_leg.cost(tons)
        + tons * ocean_km * DIRECT_OCEAN_RATE
        + congestion_surcharge(wait_days, tons);
    let days = inputs.origin_road_leg.days()
        + inputs.destination_road_leg.days()
        + ocean_km / OCEAN_KM_PER_DAY
        + wait_days;
    let emissions = inputs.origin_road_leg.emissions(request.cargo_weight_kg)
        + inputs.destination_road_leg.emissions(request.cargo_weight_kg)
        + calculate_emissions(request.cargo_weight_kg, TransportMode::Ocean, Some(ocean_km));
    let risk = worst_port_risk(&[&origin_gw.congestion, &destination_gw.congestion]);

    Some(build_route(
        "sea_direct",
        "Direct Sea Freight",
        "Maersk",
        days,
        cost,
        emissions,
        risk,
        waypoints(inputs, &[(&origin_gw.point, WaypointKind::Gateway), (&destination_gw.point, WaypointKind::Gateway)]),
    ))
}

fn sea_via_hub(inputs: &CandidateInputs<'_>) -> Option<Route> {
    let hub = inputs.transshipment_hub.as_ref()?;
    let origin_gw = &inputs.origin_gateway;
    let destination_gw = &inputs.destination_gateway;

    let request = inputs.request;
    let tons = request.weight_tons();
    let ocean_km = (distance_km(&origin_gw.point, &hub.point) + distance_km(&hub.point, &destination_gw.point))
        * HUB_OCEAN_DETOUR;
    let wait_days = origin_gw.congestion.avg_wait_days
        + hub.congestion.avg_wait_days
        + destination_gw.congestion.avg_wait_days;

    let cost = SEA_BASE_FEE
        + HUB_HANDLING_FEE
        + inputs.origin_road_leg.cost(tons)
        + inputs.destination_road_leg.cost(tons)
        + tons * ocean_km * HUB_OCEAN_RATE
        + congestion_surcharge(wait_days, tons);
    let days = inputs.origin_road_leg.days()
        + inputs.destination_road_leg.days()
        + ocean_km / OCEAN_KM_PER_DAY
        + wait_days
        + HUB_EXTRA_DAYS;
    let emissions = inputs.origin_road_leg.emissions(request.cargo_weight_kg)
        + inputs.destination_road_leg.emissions(request.cargo_weight_kg)
        + calculate_emissions(request.cargo_weight_kg, TransportMode::Ocean, Some(ocean_km));
    let risk = worst_port_risk(&[&origin_gw.congestion, &hub.congestion, &destination_gw.congestion]);

    Some(build_route(
        "sea_via_hub",
        &format!("Sea Freight via {}", hub.point.label),
        "MSC",
        days,
        cost,
        emissions,
        risk,
        waypoints(
            inputs,
            &[
                (&origin_gw.point, WaypointKind::Gateway),
                (&hub.point, WaypointKind::Hub),
                (&destination_gw.point, WaypointKind::Gateway),
            ],
        ),
    ))
}

fn multimodal(inputs: &CandidateInputs<'_>) -> Option<Route> {
    let hub = inputs.multimodal_hub.as_ref()?;
    let origin_gw = &inputs.origin_gateway;

    let request = inputs.request;
    let tons = request.weight_tons();
    let ocean_km = distance_km(&origin_gw.point, &hub.point) * MULTIMODAL_OCEAN_DETOUR;
    let air_km = distance_km(&hub.point, inputs.destination) * MULTIMODAL_AIR_DETOUR;
    let wait_days = origin_gw.congestion.avg_wait_days + hub.congestion.avg_wait_days;

    let cost = SEA_BASE_FEE
        + MULTIMODAL_TRANSFER_FEE
        + inputs.origin_road_leg.cost(tons)
        + tons * ocean_km * MULTIMODAL_OCEAN_RATE
        + congestion_surcharge(wait_days, tons)
        + AIR_ECONOMY.base_fee
        + tons * air_km * AIR_ECONOMY.rate_per_ton_km;
    let days = inputs.origin_road_leg.days()
        + ocean_km / OCEAN_KM_PER_DAY
        + wait_days
        + MULTIMODAL_TRANSFER_DAYS
        + AIR_ECONOMY.handling_days
        + air_km / AIR_ECONOMY.km_per_day;
    let emissions = inputs.origin_road_leg.emissions(request.cargo_weight_kg)
        + calculate_emissions(request.cargo_weight_kg, TransportMode::Ocean, Some(ocean_km))
        + calculate_emissions(request.cargo_weight_kg, TransportMode::Air, Some(air_km));
    let risk = worst_port_risk(&[&origin_gw.congestion, &hub.congestion]);

    Some(build_route(
        "multimodal_sea_air",
        &format!("Sea-Air via {}", hub.point.label),
        "CMA CGM",
        days,
        cost,
        emissions,
        risk,
        waypoints(inputs, &[(&origin_gw.point, WaypointKind::Gateway), (&hub.point, WaypointKind::Hub)]),
    ))
}

fn air_route(inputs: &CandidateInputs<'_>, tier: &AirTier) -> Option<Route> {
    let straight = distance_km(inputs.origin, inputs.destination);
    if straight < MIN_AIR_DISTANCE_KM {
        return None;
    }
    Some(air_from_distance(inputs.request, inputs.origin, inputs.destination, tier, straight, tier.id))
}

fn air_from_distance(
    request: &RouteRequest,
    origin: &GeoPoint,
    destination: &GeoPoint,
    tier: &AirTier,
    straight_km: f64,
    id: &str,
) -> Route {
    let tons = request.weight_tons();
    let air_km = straight_km * tier.detour;
    let cost = tier.base_fee + tons * air_km * tier.rate_per_ton_km;
    let days = tier.handling_days + air_km / tier.km_per_day;
    let emissions = calculate_emissions(request.cargo_weight_kg, TransportMode::Air, Some(air_km));

    build_route(
        id,
        tier.name,
        tier.carrier,
        days,
        cost,
        emissions,
        CongestionRisk::Low,
        vec![origin.waypoint(WaypointKind::Origin), destination.waypoint(WaypointKind::Destination)],
    )
}

fn road_routes(inputs: &CandidateInputs<'_>) -> Vec<Route> {
    let tons = inputs.request.weight_tons();
    inputs
        .road_alternatives
        .iter()
        .take(ROAD_SERVICE_LABELS.len())
        .enumerate()
        .map(|(index, leg)| {
            let service = ROAD_SERVICE_LABELS[index];
            let multiplier = ROAD_COST_MULTIPLIERS[index % ROAD_COST_MULTIPLIERS.len()];
            let cost = (ROAD_BASE_FEE + leg.cost(tons)) * multiplier;
            let average_speed = if leg.duration_hours > 0.0 {
                leg.distance_km / leg.duration_hours
            } else {
                ROAD_FALLBACK_SPEED_KMH
            };
            build_route(
                &format!("road_{service}"),
                &format!("Road Freight ({service})"),
                "Regional Trucking",
                leg.days(),
                cost,
                leg.emissions(inputs.request.cargo_weight_kg),
                CongestionRisk::from_average_speed(average_speed),
                vec![
                    inputs.origin.waypoint(WaypointKind::Origin),
                    inputs.destination.waypoint(WaypointKind::Destination),
                ],
            )
        })
        .collect()
}

/// Sea and air estimates straight from the great-circle distance, used when
/// no detailed candidate could be built.
pub fn fallback_routes(request: &RouteRequest, origin: &GeoPoint, destination: &GeoPoint) -> Vec<Route> {
    let straight = distance_km(origin, destination);
    let tons = request.weight_tons();
    let ocean_km = straight * DIRECT_OCEAN_DETOUR;
    let wait_days = DEFAULT_WAIT_DAYS * 2.0;

    let sea = build_route(
        "sea_estimate",
        "Sea Freight (estimate)",
        "COSCO",
        ocean_km / OCEAN_KM_PER_DAY + wait_days,
        SEA_BASE_FEE + tons * ocean_km * DIRECT_OCEAN_RATE + congestion_surcharge(wait_days, tons),
        calculate_emissions(request.cargo_weight_kg, TransportMode::Ocean, Some(ocean_km)),
        CongestionRisk::from_utilization(DEFAULT_UTILIZATION_PERCENT),
        vec![origin.waypoint(WaypointKind::Origin), destination.waypoint(WaypointKind::Destination)],
    );
    let air = air_from_distance(request, origin, destination, &AIR_ECONOMY, straight, "air_estimate");
    vec![sea, air]
}

/// Keeps the first route for every id.
pub fn dedupe_by_id(routes: Vec<Route>) -> Vec<Route> {
    let mut seen = HashSet::new();
    routes
        .into_iter()
        .filter(|route| seen.insert(route.id.clone()))
        .collect()
}

/// Savings against `sea_direct` when present, otherwise the first route.
pub fn apply_savings(routes: &mut [Route]) {
    let Some(baseline) = routes
        .iter()
        .find(|route| route.id == "sea_direct")
        .or_else(|| routes.first())
        .map(|route| route.cost_usd)
    else {
        return;
    };

    for route in routes.iter_mut() {
        route.savings = if route.cost_usd < baseline {
            Some(round2(baseline - route.cost_usd))
        } else {
            None
        };
    }
}

fn congestion_surcharge(wait_days: f64, tons: f64) -> f64 {
    wait_days * CONGESTION_FEE_PER_TON_DAY * tons
}

fn worst_port_risk(readings: &[&PortCongestion]) -> CongestionRisk {
    let worst = readings
        .iter()
        .map(|reading| reading.utilization_percent)
        .fold(f64::NEG_INFINITY, f64::max);
    CongestionRisk::from_utilization(worst)
}

/// Origin, the given stops (skipping ones that coincide with an endpoint),
/// destination.
fn waypoints(inputs: &CandidateInputs<'_>, stops: &[(&GeoPoint, WaypointKind)]) -> Vec<Waypoint> {
    let mut points = vec![inputs.origin.waypoint(WaypointKind::Origin)];
    for (point, kind) in stops {
        let at_origin = distance_km(point, inputs.origin) < 1.0;
        let at_destination = distance_km(point, inputs.destination) < 1.0;
        if !at_origin && !at_destination {
            points.push(point.waypoint(*kind));
        }
    }
    points.push(inputs.destination.waypoint(WaypointKind::Destination));
    points
}

#[allow(clippy::too_many_arguments)]
fn build_route(
    id: &str,
    name: &str,
    carrier: &str,
    days: f64,
    cost: f64,
    emissions: f64,
    risk: CongestionRisk,
    waypoints: Vec<Waypoint>,
) -> Route {
    Route {
        id: id.to_string(),
        name: name.to_string(),
        carrier: carrier.to_string(),
        transit_days: transit_days(days),
        cost_usd: round2(cost.max(0.0)),
        emissions_kg_co2: round2(emissions.max(0.0)),
        congestion_risk: risk,
        recommended: false,
        savings: None,
        waypoints,
    }
}

fn transit_days(days: f64) -> u32 {
    if days.is_finite() {
        days.ceil().max(1.0) as u32
    } else {
        1
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
