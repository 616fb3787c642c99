//! Route comparison domain: pure data and arithmetic, no I/O.

pub mod candidates;
pub mod emissions;
pub mod entities;
pub mod geo;
pub mod pareto;
pub mod port_data;
pub mod selection;

pub use candidates::{generate_routes, CandidateInputs, PortStop, RoadLeg};
pub use emissions::{calculate_emissions, TransportMode};
pub use entities::{
    ComparisonResponse, CongestionRisk, GeoPoint, PortCongestion, Route, RouteError, RouteRequest, Waypoint,
    WaypointKind,
};
pub use geo::haversine_km;
pub use pareto::{dominates, pareto_front_indices};
pub use selection::{mark_recommended, select_best_index, SelectionConfig, WeightProfile};
