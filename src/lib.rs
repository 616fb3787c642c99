//! Multi-modal freight route comparison.
//!
//! [`RouteComparisonService`] resolves a shipment's endpoints, builds sea, air,
//! multimodal and road candidates, and marks the Pareto-optimal route that best
//! fits the cargo's value density.

pub mod config;
pub mod domain;
pub mod infra;
pub mod planner;
pub mod util;

pub use config::{Config, ConfigError};
pub use domain::{ComparisonResponse, CongestionRisk, PortCongestion, Route, RouteError, RouteRequest};
pub use planner::RouteComparisonService;
