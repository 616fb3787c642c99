//! Weighted tie-breaker over the Pareto front.

use serde::{Deserialize, Serialize};

use super::entities::Route;
use super::pareto::pareto_front_indices;
use super::port_data::carrier_reliability;

/// Weights for cost, time, emissions, risk and carrier unreliability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub cost: f64,
    pub time: f64,
    pub emissions: f64,
    pub risk: f64,
    pub reliability: f64,
}

impl WeightProfile {
    pub const fn new(cost: f64, time: f64, emissions: f64, risk: f64, reliability: f64) -> Self {
        Self {
            cost,
            time,
            emissions,
            risk,
            reliability,
        }
    }

    fn as_array(&self) -> [f64; 5] {
        [self.cost, self.time, self.emissions, self.risk, self.reliability]
    }
}

/// Value-density cut-offs (USD per kg) and the profile used in each band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub mid_density_threshold: f64,
    pub high_density_threshold: f64,
    pub default_profile: WeightProfile,
    pub mid_density_profile: WeightProfile,
    pub high_density_profile: WeightProfile,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mid_density_threshold: 60.0,
            high_density_threshold: 120.0,
            default_profile: WeightProfile::new(0.42, 0.26, 0.20, 0.08, 0.04),
            mid_density_profile: WeightProfile::new(0.38, 0.29, 0.20, 0.08, 0.05),
            high_density_profile: WeightProfile::new(0.34, 0.32, 0.20, 0.09, 0.05),
        }
    }
}

impl SelectionConfig {
    pub fn profile_for(&self, value_density: f64) -> WeightProfile {
        if value_density >= self.high_density_threshold {
            self.high_density_profile
        } else if value_density >= self.mid_density_threshold {
            self.mid_density_profile
        } else {
            self.default_profile
        }
    }
}

pub type Objective = fn(&Route) -> f64;

fn cost(route: &Route) -> f64 {
    route.cost_usd
}

fn transit(route: &Route) -> f64 {
    route.transit_days as f64
}

fn emissions(route: &Route) -> f64 {
    route.emissions_kg_co2
}

fn risk(route: &Route) -> f64 {
    route.congestion_risk.ordinal()
}

fn unreliability(route: &Route) -> f64 {
    1.0 - carrier_reliability(&route.carrier)
}

/// Objectives in the same order as [`WeightProfile`] fields.
pub const ROUTE_OBJECTIVES: [Objective; 5] = [cost, transit, emissions, risk, unreliability];

/// Lowest weighted, min-max normalised score among `candidates`.
/// Ties keep the first candidate. `None` only when `candidates` is empty.
pub fn select_best_index(values: &[Vec<f64>], candidates: &[usize], weights: &[f64]) -> Option<usize> {
    let first = *candidates.first()?;
    let objective_count = values[first].len();

    let mut mins = vec![f64::INFINITY; objective_count];
    let mut maxs = vec![f64::NEG_INFINITY; objective_count];
    for &index in candidates {
        for (k, value) in values[index].iter().enumerate() {
            mins[k] = mins[k].min(*value);
            maxs[k] = maxs[k].max(*value);
        }
    }

    let mut best = first;
    let mut best_score = f64::INFINITY;
    for &index in candidates {
        let score: f64 = values[index]
            .iter()
            .enumerate()
            .map(|(k, value)| {
                let span = maxs[k] - mins[k];
                let normalized = if span.abs() < f64::EPSILON {
                    0.0
                } else {
                    (value - mins[k]) / span
                };
                weights.get(k).copied().unwrap_or(0.0) * normalized
            })
            .sum();
        if score < best_score {
            best_score = score;
            best = index;
        }
    }
    Some(best)
}

/// Flags exactly one route of a non-empty list as recommended.
pub fn mark_recommended(routes: &mut [Route], profile: &WeightProfile) {
    for route in routes.iter_mut() {
        route.recommended = false;
    }
    if routes.is_empty() {
        return;
    }

    let front = pareto_front_indices(routes, &ROUTE_OBJECTIVES);
    let values: Vec<Vec<f64>> = routes
        .iter()
        .map(|route| ROUTE_OBJECTIVES.iter().map(|objective| objective(route)).collect())
        .collect();

    let best = select_best_index(&values, &front, &profile.as_array()).unwrap_or(0);
    routes[best].recommended = true;
}
