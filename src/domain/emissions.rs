//! CO2 estimates per transport mode.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Ocean,
    Rail,
    Truck,
    Air,
}

impl TransportMode {
    /// kg CO2 per ton-km.
    pub fn emission_factor(&self) -> f64 {
        match self {
            Self::Ocean => 0.015,
            Self::Rail => 0.028,
            Self::Truck => 0.062,
            Self::Air => 0.50,
        }
    }

    /// Typical leg length used when the caller has no distance.
    pub fn fallback_distance_km(&self) -> f64 {
        match self {
            Self::Ocean => 18_000.0,
            Self::Air => 12_000.0,
            Self::Rail => 10_000.0,
            Self::Truck => 1_500.0,
        }
    }
}

pub fn calculate_emissions(weight_kg: f64, mode: TransportMode, distance_km: Option<f64>) -> f64 {
    let tons = weight_kg / 1000.0;
    let distance = distance_km.unwrap_or_else(|| mode.fallback_distance_km());
    (tons * distance * mode.emission_factor()).max(0.0)
}
