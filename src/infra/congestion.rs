//! Port congestion readings served from the built-in table.

use async_trait::async_trait;

use super::provider::{CongestionSource, ProviderError};
use crate::domain::port_data::{port_by_code, CONGESTION_READINGS};
use crate::domain::PortCongestion;

#[derive(Clone, Debug)]
pub struct StaticCongestionTable {
    readings: Vec<PortCongestion>,
}

impl StaticCongestionTable {
    pub fn new() -> Self {
        let readings = CONGESTION_READINGS
            .iter()
            .map(|(code, utilization, wait)| {
                let name = port_by_code(code).map(|port| port.name).unwrap_or("Unknown Port");
                PortCongestion::new(code, name, *utilization, *wait)
            })
            .collect();
        Self { readings }
    }

    pub fn from_readings(readings: Vec<PortCongestion>) -> Self {
        Self { readings }
    }
}

impl Default for StaticCongestionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CongestionSource for StaticCongestionTable {
    async fn congestion(&self, port_code: &str) -> Result<PortCongestion, ProviderError> {
        self.readings
            .iter()
            .find(|reading| reading.port_code.eq_ignore_ascii_case(port_code.trim()))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(port_code.to_string()))
    }

    async fn all_ports(&self) -> Result<Vec<PortCongestion>, ProviderError> {
        Ok(self.readings.clone())
    }

    fn name(&self) -> &str {
        "static-congestion"
    }
}
