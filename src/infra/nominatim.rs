//! Free-text geocoding against a Nominatim-compatible `/search` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::provider::{GeocodeHit, Geocoder, ProviderError};
use super::{base_url, fetch_json, f64_from_json};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";
const DEFAULT_LIMIT: usize = 5;

#[derive(Clone)]
pub struct NominatimClient {
    http: Client,
    base_url: Url,
    limit: usize,
}

impl NominatimClient {
    pub fn with_base_url(base: &str, user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let base_url = base_url(base)?;
        let http = Client::builder().user_agent(user_agent).timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            limit: DEFAULT_LIMIT,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, ProviderError> {
        let mut url = self.base_url.join("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("limit", &self.limit.to_string());

        debug!(%url, "geocoding request");
        let places: Vec<PlaceDto> = fetch_json(self.http.get(url)).await?;
        Ok(places
            .into_iter()
            .map(GeocodeHit::from)
            .filter(|hit| hit.lat.is_finite() && hit.lon.is_finite())
            .collect())
    }

    fn name(&self) -> &str {
        "nominatim"
    }
}

#[derive(Debug, Deserialize)]
struct PlaceDto {
    #[serde(deserialize_with = "f64_from_json")]
    lat: f64,
    #[serde(deserialize_with = "f64_from_json")]
    lon: f64,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    address: Option<AddressDto>,
}

#[derive(Debug, Deserialize)]
struct AddressDto {
    #[serde(default)]
    country_code: Option<String>,
}

impl From<PlaceDto> for GeocodeHit {
    fn from(dto: PlaceDto) -> Self {
        Self {
            lat: dto.lat,
            lon: dto.lon,
            display_name: dto.display_name,
            country_code: dto.address.and_then(|address| address.country_code),
        }
    }
}
