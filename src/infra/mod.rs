//! Thin asynchronous clients for the external data sources.

pub mod congestion;
pub mod nominatim;
pub mod osrm;
pub mod provider;

use reqwest::Url;
use serde::de::DeserializeOwned;

pub use congestion::StaticCongestionTable;
pub use nominatim::NominatimClient;
pub use osrm::OsrmClient;
pub use provider::{
    CongestionSource, GeocodeHit, Geocoder, ProviderError, RoadPath, RoadRouteSet, RoadRouter,
};

/// Parses a base URL, adding the trailing slash `Url::join` needs.
fn base_url(base: &str) -> Result<Url, url::ParseError> {
    let trimmed = base.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

/// Sends the request and decodes the body. Non-2xx statuses are errors.
async fn fetch_json<T>(builder: reqwest::RequestBuilder) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let response = builder.send().await?.error_for_status()?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Accepts either a JSON number or a numeric string.
fn f64_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct NumberOrString;

    impl<'de> serde::de::Visitor<'de> for NumberOrString {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }
    }

    deserializer.deserialize_any(NumberOrString)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = base_url("http://localhost:8080/geo").unwrap();
        assert_eq!(url.join("search").unwrap().path(), "/geo/search");
    }
}
