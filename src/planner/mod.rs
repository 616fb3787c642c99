//! Request orchestration: resolves endpoints through the providers, then
//! hands the collected inputs to the pure candidate generator and selector.

pub mod resolution;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::candidates::{choose_multimodal_hub, choose_transshipment_hub};
use crate::domain::port_data::{DEFAULT_UTILIZATION_PERCENT, DEFAULT_WAIT_DAYS};
use crate::domain::{
    generate_routes, mark_recommended, CandidateInputs, ComparisonResponse, GeoPoint, PortCongestion, PortStop,
    RoadLeg, RouteError, RouteRequest, SelectionConfig,
};
use crate::infra::{
    CongestionSource, Geocoder, NominatimClient, OsrmClient, ProviderError, RoadRouter, StaticCongestionTable,
};

use self::resolution::{nearest_sea_gateway, resolve_endpoint, same_place, with_timeout};

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_ROAD_ALTERNATIVES: usize = 3;

/// Compares freight routes for a request. Holds no per-request state, so one
/// instance can serve concurrent callers.
#[derive(Clone)]
pub struct RouteComparisonService {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RoadRouter>,
    congestion: Arc<dyn CongestionSource>,
    selection: SelectionConfig,
    provider_timeout: Duration,
    road_alternatives: usize,
}

impl RouteComparisonService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RoadRouter>,
        congestion: Arc<dyn CongestionSource>,
    ) -> Self {
        Self {
            geocoder,
            router,
            congestion,
            selection: SelectionConfig::default(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            road_alternatives: DEFAULT_ROAD_ALTERNATIVES,
        }
    }

    /// Live HTTP providers plus the built-in congestion table.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let geocoder = NominatimClient::with_base_url(&config.geocoder_url, &config.user_agent, config.provider_timeout)?;
        let router = OsrmClient::with_base_url(&config.router_url, &config.user_agent, config.provider_timeout)?;
        Ok(Self::new(Arc::new(geocoder), Arc::new(router), Arc::new(StaticCongestionTable::new()))
            .with_selection(config.selection.clone())
            .with_provider_timeout(config.provider_timeout)
            .with_road_alternatives(config.road_alternatives))
    }

    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_road_alternatives(mut self, count: usize) -> Self {
        self.road_alternatives = count.max(1);
        self
    }

    /// Candidate routes for `request` with exactly one marked recommended.
    ///
    /// Only invalid input is an error. An endpoint that cannot be resolved
    /// yields an empty response; every other provider failure degrades to a
    /// local estimate.
    pub async fn compare(&self, request: &RouteRequest) -> Result<ComparisonResponse, RouteError> {
        request.validate()?;

        let geocoder = self.geocoder.as_ref();
        let (origin, destination) = tokio::join!(
            resolve_endpoint(geocoder, self.provider_timeout, &request.origin_port, request.origin_query()),
            resolve_endpoint(
                geocoder,
                self.provider_timeout,
                &request.destination_port,
                request.destination_query(),
            ),
        );
        let (origin, destination) = match (origin, destination) {
            (Ok(origin), Ok(destination)) => (origin, destination),
            (origin, destination) => {
                for failure in [origin.err(), destination.err()].into_iter().flatten() {
                    warn!(error = %failure, "endpoint could not be resolved");
                }
                return Ok(ComparisonResponse::empty(request));
            }
        };
        debug!(origin = %origin.label, destination = %destination.label, "endpoints resolved");

        let (origin_gateway, destination_gateway, road_alternatives) = tokio::join!(
            nearest_sea_gateway(geocoder, self.provider_timeout, &origin),
            nearest_sea_gateway(geocoder, self.provider_timeout, &destination),
            self.road_alternatives(&origin, &destination),
        );

        let transshipment = choose_transshipment_hub(&origin_gateway, &destination_gateway).map(|hub| hub.to_point());
        let multimodal = choose_multimodal_hub(&origin_gateway, &destination).map(|hub| hub.to_point());

        let (origin_stop, destination_stop, transshipment_stop, multimodal_stop, origin_leg, destination_leg) = tokio::join!(
            self.port_stop(origin_gateway.clone()),
            self.port_stop(destination_gateway.clone()),
            self.optional_stop(transshipment),
            self.optional_stop(multimodal),
            self.gateway_leg(&origin, &origin_gateway),
            self.gateway_leg(&destination_gateway, &destination),
        );

        let inputs = CandidateInputs {
            request,
            origin: &origin,
            destination: &destination,
            origin_gateway: origin_stop,
            destination_gateway: destination_stop,
            origin_road_leg: origin_leg,
            destination_road_leg: destination_leg,
            transshipment_hub: transshipment_stop,
            multimodal_hub: multimodal_stop,
            road_alternatives,
        };

        let mut routes = generate_routes(&inputs);
        let profile = self.selection.profile_for(request.value_density());
        mark_recommended(&mut routes, &profile);

        let response = ComparisonResponse::from_routes(request, routes);
        let chosen = response.routes.iter().find(|route| route.recommended);
        info!(
            origin = %request.origin_port,
            destination = %request.destination_port,
            candidates = response.routes.len(),
            recommended = chosen.map(|route| route.id.as_str()).unwrap_or("none"),
            risk = chosen.map(|route| route.congestion_risk.label()).unwrap_or("n/a"),
            "route comparison finished"
        );
        Ok(response)
    }

    /// Reading for one port; unknown codes are [`ProviderError::NotFound`].
    pub async fn port_congestion(&self, port_code: &str) -> Result<PortCongestion, ProviderError> {
        with_timeout(self.provider_timeout, self.congestion.congestion(port_code)).await
    }

    /// Like [`Self::port_congestion`], but an unknown code gets the default
    /// 68 % / 1.2 day reading under the name "Unknown Port".
    pub async fn port_congestion_or_default(&self, port_code: &str) -> Result<PortCongestion, ProviderError> {
        match self.port_congestion(port_code).await {
            Err(ProviderError::NotFound(_)) => {
                debug!(port = %port_code, "no reading, using default congestion");
                Ok(PortCongestion::new(
                    &port_code.trim().to_ascii_uppercase(),
                    "Unknown Port",
                    DEFAULT_UTILIZATION_PERCENT,
                    DEFAULT_WAIT_DAYS,
                ))
            }
            other => other,
        }
    }

    pub async fn all_port_congestion(&self) -> Result<Vec<PortCongestion>, ProviderError> {
        with_timeout(self.provider_timeout, self.congestion.all_ports()).await
    }

    async fn road_alternatives(&self, origin: &GeoPoint, destination: &GeoPoint) -> Vec<RoadLeg> {
        let call = self.router.route(origin, destination, self.road_alternatives);
        match with_timeout(self.provider_timeout, call).await {
            Ok(set) => {
                let legs = set.legs();
                if legs.is_empty() {
                    debug!(provider = self.router.name(), "no usable road paths");
                }
                legs
            }
            Err(err) => {
                warn!(provider = self.router.name(), error = %err, "road routing degraded");
                Vec::new()
            }
        }
    }

    /// Road leg between an endpoint and its gateway: zero when they coincide,
    /// the routed main path when available, otherwise the haversine estimate.
    async fn gateway_leg(&self, from: &GeoPoint, to: &GeoPoint) -> RoadLeg {
        if same_place(from, to) {
            return RoadLeg::ZERO;
        }
        match with_timeout(self.provider_timeout, self.router.route(from, to, 1)).await {
            Ok(set) => set.legs().into_iter().next().unwrap_or_else(|| RoadLeg::estimate(from, to)),
            Err(err) => {
                debug!(provider = self.router.name(), error = %err, "gateway leg estimated");
                RoadLeg::estimate(from, to)
            }
        }
    }

    async fn port_stop(&self, point: GeoPoint) -> PortStop {
        let Some(code) = point.port_code.clone() else {
            return PortStop::with_default_congestion(point);
        };
        match self.port_congestion(&code).await {
            Ok(reading) => PortStop::new(point, reading),
            Err(err) => {
                debug!(provider = self.congestion.name(), port = %code, error = %err, "default congestion used");
                PortStop::with_default_congestion(point)
            }
        }
    }

    async fn optional_stop(&self, point: Option<GeoPoint>) -> Option<PortStop> {
        match point {
            Some(point) => Some(self.port_stop(point).await),
            None => None,
        }
    }
}
