//! Driven port for computing a walking route between two points.

use async_trait::async_trait;

use crate::domain::{LatLng, RouteResult};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the route provider.
    pub enum RouteProviderError {
        /// Network transport failed or the provider answered with a server error.
        Transport { message: String } =>
            "route provider transport failed: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } =>
            "route provider timed out: {message}",
        /// The provider refused the request.
        Rejected { message: String } =>
            "route provider rejected request: {message}",
        /// The provider response could not be decoded.
        Decode { message: String } =>
            "route provider response decode failed: {message}",
    }
}

/// Port for the external routing service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Compute the first candidate route from `origin` to `destination`.
    async fn compute_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<RouteResult, RouteProviderError>;
}

/// Distance returned by [`FixtureRouteProvider`].
pub const FIXTURE_ROUTE_DISTANCE_METERS: u32 = 1500;
/// Polyline returned by [`FixtureRouteProvider`].
pub const FIXTURE_ROUTE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// Fixed-route provider for local development without an API key.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRouteProvider;

#[async_trait]
impl RouteProvider for FixtureRouteProvider {
    async fn compute_route(
        &self,
        _origin: LatLng,
        _destination: LatLng,
    ) -> Result<RouteResult, RouteProviderError> {
        Ok(RouteResult::new(
            FIXTURE_ROUTE_DISTANCE_METERS,
            FIXTURE_ROUTE_POLYLINE,
        ))
    }
}
