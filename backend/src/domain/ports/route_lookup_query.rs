//! Driving port for ad-hoc route lookups that touch no run state.

use async_trait::async_trait;

use crate::domain::{Error, LatLng, RouteResult};

use super::{FIXTURE_ROUTE_DISTANCE_METERS, FIXTURE_ROUTE_POLYLINE};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteLookupQuery: Send + Sync {
    async fn compute_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<RouteResult, Error>;
}

/// Fixture lookup returning the fixed development route.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRouteLookupQuery;

#[async_trait]
impl RouteLookupQuery for FixtureRouteLookupQuery {
    async fn compute_route(
        &self,
        _origin: LatLng,
        _destination: LatLng,
    ) -> Result<RouteResult, Error> {
        Ok(RouteResult::new(
            FIXTURE_ROUTE_DISTANCE_METERS,
            FIXTURE_ROUTE_POLYLINE,
        ))
    }
}
