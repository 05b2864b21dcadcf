//! Route lookups bounded by a deadline.
//!
//! Wraps a [`RouteProvider`] so every call either completes within the
//! configured timeout or fails with [`RouteProviderError::Timeout`]. The run
//! lifecycle uses it for start and retry; it also serves standalone lookups
//! that never touch run state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{RouteLookupQuery, RouteProvider, RouteProviderError};
use crate::domain::{Error, LatLng, RouteResult};

/// Default bound on a single route provider call.
pub const DEFAULT_ROUTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline-bounded access to the route provider.
pub struct RouteLookupService<P> {
    provider: Arc<P>,
    timeout: Duration,
}

impl<P> Clone for RouteLookupService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            timeout: self.timeout,
        }
    }
}

impl<P> RouteLookupService<P> {
    /// Create a lookup service with the default timeout.
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_timeout(provider, DEFAULT_ROUTE_TIMEOUT)
    }

    /// Create a lookup service with an explicit timeout.
    pub fn with_timeout(provider: Arc<P>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<P> RouteLookupService<P>
where
    P: RouteProvider,
{
    /// Compute a route, failing with a timeout error once the deadline passes.
    pub async fn lookup(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<RouteResult, RouteProviderError> {
        debug!(%origin, %destination, "requesting route");
        match tokio::time::timeout(
            self.timeout,
            self.provider.compute_route(origin, destination),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RouteProviderError::timeout(format!(
                "no response within {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl<P> RouteLookupQuery for RouteLookupService<P>
where
    P: RouteProvider,
{
    async fn compute_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<RouteResult, Error> {
        self.lookup(origin, destination).await.map_err(|err| {
            warn!(error = %err, "standalone route lookup failed");
            Error::upstream_failure(format!("route lookup failed: {err}"))
                .with_details(json!({ "operation": "compute_route" }))
        })
    }
}
