//! Tunables for the run lifecycle workflows.

use std::time::Duration;

use crate::domain::route_lookup_service::DEFAULT_ROUTE_TIMEOUT;

/// Hours added to the start time when no target arrival is supplied.
pub const DEFAULT_PROVISIONAL_ARRIVAL_HOURS: i64 = 24;

/// Run lifecycle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLifecycleConfig {
    /// Bound on one route provider call.
    pub route_timeout: Duration,
    /// Target arrival offset used when the runner gives none.
    pub provisional_arrival: chrono::Duration,
}

impl Default for RunLifecycleConfig {
    fn default() -> Self {
        Self {
            route_timeout: DEFAULT_ROUTE_TIMEOUT,
            provisional_arrival: chrono::Duration::hours(DEFAULT_PROVISIONAL_ARRIVAL_HOURS),
        }
    }
}

impl RunLifecycleConfig {
    #[must_use]
    pub fn with_route_timeout(mut self, timeout: Duration) -> Self {
        self.route_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_provisional_arrival(mut self, offset: chrono::Duration) -> Self {
        self.provisional_arrival = offset;
        self
    }
}
