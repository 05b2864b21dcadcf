//! Driving port for run lifecycle transitions.

use async_trait::async_trait;

use crate::domain::{Email, Error, HistoricalRunId, RouteResult, RunPlan};

use super::{FIXTURE_ROUTE_DISTANCE_METERS, FIXTURE_ROUTE_POLYLINE};

/// Request to start a run for an account.
#[derive(Debug, Clone, PartialEq)]
pub struct StartRunRequest {
    pub email: Email,
    pub plan: RunPlan,
}

/// Acknowledgement returned when a run is archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndRunResponse {
    pub archived_run_id: HistoricalRunId,
}

/// Start, route and end an account's run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RunLifecycleCommand: Send + Sync {
    /// Start a run and resolve its route.
    ///
    /// A route failure leaves the run started; call
    /// [`RunLifecycleCommand::resolve_route`] to retry.
    async fn start(&self, request: StartRunRequest) -> Result<RouteResult, Error>;

    /// Retry or refresh the route of the current run.
    async fn resolve_route(&self, email: &Email) -> Result<RouteResult, Error>;

    /// Archive the current run.
    async fn end(&self, email: &Email) -> Result<EndRunResponse, Error>;
}

/// Fixture command returning canned results.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRunLifecycleCommand;

#[async_trait]
impl RunLifecycleCommand for FixtureRunLifecycleCommand {
    async fn start(&self, _request: StartRunRequest) -> Result<RouteResult, Error> {
        Ok(RouteResult::new(
            FIXTURE_ROUTE_DISTANCE_METERS,
            FIXTURE_ROUTE_POLYLINE,
        ))
    }

    async fn resolve_route(&self, _email: &Email) -> Result<RouteResult, Error> {
        Ok(RouteResult::new(
            FIXTURE_ROUTE_DISTANCE_METERS,
            FIXTURE_ROUTE_POLYLINE,
        ))
    }

    async fn end(&self, _email: &Email) -> Result<EndRunResponse, Error> {
        Ok(EndRunResponse {
            archived_run_id: HistoricalRunId::random(),
        })
    }
}
