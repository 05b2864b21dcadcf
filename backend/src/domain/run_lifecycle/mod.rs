//! Run lifecycle orchestration.
//!
//! Drives an account's run through `NoActiveRun -> ActiveRunPendingRoute ->
//! ActiveRunRouted -> NoActiveRun`. The active run is persisted before the
//! route provider is contacted and is never rolled back when the lookup fails;
//! `resolve_route` retries against the stored run instead. Store transitions
//! for one account are serialised by an async lock that is released before the
//! provider call.

mod config;
mod error;
mod locks;

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountRepository, EndRunResponse, PaceStrategy, RouteProvider, RunLifecycleCommand,
    RunRepository, RunStatus, RunStatusQuery, StartRunRequest, UnavailablePace,
};
use crate::domain::route_lookup_service::RouteLookupService;
use crate::domain::{
    Account, ActiveRun, ActiveRunSlot, Email, Error, HistoricalRun, RouteResult, RunPlan,
};

pub use config::{DEFAULT_PROVISIONAL_ARRIVAL_HOURS, RunLifecycleConfig};
pub use error::{RouteOperation, RunLifecycleError};
use locks::AccountLocks;

/// Domain service implementing the run lifecycle driving ports.
pub struct RunLifecycleService<A, R, P> {
    accounts: Arc<A>,
    runs: Arc<R>,
    routes: RouteLookupService<P>,
    pace: Arc<dyn PaceStrategy>,
    clock: Arc<dyn Clock>,
    config: RunLifecycleConfig,
    locks: Arc<AccountLocks>,
}

impl<A, R, P> Clone for RunLifecycleService<A, R, P> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            runs: Arc::clone(&self.runs),
            routes: self.routes.clone(),
            pace: Arc::clone(&self.pace),
            clock: Arc::clone(&self.clock),
            config: self.config,
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<A, R, P> RunLifecycleService<A, R, P> {
    /// Create the service with the default pace strategy.
    pub fn new(
        accounts: Arc<A>,
        runs: Arc<R>,
        provider: Arc<P>,
        clock: Arc<dyn Clock>,
        config: RunLifecycleConfig,
    ) -> Self {
        Self {
            accounts,
            runs,
            routes: RouteLookupService::with_timeout(provider, config.route_timeout),
            pace: Arc::new(UnavailablePace),
            clock,
            config,
            locks: Arc::new(AccountLocks::default()),
        }
    }

    /// Replace the pace strategy.
    #[must_use]
    pub fn with_pace_strategy(mut self, pace: Arc<dyn PaceStrategy>) -> Self {
        self.pace = pace;
        self
    }
}

impl<A, R, P> RunLifecycleService<A, R, P>
where
    A: AccountRepository,
    R: RunRepository,
    P: RouteProvider,
{
    async fn find_account(&self, email: &Email) -> Result<Account, RunLifecycleError> {
        self.accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| RunLifecycleError::AccountNotFound {
                email: email.to_string(),
            })
    }

    async fn find_active_run(
        &self,
        account: &Account,
    ) -> Result<Option<ActiveRun>, RunLifecycleError> {
        self.runs
            .find_active_run(&account.id())
            .await
            .map_err(|err| RunLifecycleError::from_run_store(err, account.email().as_ref()))
    }

    async fn begin(&self, email: &Email, plan: &RunPlan) -> Result<ActiveRun, RunLifecycleError> {
        let _guard = self.locks.acquire(email).await;
        let account = self.find_account(email).await?;
        if let ActiveRunSlot::Occupied(run_id) = account.active_run() {
            info!(account = %email, %run_id, "start rejected: run already active");
            return Err(RunLifecycleError::RunAlreadyActive {
                email: email.to_string(),
            });
        }

        let started_at = self.clock.utc();
        let target_arrival_at = match plan.needed_arrival {
            Some(needed) => needed,
            None => started_at
                .checked_add_signed(self.config.provisional_arrival)
                .ok_or(RunLifecycleError::ProvisionalArrivalOutOfRange {
                    hours: self.config.provisional_arrival.num_hours(),
                })?,
        };
        let run = ActiveRun::begin(
            account.id(),
            plan,
            started_at,
            target_arrival_at,
            self.pace.required_pace(plan),
        );
        self.runs
            .begin_run(&run)
            .await
            .map_err(|err| RunLifecycleError::from_run_store(err, email.as_ref()))?;
        info!(account = %email, run_id = %run.id(), %target_arrival_at, "run started");
        Ok(run)
    }

    async fn route_and_record(
        &self,
        email: &Email,
        run: &ActiveRun,
        operation: RouteOperation,
    ) -> Result<RouteResult, RunLifecycleError> {
        let route = self
            .routes
            .lookup(run.origin(), run.destination())
            .await
            .map_err(|err| {
                warn!(
                    account = %email,
                    run_id = %run.id(),
                    %operation,
                    error = %err,
                    "route lookup failed; run left pending"
                );
                RunLifecycleError::RouteLookupFailed {
                    operation,
                    cause: err.to_string(),
                }
            })?;

        let _guard = self.locks.acquire(email).await;
        self.runs
            .record_route(&run.id(), route.distance_meters)
            .await
            .map_err(|err| RunLifecycleError::from_run_store(err, email.as_ref()))?;
        info!(
            account = %email,
            run_id = %run.id(),
            distance_meters = route.distance_meters,
            "route recorded"
        );
        Ok(route)
    }

    /// Start a run and resolve its route.
    pub async fn start_run(&self, request: StartRunRequest) -> Result<RouteResult, RunLifecycleError> {
        let StartRunRequest { email, plan } = request;
        let run = self.begin(&email, &plan).await?;
        self.route_and_record(&email, &run, RouteOperation::Start)
            .await
    }

    /// Retry or refresh the route of the existing active run.
    pub async fn resolve_run_route(&self, email: &Email) -> Result<RouteResult, RunLifecycleError> {
        let run = {
            let _guard = self.locks.acquire(email).await;
            let account = self.find_account(email).await?;
            self.find_active_run(&account)
                .await?
                .ok_or_else(|| RunLifecycleError::NoActiveRun {
                    email: email.to_string(),
                })?
        };
        self.route_and_record(email, &run, RouteOperation::ResolveRoute)
            .await
    }

    /// Archive the active run and clear the account's slot.
    pub async fn end_run(&self, email: &Email) -> Result<EndRunResponse, RunLifecycleError> {
        let no_run = || RunLifecycleError::NoActiveRunToEnd {
            email: email.to_string(),
        };

        let _guard = self.locks.acquire(email).await;
        let account = self.find_account(email).await?;
        if account.active_run().is_idle() {
            return Err(no_run());
        }
        let run = self.find_active_run(&account).await?.ok_or_else(no_run)?;

        let completed_at = self.clock.utc();
        let historical = HistoricalRun::archive(
            &run,
            self.pace.average_pace(&run, completed_at),
            completed_at,
        );
        self.runs
            .archive_run(&run.id(), &historical)
            .await
            .map_err(|err| match RunLifecycleError::from_run_store(err, email.as_ref()) {
                RunLifecycleError::NoActiveRun { .. } => no_run(),
                other => other,
            })?;
        info!(
            account = %email,
            run_id = %run.id(),
            archived_run_id = %historical.id,
            distance_meters = historical.distance_meters,
            "run archived"
        );
        Ok(EndRunResponse {
            archived_run_id: historical.id,
        })
    }

    /// Derived run state for the account.
    pub async fn run_status(&self, email: &Email) -> Result<RunStatus, RunLifecycleError> {
        let account = self.find_account(email).await?;
        let active_run = self.find_active_run(&account).await?;
        Ok(RunStatus::of(active_run))
    }
}

#[async_trait]
impl<A, R, P> RunLifecycleCommand for RunLifecycleService<A, R, P>
where
    A: AccountRepository,
    R: RunRepository,
    P: RouteProvider,
{
    async fn start(&self, request: StartRunRequest) -> Result<RouteResult, Error> {
        Ok(self.start_run(request).await?)
    }

    async fn resolve_route(&self, email: &Email) -> Result<RouteResult, Error> {
        Ok(self.resolve_run_route(email).await?)
    }

    async fn end(&self, email: &Email) -> Result<EndRunResponse, Error> {
        Ok(self.end_run(email).await?)
    }
}

#[async_trait]
impl<A, R, P> RunStatusQuery for RunLifecycleService<A, R, P>
where
    A: AccountRepository,
    R: RunRepository,
    P: RouteProvider,
{
    async fn status(&self, email: &Email) -> Result<RunStatus, Error> {
        Ok(self.run_status(email).await?)
    }
}
