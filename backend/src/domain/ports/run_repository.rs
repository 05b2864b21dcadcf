//! Driven port for active and historical run persistence.
//!
//! Every mutating operation is a single atomic transition: implementations
//! must never leave an account slot pointing at a missing run, or a run
//! without its owner's slot pointing back at it.

use async_trait::async_trait;

use crate::domain::{AccountId, ActiveRun, ActiveRunId, HistoricalRun};

use super::define_port_error;

define_port_error! {
    /// Errors raised by run repository adapters.
    pub enum RunRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "run repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "run repository query failed: {message}",
        /// The owning account does not exist.
        AccountNotFound { account_id: String } =>
            "account {account_id} does not exist",
        /// The owning account already has an active run.
        RunAlreadyActive { account_id: String } =>
            "account {account_id} already has an active run",
        /// The active run was ended or never existed.
        RunNotFound { run_id: String } =>
            "active run {run_id} does not exist",
    }
}

/// Port for the active run lifecycle and run history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Insert `run` and occupy its owner's slot in one step.
    async fn begin_run(&self, run: &ActiveRun) -> Result<(), RunRepositoryError>;

    /// Active run owned by the account, if any.
    async fn find_active_run(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ActiveRun>, RunRepositoryError>;

    /// Attach or refresh the resolved route distance.
    async fn record_route(
        &self,
        run_id: &ActiveRunId,
        distance_meters: u32,
    ) -> Result<(), RunRepositoryError>;

    /// Delete the active run, insert `historical`, and clear the owner's slot.
    ///
    /// Fails with `RunNotFound` and writes nothing when the run is gone.
    async fn archive_run(
        &self,
        run_id: &ActiveRunId,
        historical: &HistoricalRun,
    ) -> Result<(), RunRepositoryError>;

    /// Archived runs for the account, newest first.
    async fn list_history(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<HistoricalRun>, RunRepositoryError>;
}

/// Fixture implementation with no stored runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRunRepository;

#[async_trait]
impl RunRepository for FixtureRunRepository {
    async fn begin_run(&self, _run: &ActiveRun) -> Result<(), RunRepositoryError> {
        Ok(())
    }

    async fn find_active_run(
        &self,
        _account_id: &AccountId,
    ) -> Result<Option<ActiveRun>, RunRepositoryError> {
        Ok(None)
    }

    async fn record_route(
        &self,
        run_id: &ActiveRunId,
        _distance_meters: u32,
    ) -> Result<(), RunRepositoryError> {
        Err(RunRepositoryError::run_not_found(run_id.to_string()))
    }

    async fn archive_run(
        &self,
        run_id: &ActiveRunId,
        _historical: &HistoricalRun,
    ) -> Result<(), RunRepositoryError> {
        Err(RunRepositoryError::run_not_found(run_id.to_string()))
    }

    async fn list_history(
        &self,
        _account_id: &AccountId,
    ) -> Result<Vec<HistoricalRun>, RunRepositoryError> {
        Ok(Vec::new())
    }
}
