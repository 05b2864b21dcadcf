//! PostgreSQL-backed `RunRepository` implementation.
//!
//! `begin_run` and `archive_run` each run in one transaction that locks the
//! owner's account row, so the account's `active_run_id` and the
//! `active_runs` table never disagree.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{ActiveRunRow, HistoricalRunRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, active_runs, historical_runs};
use crate::domain::ports::{RunRepository, RunRepositoryError};
use crate::domain::{AccountId, ActiveRun, ActiveRunId, HistoricalRun};

/// Diesel-backed run repository.
#[derive(Clone)]
pub struct DieselRunRepository {
    pool: DbPool,
}

impl DieselRunRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a transaction: either Diesel or a domain rule.
#[derive(Debug)]
enum TransitionError {
    Diesel(diesel::result::Error),
    Rejected(RunRepositoryError),
}

impl From<diesel::result::Error> for TransitionError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> RunRepositoryError {
    map_basic_pool_error(error, RunRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RunRepositoryError {
    map_basic_diesel_error(error, RunRepositoryError::query, RunRepositoryError::connection)
}

#[async_trait]
impl RunRepository for DieselRunRepository {
    async fn begin_run(&self, run: &ActiveRun) -> Result<(), RunRepositoryError> {
        let row = ActiveRunRow::from_domain(run).map_err(RunRepositoryError::query)?;
        let owner = *run.account_id().as_uuid();
        let run_id = row.id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TransitionError, _>(|conn| {
            async move {
                let slot: Option<Option<Uuid>> = accounts::table
                    .find(owner)
                    .select(accounts::active_run_id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                match slot {
                    None => {
                        return Err(TransitionError::Rejected(
                            RunRepositoryError::account_not_found(owner.to_string()),
                        ));
                    }
                    Some(Some(_)) => {
                        return Err(TransitionError::Rejected(
                            RunRepositoryError::run_already_active(owner.to_string()),
                        ));
                    }
                    Some(None) => {}
                }

                diesel::insert_into(active_runs::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                diesel::update(accounts::table.find(owner))
                    .set((
                        accounts::active_run_id.eq(Some(run_id)),
                        accounts::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| match err {
            TransitionError::Rejected(rejected) => rejected,
            TransitionError::Diesel(err) if unique_violation(&err).is_some() => {
                debug!(account_id = %owner, "active run unique constraint rejected insert");
                RunRepositoryError::run_already_active(owner.to_string())
            }
            TransitionError::Diesel(err) => map_diesel_error(err),
        })
    }

    async fn find_active_run(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ActiveRun>, RunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ActiveRunRow> = active_runs::table
            .filter(active_runs::account_id.eq(account_id.as_uuid()))
            .select(ActiveRunRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(ActiveRunRow::into_domain)
            .transpose()
            .map_err(RunRepositoryError::query)
    }

    async fn record_route(
        &self,
        run_id: &ActiveRunId,
        distance_meters: u32,
    ) -> Result<(), RunRepositoryError> {
        let stored = i32::try_from(distance_meters).map_err(|_| {
            RunRepositoryError::query(format!("distance {distance_meters}m exceeds the stored range"))
        })?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(active_runs::table.find(*run_id.as_uuid()))
            .set(active_runs::distance_meters.eq(Some(stored)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RunRepositoryError::run_not_found(run_id.to_string()));
        }
        Ok(())
    }

    async fn archive_run(
        &self,
        run_id: &ActiveRunId,
        historical: &HistoricalRun,
    ) -> Result<(), RunRepositoryError> {
        let row = HistoricalRunRow::from_domain(historical).map_err(RunRepositoryError::query)?;
        let run_uuid = *run_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TransitionError, _>(|conn| {
            async move {
                let owner: Option<Uuid> = diesel::delete(active_runs::table.find(run_uuid))
                    .returning(active_runs::account_id)
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(owner) = owner else {
                    return Err(TransitionError::Rejected(RunRepositoryError::run_not_found(
                        run_uuid.to_string(),
                    )));
                };

                diesel::insert_into(historical_runs::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                diesel::update(
                    accounts::table
                        .find(owner)
                        .filter(accounts::active_run_id.eq(run_uuid)),
                )
                .set((
                    accounts::active_run_id.eq(None::<Uuid>),
                    accounts::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)
                .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| match err {
            TransitionError::Rejected(rejected) => rejected,
            TransitionError::Diesel(err) => map_diesel_error(err),
        })
    }

    async fn list_history(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<HistoricalRun>, RunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HistoricalRunRow> = historical_runs::table
            .filter(historical_runs::account_id.eq(account_id.as_uuid()))
            .order((historical_runs::completed_at.desc(), historical_runs::id.desc()))
            .select(HistoricalRunRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(HistoricalRunRow::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RunRepositoryError::query)
    }
}
