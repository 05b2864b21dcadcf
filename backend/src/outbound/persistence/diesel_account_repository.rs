//! PostgreSQL-backed `AccountRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;
use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, Email};

/// Diesel-backed account repository.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(accounts::table)
            .values(NewAccountRow::from_domain(account))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if unique_violation(&err).is_some() {
                    debug!(account = %account.email(), "email unique constraint rejected insert");
                    AccountRepositoryError::email_taken(account.email().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(AccountRow::into_domain)
            .transpose()
            .map_err(AccountRepositoryError::query)
    }
}
