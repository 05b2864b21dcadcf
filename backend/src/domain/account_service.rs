//! Account registration and profile services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountCommand, AccountProfile, AccountQuery, AccountRepository, AccountRepositoryError,
    AccountSummary, RegisterAccountRequest, RunRepository, RunRepositoryError,
};
use crate::domain::{Account, Email, Error};

const ACCOUNT_MISSING: &str = "Account does not exist";
const EMAIL_TAKEN: &str = "Email already taken";

fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::EmailTaken { .. } => Error::conflict(EMAIL_TAKEN),
    }
}

fn map_run_error(error: RunRepositoryError) -> Error {
    match error {
        RunRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("run repository unavailable: {message}"))
        }
        other => Error::internal(format!("run repository error: {other}")),
    }
}

/// Account service implementing the account driving ports.
pub struct AccountService<A, R> {
    accounts: Arc<A>,
    runs: Arc<R>,
}

impl<A, R> Clone for AccountService<A, R> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            runs: Arc::clone(&self.runs),
        }
    }
}

impl<A, R> AccountService<A, R> {
    pub fn new(accounts: Arc<A>, runs: Arc<R>) -> Self {
        Self { accounts, runs }
    }
}

#[async_trait]
impl<A, R> AccountCommand for AccountService<A, R>
where
    A: AccountRepository,
    R: RunRepository,
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<AccountSummary, Error> {
        let RegisterAccountRequest {
            email,
            display_name,
            credential,
        } = request;

        if self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(map_account_error)?
            .is_some()
        {
            return Err(Error::conflict(EMAIL_TAKEN));
        }

        let account = Account::register(email, display_name, credential);
        self.accounts
            .create(&account)
            .await
            .map_err(map_account_error)?;
        info!(account = %account.email(), account_id = %account.id(), "account registered");

        Ok(AccountSummary {
            email: account.email().clone(),
            display_name: account.display_name().clone(),
        })
    }
}

#[async_trait]
impl<A, R> AccountQuery for AccountService<A, R>
where
    A: AccountRepository,
    R: RunRepository,
{
    async fn profile(&self, email: &Email) -> Result<AccountProfile, Error> {
        let account = self
            .accounts
            .find_by_email(email)
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| Error::not_found(ACCOUNT_MISSING))?;
        let past_runs = self
            .runs
            .list_history(&account.id())
            .await
            .map_err(map_run_error)?;

        Ok(AccountProfile {
            email: account.email().clone(),
            display_name: account.display_name().clone(),
            past_runs,
        })
    }
}
