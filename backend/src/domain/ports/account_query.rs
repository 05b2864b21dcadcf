//! Driving port for account profile reads.

use async_trait::async_trait;

use crate::domain::{DisplayName, Email, Error, HistoricalRun};

/// Account profile including archived runs, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountProfile {
    pub email: Email,
    pub display_name: DisplayName,
    pub past_runs: Vec<HistoricalRun>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    async fn profile(&self, email: &Email) -> Result<AccountProfile, Error>;
}

/// Fixture query where no account exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountQuery;

#[async_trait]
impl AccountQuery for FixtureAccountQuery {
    async fn profile(&self, _email: &Email) -> Result<AccountProfile, Error> {
        Err(Error::not_found("Account does not exist"))
    }
}
