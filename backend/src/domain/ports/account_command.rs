//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credential, DisplayName, Email, Error};

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    pub email: Email,
    pub display_name: DisplayName,
    pub credential: Credential,
}

/// Public view of a registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub email: Email,
    pub display_name: DisplayName,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account; duplicate emails are a conflict.
    async fn register(&self, request: RegisterAccountRequest) -> Result<AccountSummary, Error>;
}

/// Fixture command echoing the request back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountCommand;

#[async_trait]
impl AccountCommand for FixtureAccountCommand {
    async fn register(&self, request: RegisterAccountRequest) -> Result<AccountSummary, Error> {
        Ok(AccountSummary {
            email: request.email,
            display_name: request.display_name,
        })
    }
}
