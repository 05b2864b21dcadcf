//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, Email};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// Another account already uses the email address.
        EmailTaken { email: String } =>
            "email already registered: {email}",
    }
}

/// Port for creating and looking up accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account; fails with `EmailTaken` on a duplicate email.
    async fn create(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Find an account by its email address.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRepository;

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn create(&self, _account: &Account) -> Result<(), AccountRepositoryError> {
        Ok(())
    }

    async fn find_by_email(
        &self,
        _email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookup_finds_nothing() {
        let email = Email::new("a@x.com").expect("email");
        let found = FixtureAccountRepository
            .find_by_email(&email)
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    fn email_taken_names_the_address() {
        let err = AccountRepositoryError::email_taken("a@x.com");
        assert_eq!(err.to_string(), "email already registered: a@x.com");
    }
}
