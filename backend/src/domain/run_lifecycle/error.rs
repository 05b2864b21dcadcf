//! Failures of the run lifecycle workflows.

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{AccountRepositoryError, RunRepositoryError};

/// Workflow step that was calling the route provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOperation {
    Start,
    ResolveRoute,
}

impl RouteOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ResolveRoute => "resolve_route",
        }
    }
}

impl std::fmt::Display for RouteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by [`super::RunLifecycleService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunLifecycleError {
    #[error("account {email} does not exist")]
    AccountNotFound { email: String },
    #[error("account {email} already has an active run")]
    RunAlreadyActive { email: String },
    #[error("account {email} has no active run")]
    NoActiveRun { email: String },
    #[error("account {email} has no active run to end")]
    NoActiveRunToEnd { email: String },
    /// The run stays started; retry with `resolve_route`.
    #[error("route lookup failed during {operation}: {cause}")]
    RouteLookupFailed {
        operation: RouteOperation,
        cause: String,
    },
    #[error("provisional arrival of {hours}h is beyond the supported calendar")]
    ProvisionalArrivalOutOfRange { hours: i64 },
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },
    #[error("store failure: {message}")]
    StoreFailure { message: String },
}

impl From<AccountRepositoryError> for RunLifecycleError {
    fn from(value: AccountRepositoryError) -> Self {
        match value {
            AccountRepositoryError::Connection { message } => Self::StoreUnavailable { message },
            other => Self::StoreFailure {
                message: other.to_string(),
            },
        }
    }
}

impl RunLifecycleError {
    /// Map a run store error, resolving domain conflicts against `email`.
    pub(super) fn from_run_store(error: RunRepositoryError, email: &str) -> Self {
        match error {
            RunRepositoryError::Connection { message } => Self::StoreUnavailable { message },
            RunRepositoryError::Query { message } => Self::StoreFailure { message },
            RunRepositoryError::AccountNotFound { .. } => Self::AccountNotFound {
                email: email.to_owned(),
            },
            RunRepositoryError::RunAlreadyActive { .. } => Self::RunAlreadyActive {
                email: email.to_owned(),
            },
            RunRepositoryError::RunNotFound { .. } => Self::NoActiveRun {
                email: email.to_owned(),
            },
        }
    }
}

impl From<RunLifecycleError> for Error {
    fn from(value: RunLifecycleError) -> Self {
        let message = value.to_string();
        match value {
            RunLifecycleError::AccountNotFound { email } => {
                Error::not_found(message).with_details(json!({ "email": email }))
            }
            RunLifecycleError::RunAlreadyActive { .. }
            | RunLifecycleError::NoActiveRun { .. }
            | RunLifecycleError::NoActiveRunToEnd { .. } => Error::conflict(message),
            RunLifecycleError::RouteLookupFailed { operation, .. } => {
                Error::upstream_failure(message).with_details(json!({
                    "operation": operation.as_str(),
                    "retryable": true,
                }))
            }
            RunLifecycleError::StoreUnavailable { .. } => Error::service_unavailable(message),
            RunLifecycleError::StoreFailure { .. }
            | RunLifecycleError::ProvisionalArrivalOutOfRange { .. } => Error::internal(message),
        }
    }
}
