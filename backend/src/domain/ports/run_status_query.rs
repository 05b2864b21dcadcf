//! Driving port for reading an account's run state.

use async_trait::async_trait;

use crate::domain::{ActiveRun, Email, Error, RunState};

/// Current lifecycle state and the active run behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatus {
    pub state: RunState,
    pub active_run: Option<ActiveRun>,
}

impl RunStatus {
    pub fn idle() -> Self {
        Self {
            state: RunState::NoActiveRun,
            active_run: None,
        }
    }

    pub fn of(active_run: Option<ActiveRun>) -> Self {
        Self {
            state: RunState::of(active_run.as_ref()),
            active_run,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RunStatusQuery: Send + Sync {
    async fn status(&self, email: &Email) -> Result<RunStatus, Error>;
}

/// Fixture query reporting no active run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRunStatusQuery;

#[async_trait]
impl RunStatusQuery for FixtureRunStatusQuery {
    async fn status(&self, _email: &Email) -> Result<RunStatus, Error> {
        Ok(RunStatus::idle())
    }
}
