//! Pluggable pace computation.

use chrono::{DateTime, Utc};

use crate::domain::{ActiveRun, Pace, RunPlan};

/// Computes the pace a runner needs and the pace they achieved.
#[cfg_attr(test, mockall::automock)]
pub trait PaceStrategy: Send + Sync {
    /// Pace required to reach the destination on time.
    fn required_pace(&self, plan: &RunPlan) -> Pace;

    /// Average pace achieved over a run ending at `completed_at`.
    fn average_pace(&self, run: &ActiveRun, completed_at: DateTime<Utc>) -> Pace;
}

/// Default strategy: no pace model, every pace is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePace;

impl PaceStrategy for UnavailablePace {
    fn required_pace(&self, _plan: &RunPlan) -> Pace {
        Pace::Unavailable
    }

    fn average_pace(&self, _run: &ActiveRun, _completed_at: DateTime<Utc>) -> Pace {
        Pace::Unavailable
    }
}
