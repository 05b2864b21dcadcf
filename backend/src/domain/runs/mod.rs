//! Run entities: the active run, its archived form, and their value types.

mod active;
mod coordinates;
mod historical;
mod pace;
mod route;

pub use active::{ActiveRun, ActiveRunId, ActiveRunParts, RouteResolution, RunPlan};
pub use coordinates::{CoordinatesValidationError, LatLng};
pub use historical::{HistoricalRun, HistoricalRunId};
pub use pace::{Pace, PaceParseError, UNAVAILABLE_PACE};
pub use route::{MAX_DISTANCE_METERS, RouteResult};

/// Lifecycle state of an account's run, derived from its active run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NoActiveRun,
    ActiveRunPendingRoute,
    ActiveRunRouted,
}

impl RunState {
    /// Derive the state from an optional active run.
    pub fn of(run: Option<&ActiveRun>) -> Self {
        run.map_or(Self::NoActiveRun, ActiveRun::state)
    }
}
