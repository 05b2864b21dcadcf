//! The run an account is currently performing.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{LatLng, Pace, RunState};
use crate::domain::account::AccountId;

/// Identifier of an active run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveRunId(Uuid);

impl ActiveRunId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ActiveRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Progress of the route lookup for an active run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteResolution {
    #[default]
    Pending,
    Resolved { distance_meters: u32 },
}

impl RouteResolution {
    /// Build from a nullable stored distance.
    pub fn from_distance(distance_meters: Option<u32>) -> Self {
        distance_meters.map_or(Self::Pending, |distance_meters| Self::Resolved {
            distance_meters,
        })
    }

    /// Resolved distance, if any.
    pub fn distance_meters(&self) -> Option<u32> {
        match self {
            Self::Pending => None,
            Self::Resolved { distance_meters } => Some(*distance_meters),
        }
    }
}

/// Inputs supplied by the runner when starting a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub origin: LatLng,
    pub destination: LatLng,
    /// Free-form distance hint from the client; never persisted.
    pub distance_hint: Option<String>,
    pub needed_arrival: Option<DateTime<Utc>>,
}

impl RunPlan {
    pub fn new(origin: LatLng, destination: LatLng) -> Self {
        Self {
            origin,
            destination,
            distance_hint: None,
            needed_arrival: None,
        }
    }

    #[must_use]
    pub fn with_distance_hint(mut self, hint: impl Into<String>) -> Self {
        self.distance_hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_needed_arrival(mut self, at: DateTime<Utc>) -> Self {
        self.needed_arrival = Some(at);
        self
    }
}

/// A run in progress.
///
/// ## Invariants
/// - Owned by exactly one account; at most one per account.
/// - `route` moves from `Pending` to `Resolved` and may be refreshed, but
///   never returns to `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRun {
    id: ActiveRunId,
    account_id: AccountId,
    origin: LatLng,
    destination: LatLng,
    started_at: DateTime<Utc>,
    target_arrival_at: DateTime<Utc>,
    required_pace: Pace,
    route: RouteResolution,
}

/// Stored fields of an [`ActiveRun`].
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRunParts {
    pub id: ActiveRunId,
    pub account_id: AccountId,
    pub origin: LatLng,
    pub destination: LatLng,
    pub started_at: DateTime<Utc>,
    pub target_arrival_at: DateTime<Utc>,
    pub required_pace: Pace,
    pub route: RouteResolution,
}

impl ActiveRun {
    /// Start a new run awaiting its route.
    pub fn begin(
        account_id: AccountId,
        plan: &RunPlan,
        started_at: DateTime<Utc>,
        target_arrival_at: DateTime<Utc>,
        required_pace: Pace,
    ) -> Self {
        Self {
            id: ActiveRunId::random(),
            account_id,
            origin: plan.origin,
            destination: plan.destination,
            started_at,
            target_arrival_at,
            required_pace,
            route: RouteResolution::Pending,
        }
    }

    /// Rehydrate a stored run.
    pub fn from_parts(parts: ActiveRunParts) -> Self {
        let ActiveRunParts {
            id,
            account_id,
            origin,
            destination,
            started_at,
            target_arrival_at,
            required_pace,
            route,
        } = parts;
        Self {
            id,
            account_id,
            origin,
            destination,
            started_at,
            target_arrival_at,
            required_pace,
            route,
        }
    }

    pub fn id(&self) -> ActiveRunId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    pub fn destination(&self) -> LatLng {
        self.destination
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn target_arrival_at(&self) -> DateTime<Utc> {
        self.target_arrival_at
    }

    pub fn required_pace(&self) -> Pace {
        self.required_pace
    }

    pub fn route(&self) -> RouteResolution {
        self.route
    }

    /// Record the distance returned by the route provider.
    #[must_use]
    pub fn with_route(mut self, distance_meters: u32) -> Self {
        self.route = RouteResolution::Resolved { distance_meters };
        self
    }

    /// Lifecycle state implied by this run.
    pub fn state(&self) -> RunState {
        match self.route {
            RouteResolution::Pending => RunState::ActiveRunPendingRoute,
            RouteResolution::Resolved { .. } => RunState::ActiveRunRouted,
        }
    }
}
