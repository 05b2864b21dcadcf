//! Archived runs.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ActiveRun, LatLng, Pace};
use crate::domain::account::AccountId;

/// Identifier of an archived run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoricalRunId(Uuid);

impl HistoricalRunId {
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

impl fmt::Display for HistoricalRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Completed run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRun {
    pub id: HistoricalRunId,
    pub account_id: AccountId,
    pub origin: LatLng,
    pub destination: LatLng,
    /// Zero when the run ended before its route resolved.
    pub distance_meters: u32,
    pub average_pace: Pace,
    pub completed_at: DateTime<Utc>,
}

impl HistoricalRun {
    /// Archive an active run.
    pub fn archive(run: &ActiveRun, average_pace: Pace, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: HistoricalRunId::random(),
            account_id: run.account_id(),
            origin: run.origin(),
            destination: run.destination(),
            distance_meters: run.route().distance_meters().unwrap_or(0),
            average_pace,
            completed_at,
        }
    }
}
