//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, active_runs, historical_runs};
use crate::domain::{
    Account, AccountId, ActiveRun, ActiveRunId, ActiveRunParts, ActiveRunSlot, Credential,
    DisplayName, Email, HistoricalRun, HistoricalRunId, LatLng, Pace, RouteResolution,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub credential: String,
    pub active_run_id: Option<Uuid>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub credential: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = active_runs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ActiveRunRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub started_at: DateTime<Utc>,
    pub target_arrival_at: DateTime<Utc>,
    pub required_pace: String,
    pub distance_meters: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = historical_runs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoricalRunRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub distance_meters: i32,
    pub average_pace: String,
    pub completed_at: DateTime<Utc>,
}

fn point(latitude: f64, longitude: f64) -> Result<LatLng, String> {
    LatLng::new(latitude, longitude).map_err(|err| format!("stored coordinates invalid: {err}"))
}

fn pace(text: &str) -> Result<Pace, String> {
    text.parse::<Pace>().map_err(|err| err.to_string())
}

fn stored_distance(distance_meters: u32) -> Result<i32, String> {
    i32::try_from(distance_meters)
        .map_err(|_| format!("distance {distance_meters}m exceeds the stored range"))
}

fn loaded_distance(distance_meters: i32) -> Result<u32, String> {
    u32::try_from(distance_meters)
        .map_err(|_| format!("stored distance {distance_meters}m is negative"))
}

impl AccountRow {
    pub(crate) fn into_domain(self) -> Result<Account, String> {
        let email = Email::new(&self.email).map_err(|err| format!("stored email invalid: {err}"))?;
        let display_name = DisplayName::new(&self.display_name)
            .map_err(|err| format!("stored display name invalid: {err}"))?;
        let credential =
            Credential::new(self.credential).map_err(|err| format!("stored credential invalid: {err}"))?;
        let slot = ActiveRunSlot::from_option(self.active_run_id.map(ActiveRunId::from_uuid));
        Ok(Account::new(
            AccountId::from_uuid(self.id),
            email,
            display_name,
            credential,
            slot,
        ))
    }
}

impl<'a> NewAccountRow<'a> {
    pub(crate) fn from_domain(account: &'a Account) -> Self {
        Self {
            id: *account.id().as_uuid(),
            email: account.email().as_ref(),
            display_name: account.display_name().as_ref(),
            credential: account.credential().expose(),
        }
    }
}

impl ActiveRunRow {
    pub(crate) fn from_domain(run: &ActiveRun) -> Result<Self, String> {
        Ok(Self {
            id: *run.id().as_uuid(),
            account_id: *run.account_id().as_uuid(),
            origin_lat: run.origin().latitude(),
            origin_lng: run.origin().longitude(),
            destination_lat: run.destination().latitude(),
            destination_lng: run.destination().longitude(),
            started_at: run.started_at(),
            target_arrival_at: run.target_arrival_at(),
            required_pace: run.required_pace().to_string(),
            distance_meters: run.route().distance_meters().map(stored_distance).transpose()?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<ActiveRun, String> {
        let distance = self.distance_meters.map(loaded_distance).transpose()?;
        Ok(ActiveRun::from_parts(ActiveRunParts {
            id: ActiveRunId::from_uuid(self.id),
            account_id: AccountId::from_uuid(self.account_id),
            origin: point(self.origin_lat, self.origin_lng)?,
            destination: point(self.destination_lat, self.destination_lng)?,
            started_at: self.started_at,
            target_arrival_at: self.target_arrival_at,
            required_pace: pace(&self.required_pace)?,
            route: RouteResolution::from_distance(distance),
        }))
    }
}

impl HistoricalRunRow {
    pub(crate) fn from_domain(run: &HistoricalRun) -> Result<Self, String> {
        Ok(Self {
            id: *run.id.as_uuid(),
            account_id: *run.account_id.as_uuid(),
            origin_lat: run.origin.latitude(),
            origin_lng: run.origin.longitude(),
            destination_lat: run.destination.latitude(),
            destination_lng: run.destination.longitude(),
            distance_meters: stored_distance(run.distance_meters)?,
            average_pace: run.average_pace.to_string(),
            completed_at: run.completed_at,
        })
    }

    pub(crate) fn into_domain(self) -> Result<HistoricalRun, String> {
        Ok(HistoricalRun {
            id: HistoricalRunId::from_uuid(self.id),
            account_id: AccountId::from_uuid(self.account_id),
            origin: point(self.origin_lat, self.origin_lng)?,
            destination: point(self.destination_lat, self.destination_lng)?,
            distance_meters: loaded_distance(self.distance_meters)?,
            average_pace: pace(&self.average_pace)?,
            completed_at: self.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::RunPlan;

    fn run() -> ActiveRun {
        let started = Utc.with_ymd_and_hms(2026, 3, 1, 7, 0, 0).single().expect("time");
        let plan = RunPlan::new(
            LatLng::new(51.5, -0.12).expect("origin"),
            LatLng::new(51.51, -0.1).expect("destination"),
        );
        ActiveRun::begin(
            AccountId::random(),
            &plan,
            started,
            started + chrono::Duration::minutes(30),
            Pace::Unavailable,
        )
    }

    #[rstest]
    fn pending_runs_store_a_null_distance() {
        let row = ActiveRunRow::from_domain(&run()).expect("row");
        assert_eq!(row.distance_meters, None);
        assert_eq!(row.required_pace, "N/A");
    }

    #[rstest]
    fn active_rows_restore_the_route() {
        let original = run().with_route(1500);
        let restored = ActiveRunRow::from_domain(&original)
            .expect("row")
            .into_domain()
            .expect("domain");
        assert_eq!(restored.route(), RouteResolution::Resolved { distance_meters: 1500 });
        assert_eq!(restored.id(), original.id());
    }

    #[rstest]
    fn negative_stored_distances_are_rejected() {
        let mut row = HistoricalRunRow::from_domain(&HistoricalRun::archive(
            &run(),
            Pace::Unavailable,
            Utc::now(),
        ))
        .expect("row");
        row.distance_meters = -1;
        let err = row.into_domain().expect_err("negative distance");
        assert!(err.contains("negative"));
    }

    #[rstest]
    fn oversized_distances_cannot_be_stored() {
        let err = ActiveRunRow::from_domain(&run().with_route(u32::MAX)).expect_err("too large");
        assert!(err.contains("exceeds"));
    }

    #[rstest]
    fn corrupt_account_emails_surface_as_errors() {
        let row = AccountRow {
            id: uuid::Uuid::new_v4(),
            email: "not-an-email".to_owned(),
            display_name: "Ada".to_owned(),
            credential: "secret".to_owned(),
            active_run_id: None,
        };
        assert!(row.into_domain().is_err());
    }
}
