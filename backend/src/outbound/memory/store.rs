//! Account and run store held in process memory.
//!
//! All state sits behind one async mutex, so each port operation observes and
//! mutates accounts and runs together. That gives the same atomic transitions
//! the database adapter gets from transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, RunRepository, RunRepositoryError,
};
use crate::domain::{
    Account, AccountId, ActiveRun, ActiveRunId, ActiveRunSlot, Email, HistoricalRun,
    MAX_DISTANCE_METERS,
};

#[derive(Debug, Default)]
struct StoreState {
    accounts: HashMap<AccountId, Account>,
    account_ids_by_email: HashMap<String, AccountId>,
    active_runs: HashMap<ActiveRunId, ActiveRun>,
    history: Vec<HistoricalRun>,
}

/// Volatile implementation of the account and run repositories.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    state: Mutex<StoreState>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryRunStore {
    async fn create(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut state = self.state.lock().await;
        let email = account.email().as_ref();
        if state.account_ids_by_email.contains_key(email) {
            return Err(AccountRepositoryError::email_taken(email));
        }
        state
            .account_ids_by_email
            .insert(email.to_owned(), account.id());
        state.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .account_ids_by_email
            .get(email.as_ref())
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }
}

#[async_trait]
impl RunRepository for InMemoryRunStore {
    async fn begin_run(&self, run: &ActiveRun) -> Result<(), RunRepositoryError> {
        let mut state = self.state.lock().await;
        let owner_id = run.account_id();
        let owner = state
            .accounts
            .get(&owner_id)
            .ok_or_else(|| RunRepositoryError::account_not_found(owner_id.to_string()))?;
        let owner_has_run = !owner.active_run().is_idle()
            || state.active_runs.values().any(|r| r.account_id() == owner_id);
        if owner_has_run {
            return Err(RunRepositoryError::run_already_active(owner_id.to_string()));
        }

        let linked = owner
            .clone()
            .with_active_run(ActiveRunSlot::Occupied(run.id()));
        state.accounts.insert(owner_id, linked);
        state.active_runs.insert(run.id(), run.clone());
        Ok(())
    }

    async fn find_active_run(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ActiveRun>, RunRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .get(account_id)
            .and_then(|account| account.active_run().run_id())
            .and_then(|run_id| state.active_runs.get(&run_id))
            .cloned())
    }

    async fn record_route(
        &self,
        run_id: &ActiveRunId,
        distance_meters: u32,
    ) -> Result<(), RunRepositoryError> {
        if distance_meters > MAX_DISTANCE_METERS {
            return Err(RunRepositoryError::query(format!(
                "distance {distance_meters}m exceeds the stored range"
            )));
        }
        let mut state = self.state.lock().await;
        let run = state
            .active_runs
            .remove(run_id)
            .ok_or_else(|| RunRepositoryError::run_not_found(run_id.to_string()))?;
        state
            .active_runs
            .insert(*run_id, run.with_route(distance_meters));
        Ok(())
    }

    async fn archive_run(
        &self,
        run_id: &ActiveRunId,
        historical: &HistoricalRun,
    ) -> Result<(), RunRepositoryError> {
        let mut state = self.state.lock().await;
        let run = state
            .active_runs
            .remove(run_id)
            .ok_or_else(|| RunRepositoryError::run_not_found(run_id.to_string()))?;

        if let Some(owner) = state.accounts.remove(&run.account_id()) {
            let cleared = if owner.active_run() == ActiveRunSlot::Occupied(*run_id) {
                owner.with_active_run(ActiveRunSlot::Idle)
            } else {
                owner
            };
            state.accounts.insert(cleared.id(), cleared);
        }
        state.history.push(historical.clone());
        Ok(())
    }

    async fn list_history(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<HistoricalRun>, RunRepositoryError> {
        let state = self.state.lock().await;
        let mut runs: Vec<HistoricalRun> = state
            .history
            .iter()
            .filter(|run| run.account_id == *account_id)
            .cloned()
            .collect();
        runs.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Credential, DisplayName, LatLng, Pace, RouteResolution, RunPlan};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 7, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn account(raw_email: &str) -> Account {
        Account::register(
            Email::new(raw_email).expect("email"),
            DisplayName::new("Ada").expect("name"),
            Credential::new("secret").expect("credential"),
        )
    }

    fn run_for(owner: &Account, started_at: DateTime<Utc>) -> ActiveRun {
        let plan = RunPlan::new(
            LatLng::new(0.0, 0.0).expect("origin"),
            LatLng::new(0.0, 1.0).expect("destination"),
        );
        ActiveRun::begin(
            owner.id(),
            &plan,
            started_at,
            started_at + Duration::hours(1),
            Pace::Unavailable,
        )
    }

    async fn store_with(owner: &Account) -> InMemoryRunStore {
        let store = InMemoryRunStore::new();
        store.create(owner).await.expect("account created");
        store
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let store = store_with(&account("a@x.com")).await;
        let err = store
            .create(&account("a@x.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, AccountRepositoryError::email_taken("a@x.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn begin_run_links_both_sides(now: DateTime<Utc>) {
        let owner = account("a@x.com");
        let store = store_with(&owner).await;
        let run = run_for(&owner, now);

        store.begin_run(&run).await.expect("run begins");

        let linked = store
            .find_by_email(owner.email())
            .await
            .expect("lookup")
            .expect("account exists");
        assert_eq!(linked.active_run(), ActiveRunSlot::Occupied(run.id()));
        let found = store.find_active_run(&owner.id()).await.expect("lookup");
        assert_eq!(found, Some(run));
    }

    #[rstest]
    #[tokio::test]
    async fn second_run_is_rejected_and_first_kept(now: DateTime<Utc>) {
        let owner = account("a@x.com");
        let store = store_with(&owner).await;
        let first = run_for(&owner, now);
        store.begin_run(&first).await.expect("first run");

        let err = store
            .begin_run(&run_for(&owner, now))
            .await
            .expect_err("second run");

        assert!(matches!(err, RunRepositoryError::RunAlreadyActive { .. }));
        let kept = store.find_active_run(&owner.id()).await.expect("lookup");
        assert_eq!(kept.map(|run| run.id()), Some(first.id()));
    }

    #[rstest]
    #[tokio::test]
    async fn begin_run_requires_the_owner(now: DateTime<Utc>) {
        let store = InMemoryRunStore::new();
        let err = store
            .begin_run(&run_for(&account("ghost@x.com"), now))
            .await
            .expect_err("no owner");
        assert!(matches!(err, RunRepositoryError::AccountNotFound { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn archive_clears_the_slot_once(now: DateTime<Utc>) {
        let owner = account("a@x.com");
        let store = store_with(&owner).await;
        let run = run_for(&owner, now);
        store.begin_run(&run).await.expect("run begins");
        store.record_route(&run.id(), 1500).await.expect("routed");
        let routed = store
            .find_active_run(&owner.id())
            .await
            .expect("lookup")
            .expect("run present");
        let historical = HistoricalRun::archive(&routed, Pace::Unavailable, now);

        store
            .archive_run(&run.id(), &historical)
            .await
            .expect("archived");
        let again = store.archive_run(&run.id(), &historical).await;

        assert!(matches!(again, Err(RunRepositoryError::RunNotFound { .. })));
        let history = store.list_history(&owner.id()).await.expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].distance_meters, 1500);
        assert!(
            store
                .find_active_run(&owner.id())
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn history_is_newest_first(now: DateTime<Utc>) {
        let owner = account("a@x.com");
        let store = store_with(&owner).await;

        for offset in [0, 2, 1] {
            let run = run_for(&owner, now + Duration::days(offset));
            store.begin_run(&run).await.expect("run begins");
            let historical =
                HistoricalRun::archive(&run, Pace::Unavailable, now + Duration::days(offset));
            store
                .archive_run(&run.id(), &historical)
                .await
                .expect("archived");
        }

        let history = store.list_history(&owner.id()).await.expect("history");
        let completed: Vec<_> = history.iter().map(|run| run.completed_at).collect();
        assert_eq!(
            completed,
            vec![
                now + Duration::days(2),
                now + Duration::days(1),
                now
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn record_route_on_missing_run_fails() {
        let store = InMemoryRunStore::new();
        let err = store
            .record_route(&ActiveRunId::random(), 10)
            .await
            .expect_err("missing run");
        assert!(matches!(err, RunRepositoryError::RunNotFound { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn record_route_rejects_unstorable_distances(now: DateTime<Utc>) {
        let owner = account("a@x.com");
        let store = store_with(&owner).await;
        let run = run_for(&owner, now);
        store.begin_run(&run).await.expect("run begins");

        let err = store
            .record_route(&run.id(), MAX_DISTANCE_METERS + 1)
            .await
            .expect_err("distance too large");

        assert!(matches!(err, RunRepositoryError::Query { .. }));
        let stored = store
            .find_active_run(&owner.id())
            .await
            .expect("lookup")
            .expect("run kept");
        assert_eq!(stored.route(), RouteResolution::Pending);
    }
}
