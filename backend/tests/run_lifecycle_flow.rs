//! End-to-end run lifecycle against the in-process store.

mod support;

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use running_late::domain::ports::{
    AccountQuery, RouteProvider, RouteProviderError, RunLifecycleCommand, RunStatusQuery,
    StartRunRequest,
};
use running_late::domain::{
    AccountService, ErrorCode, RouteResolution, RunLifecycleConfig, RunLifecycleService, RunPlan,
    RunState,
};
use running_late::outbound::memory::InMemoryRunStore;

use support::{
    FrozenClock, ROUTED_DISTANCE, ScriptedProvider, StalledProvider, email, point, register,
};

struct Harness<P> {
    runs: RunLifecycleService<InMemoryRunStore, InMemoryRunStore, P>,
    accounts: AccountService<InMemoryRunStore, InMemoryRunStore>,
    provider: Arc<P>,
}

fn harness<P: RouteProvider + 'static>(provider: P, config: RunLifecycleConfig) -> Harness<P> {
    let store = Arc::new(InMemoryRunStore::new());
    let provider = Arc::new(provider);
    Harness {
        runs: RunLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&provider),
            Arc::new(FrozenClock::morning()),
            config,
        ),
        accounts: AccountService::new(Arc::clone(&store), store),
        provider,
    }
}

#[fixture]
async fn scripted() -> Harness<ScriptedProvider> {
    let harness = harness(ScriptedProvider::default(), RunLifecycleConfig::default());
    register(&harness.accounts, "a@x.com").await;
    harness
}

fn start_request(raw_email: &str) -> StartRunRequest {
    StartRunRequest {
        email: email(raw_email),
        plan: RunPlan::new(point(0.0, 0.0), point(0.0, 1.0)),
    }
}

#[rstest]
#[tokio::test]
async fn start_then_end_archives_exactly_one_run(
    #[future] scripted: Harness<ScriptedProvider>,
) {
    let h = scripted.await;

    let route = h.runs.start(start_request("a@x.com")).await.expect("run starts");
    assert_eq!(route.distance_meters, ROUTED_DISTANCE);
    h.runs.end(&email("a@x.com")).await.expect("run ends");

    let status = h.runs.status(&email("a@x.com")).await.expect("status");
    assert_eq!(status.state, RunState::NoActiveRun);
    let profile = h.accounts.profile(&email("a@x.com")).await.expect("profile");
    assert_eq!(profile.past_runs.len(), 1);
    assert_eq!(profile.past_runs[0].distance_meters, ROUTED_DISTANCE);
    assert_eq!(profile.past_runs[0].average_pace.to_string(), "N/A");
}

#[rstest]
#[tokio::test]
async fn second_start_conflicts_and_keeps_the_first_run(
    #[future] scripted: Harness<ScriptedProvider>,
) {
    let h = scripted.await;
    h.runs.start(start_request("a@x.com")).await.expect("first start");
    let first = h
        .runs
        .status(&email("a@x.com"))
        .await
        .expect("status")
        .active_run
        .expect("active run");

    let err = h
        .runs
        .start(StartRunRequest {
            email: email("a@x.com"),
            plan: RunPlan::new(point(10.0, 10.0), point(10.0, 11.0)),
        })
        .await
        .expect_err("second start conflicts");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let still = h
        .runs
        .status(&email("a@x.com"))
        .await
        .expect("status")
        .active_run
        .expect("active run");
    assert_eq!(still.id(), first.id());
    assert_eq!(still.origin(), point(0.0, 0.0));
    assert_eq!(h.provider.calls(), 1);
}

#[rstest]
#[tokio::test]
async fn ending_twice_never_archives_twice(#[future] scripted: Harness<ScriptedProvider>) {
    let h = scripted.await;
    h.runs.start(start_request("a@x.com")).await.expect("run starts");
    h.runs.end(&email("a@x.com")).await.expect("first end");

    let err = h.runs.end(&email("a@x.com")).await.expect_err("second end");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let profile = h.accounts.profile(&email("a@x.com")).await.expect("profile");
    assert_eq!(profile.past_runs.len(), 1);
}

#[rstest]
#[tokio::test]
async fn ending_without_a_run_writes_nothing(#[future] scripted: Harness<ScriptedProvider>) {
    let h = scripted.await;

    let err = h.runs.end(&email("a@x.com")).await.expect_err("nothing to end");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let profile = h.accounts.profile(&email("a@x.com")).await.expect("profile");
    assert!(profile.past_runs.is_empty());
}

#[rstest]
#[tokio::test]
async fn failed_lookup_leaves_a_pending_run_that_retry_resolves() {
    let h = harness(
        ScriptedProvider::failing_once(RouteProviderError::transport("connection reset")),
        RunLifecycleConfig::default(),
    );
    register(&h.accounts, "a@x.com").await;

    let err = h
        .runs
        .start(start_request("a@x.com"))
        .await
        .expect_err("lookup fails");
    assert_eq!(err.code(), ErrorCode::UpstreamFailure);
    let pending = h
        .runs
        .status(&email("a@x.com"))
        .await
        .expect("status");
    assert_eq!(pending.state, RunState::ActiveRunPendingRoute);
    let pending_id = pending.active_run.expect("run kept").id();

    let route = h
        .runs
        .resolve_route(&email("a@x.com"))
        .await
        .expect("retry succeeds");

    assert_eq!(route.distance_meters, ROUTED_DISTANCE);
    let routed = h
        .runs
        .status(&email("a@x.com"))
        .await
        .expect("status")
        .active_run
        .expect("same run");
    assert_eq!(routed.id(), pending_id);
    assert_eq!(
        routed.route(),
        RouteResolution::Resolved {
            distance_meters: ROUTED_DISTANCE
        }
    );
    assert_eq!(h.provider.calls(), 2);
}

#[rstest]
#[tokio::test]
async fn unknown_accounts_are_not_found_without_side_effects(
    #[future] scripted: Harness<ScriptedProvider>,
) {
    let h = scripted.await;

    let err = h
        .runs
        .start(start_request("ghost@x.com"))
        .await
        .expect_err("unknown account");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(h.provider.calls(), 0);
    let ghost = h.accounts.profile(&email("ghost@x.com")).await;
    assert_eq!(ghost.map(|_| ()).map_err(|e| e.code()), Err(ErrorCode::NotFound));
}

#[tokio::test(start_paused = true)]
async fn timeouts_behave_like_lookup_failures() {
    let h = harness(
        StalledProvider,
        RunLifecycleConfig::default().with_route_timeout(Duration::from_millis(200)),
    );
    register(&h.accounts, "a@x.com").await;

    let err = h
        .runs
        .start(start_request("a@x.com"))
        .await
        .expect_err("lookup times out");

    assert_eq!(err.code(), ErrorCode::UpstreamFailure);
    let status = h.runs.status(&email("a@x.com")).await.expect("status");
    assert_eq!(status.state, RunState::ActiveRunPendingRoute);

    h.runs.end(&email("a@x.com")).await.expect("pending runs can end");
    let profile = h.accounts.profile(&email("a@x.com")).await.expect("profile");
    assert_eq!(profile.past_runs[0].distance_meters, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_starts_admit_exactly_one_run() {
    let h = harness(ScriptedProvider::default(), RunLifecycleConfig::default());
    register(&h.accounts, "a@x.com").await;

    let attempts = (0..8).map(|_| {
        let runs = h.runs.clone();
        tokio::spawn(async move { runs.start(start_request("a@x.com")).await })
    });
    let mut successes = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await.expect("task completes") {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err.code(), ErrorCode::Conflict),
        }
    }

    assert_eq!(successes, 1);
}
