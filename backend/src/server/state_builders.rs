//! Wiring of domain services onto the configured adapters.
//!
//! Store: Diesel repositories when a pool is configured, otherwise the
//! in-process store. Route provider: Google Routes when an API key is
//! configured, otherwise the fixture provider.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use running_late::domain::ports::{
    AccountRepository, FixtureRouteProvider, RouteProvider, RunRepository,
};
use running_late::domain::{
    AccountService, RouteLookupService, RunLifecycleConfig, RunLifecycleService,
};
use running_late::inbound::http::state::HttpState;
use running_late::outbound::memory::InMemoryRunStore;
use running_late::outbound::persistence::{DieselAccountRepository, DieselRunRepository};

use super::ServerConfig;

fn wire<A, R, P>(
    accounts: Arc<A>,
    runs: Arc<R>,
    provider: Arc<P>,
    clock: Arc<dyn Clock>,
    lifecycle: RunLifecycleConfig,
) -> HttpState
where
    A: AccountRepository + 'static,
    R: RunRepository + 'static,
    P: RouteProvider + 'static,
{
    let run_service = Arc::new(RunLifecycleService::new(
        Arc::clone(&accounts),
        Arc::clone(&runs),
        Arc::clone(&provider),
        clock,
        lifecycle,
    ));
    let account_service = Arc::new(AccountService::new(accounts, runs));
    let routes = Arc::new(RouteLookupService::with_timeout(
        provider,
        lifecycle.route_timeout,
    ));

    HttpState {
        runs: run_service.clone(),
        run_status: run_service,
        accounts: account_service.clone(),
        profiles: account_service,
        routes,
    }
}

fn wire_with_provider<A, R>(config: &ServerConfig, accounts: Arc<A>, runs: Arc<R>) -> HttpState
where
    A: AccountRepository + 'static,
    R: RunRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.route_provider {
        Some(provider) => {
            info!(provider = ?provider, "using Google Routes provider");
            wire(accounts, runs, Arc::clone(provider), clock, config.lifecycle)
        }
        None => {
            info!("no routes API key configured; using fixture route provider");
            wire(
                accounts,
                runs,
                Arc::new(FixtureRouteProvider),
                clock,
                config.lifecycle,
            )
        }
    }
}

/// Build the HTTP state for `config`.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL run store");
            wire_with_provider(
                config,
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DieselRunRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; using in-process run store");
            let store = Arc::new(InMemoryRunStore::new());
            wire_with_provider(config, Arc::clone(&store), store)
        }
    }
}
