//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, FixtureAccountCommand, FixtureAccountQuery,
    FixtureRouteLookupQuery, FixtureRunLifecycleCommand, FixtureRunStatusQuery, RouteLookupQuery,
    RunLifecycleCommand, RunStatusQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub runs: Arc<dyn RunLifecycleCommand>,
    pub run_status: Arc<dyn RunStatusQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn AccountQuery>,
    pub routes: Arc<dyn RouteLookupQuery>,
}

impl HttpState {
    /// State backed entirely by fixture ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use running_late::domain::ports::FixtureAccountQuery;
    /// use running_late::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures().with_profiles(Arc::new(FixtureAccountQuery));
    /// let _runs = state.runs.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self {
            runs: Arc::new(FixtureRunLifecycleCommand),
            run_status: Arc::new(FixtureRunStatusQuery),
            accounts: Arc::new(FixtureAccountCommand),
            profiles: Arc::new(FixtureAccountQuery),
            routes: Arc::new(FixtureRouteLookupQuery),
        }
    }

    #[must_use]
    pub fn with_runs(mut self, runs: Arc<dyn RunLifecycleCommand>) -> Self {
        self.runs = runs;
        self
    }

    #[must_use]
    pub fn with_run_status(mut self, run_status: Arc<dyn RunStatusQuery>) -> Self {
        self.run_status = run_status;
        self
    }

    #[must_use]
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountCommand>) -> Self {
        self.accounts = accounts;
        self
    }

    #[must_use]
    pub fn with_profiles(mut self, profiles: Arc<dyn AccountQuery>) -> Self {
        self.profiles = profiles;
        self
    }

    #[must_use]
    pub fn with_routes(mut self, routes: Arc<dyn RouteLookupQuery>) -> Self {
        self.routes = routes;
        self
    }
}
