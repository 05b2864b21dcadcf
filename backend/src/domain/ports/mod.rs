//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod account_repository;
mod pace_strategy;
mod route_lookup_query;
mod route_provider;
mod run_lifecycle_command;
mod run_repository;
mod run_status_query;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{
    AccountCommand, AccountSummary, FixtureAccountCommand, RegisterAccountRequest,
};
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::{AccountProfile, AccountQuery, FixtureAccountQuery};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError, FixtureAccountRepository};
#[cfg(test)]
pub use pace_strategy::MockPaceStrategy;
pub use pace_strategy::{PaceStrategy, UnavailablePace};
#[cfg(test)]
pub use route_lookup_query::MockRouteLookupQuery;
pub use route_lookup_query::{FixtureRouteLookupQuery, RouteLookupQuery};
#[cfg(test)]
pub use route_provider::MockRouteProvider;
pub use route_provider::{
    FIXTURE_ROUTE_DISTANCE_METERS, FIXTURE_ROUTE_POLYLINE, FixtureRouteProvider, RouteProvider,
    RouteProviderError,
};
#[cfg(test)]
pub use run_lifecycle_command::MockRunLifecycleCommand;
pub use run_lifecycle_command::{
    EndRunResponse, FixtureRunLifecycleCommand, RunLifecycleCommand, StartRunRequest,
};
#[cfg(test)]
pub use run_repository::MockRunRepository;
pub use run_repository::{FixtureRunRepository, RunRepository, RunRepositoryError};
#[cfg(test)]
pub use run_status_query::MockRunStatusQuery;
pub use run_status_query::{FixtureRunStatusQuery, RunStatus, RunStatusQuery};
