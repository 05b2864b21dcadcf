//! Domain primitives, aggregates, and services.
//!
//! Purpose: model accounts and their runs, and orchestrate the run lifecycle
//! against the driven ports declared in [`ports`]. Nothing here knows about
//! HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Account, Email, DisplayName, Credential, ActiveRunSlot: account model.
//! - ActiveRun, HistoricalRun, LatLng, Pace, RunState: run model.
//! - RunLifecycleService, AccountService, RouteLookupService: driving port
//!   implementations.

pub mod account;
pub mod account_service;
pub mod error;
pub mod ports;
pub mod route_lookup_service;
pub mod run_lifecycle;
pub mod runs;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, AccountValidationError, ActiveRunSlot, Credential, DisplayName, Email,
};
pub use self::account_service::AccountService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::route_lookup_service::{DEFAULT_ROUTE_TIMEOUT, RouteLookupService};
pub use self::run_lifecycle::{
    RouteOperation, RunLifecycleConfig, RunLifecycleError, RunLifecycleService,
};
pub use self::runs::{
    ActiveRun, ActiveRunId, ActiveRunParts, CoordinatesValidationError, HistoricalRun,
    HistoricalRunId, LatLng, MAX_DISTANCE_METERS, Pace, PaceParseError, RouteResolution,
    RouteResult, RunPlan, RunState,
};
pub use self::trace_id::TraceId;
