//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, and the
//! error schema wrappers. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::accounts::{
    AccountProfileBody, AccountSummaryBody, PastRunBody, RegisterAccountRequestBody,
};
use crate::inbound::http::route_lookup::RouteLookupRequestBody;
use crate::inbound::http::runs::{
    ActiveRunBody, RouteResponseBody, RunAccountRequestBody, RunStatusResponseBody,
    StartRunRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::validation::LatLngBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Running Late API",
        description = "Start, route, and end runs for registered accounts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::runs::start_run,
        crate::inbound::http::runs::resolve_run_route,
        crate::inbound::http::runs::end_run,
        crate::inbound::http::runs::run_status,
        crate::inbound::http::accounts::register_account,
        crate::inbound::http::accounts::account_profile,
        crate::inbound::http::route_lookup::compute_route,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LatLngBody,
        StartRunRequestBody,
        RunAccountRequestBody,
        RouteResponseBody,
        RunStatusResponseBody,
        ActiveRunBody,
        RouteLookupRequestBody,
        RegisterAccountRequestBody,
        AccountSummaryBody,
        AccountProfileBody,
        PastRunBody,
    )),
    tags(
        (name = "runs", description = "Run lifecycle for an account"),
        (name = "accounts", description = "Account registration and profiles"),
        (name = "routes", description = "Standalone route lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
