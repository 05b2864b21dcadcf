//! Run lifecycle HTTP handlers.
//!
//! ```text
//! POST /api/v1/run/start
//! POST /api/v1/run/route
//! POST /api/v1/run/end
//! GET  /api/v1/run/{email}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{RunStatus, StartRunRequest};
use crate::domain::{ActiveRun, RouteResult, RunPlan, RunState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, LatLngBody, parse_email, parse_lat_lng, parse_optional_rfc3339_timestamp,
};

/// Request payload for starting a run.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartRunRequestBody {
    #[schema(example = "a@x.com")]
    pub email: String,
    pub origin: LatLngBody,
    pub destination: LatLngBody,
    /// When the runner must arrive; defaults to a provisional deadline.
    #[serde(default)]
    #[schema(format = "date-time")]
    pub needed_arrival_time: Option<String>,
    /// Free-form distance hint passed to the pace strategy.
    #[serde(default)]
    pub distance: Option<String>,
}

/// Request payload naming the account whose run is addressed.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunAccountRequestBody {
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Resolved route returned by start, retry, and standalone lookups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponseBody {
    #[schema(example = 1500)]
    pub distance_meters: u32,
    pub encoded_polyline: String,
}

impl From<RouteResult> for RouteResponseBody {
    fn from(value: RouteResult) -> Self {
        Self {
            distance_meters: value.distance_meters,
            encoded_polyline: value.encoded_polyline,
        }
    }
}

/// Active run as reported by the status endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRunBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub origin: LatLngBody,
    pub destination: LatLngBody,
    #[schema(format = "date-time")]
    pub started_at: String,
    #[schema(format = "date-time")]
    pub target_arrival_at: String,
    /// Seconds per kilometre, or `N/A`.
    pub required_pace: String,
    /// Absent while the route lookup is pending.
    pub distance_meters: Option<u32>,
}

impl From<ActiveRun> for ActiveRunBody {
    fn from(value: ActiveRun) -> Self {
        Self {
            id: value.id().to_string(),
            origin: value.origin().into(),
            destination: value.destination().into(),
            started_at: value.started_at().to_rfc3339(),
            target_arrival_at: value.target_arrival_at().to_rfc3339(),
            required_pace: value.required_pace().to_string(),
            distance_meters: value.route().distance_meters(),
        }
    }
}

/// Run status payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunStatusResponseBody {
    /// One of `no_active_run`, `active_run_pending_route`, `active_run_routed`.
    #[schema(example = "active_run_routed")]
    pub state: String,
    pub active_run: Option<ActiveRunBody>,
}

fn state_name(state: RunState) -> &'static str {
    match state {
        RunState::NoActiveRun => "no_active_run",
        RunState::ActiveRunPendingRoute => "active_run_pending_route",
        RunState::ActiveRunRouted => "active_run_routed",
    }
}

impl From<RunStatus> for RunStatusResponseBody {
    fn from(value: RunStatus) -> Self {
        Self {
            state: state_name(value.state).to_owned(),
            active_run: value.active_run.map(ActiveRunBody::from),
        }
    }
}

fn parse_start_request(payload: StartRunRequestBody) -> ApiResult<StartRunRequest> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    let origin = parse_lat_lng(payload.origin, FieldName::new("origin"))?;
    let destination = parse_lat_lng(payload.destination, FieldName::new("destination"))?;
    let needed_arrival = parse_optional_rfc3339_timestamp(
        payload.needed_arrival_time,
        FieldName::new("neededArrivalTime"),
    )?;

    let mut plan = RunPlan::new(origin, destination);
    if let Some(hint) = payload.distance.filter(|hint| !hint.trim().is_empty()) {
        plan = plan.with_distance_hint(hint);
    }
    if let Some(at) = needed_arrival {
        plan = plan.with_needed_arrival(at);
    }
    Ok(StartRunRequest { email, plan })
}

/// Start a run for the account and resolve its route.
///
/// The run stays active and pending when the route provider fails; retry the
/// lookup with `POST /api/v1/run/route`.
#[utoipa::path(
    post,
    path = "/api/v1/run/start",
    request_body = StartRunRequestBody,
    responses(
        (status = 200, description = "Run started and routed", body = RouteResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema),
        (status = 409, description = "Run already active", body = ErrorSchema),
        (status = 502, description = "Route lookup failed; run left pending", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["runs"],
    operation_id = "startRun"
)]
#[post("/run/start")]
pub async fn start_run(
    state: web::Data<HttpState>,
    payload: web::Json<StartRunRequestBody>,
) -> ApiResult<web::Json<RouteResponseBody>> {
    let request = parse_start_request(payload.into_inner())?;
    let route = state.runs.start(request).await?;
    Ok(web::Json(route.into()))
}

/// Retry or refresh the route of the account's active run.
#[utoipa::path(
    post,
    path = "/api/v1/run/route",
    request_body = RunAccountRequestBody,
    responses(
        (status = 200, description = "Route resolved", body = RouteResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema),
        (status = 409, description = "No active run", body = ErrorSchema),
        (status = 502, description = "Route lookup failed", body = ErrorSchema)
    ),
    tags = ["runs"],
    operation_id = "resolveRunRoute"
)]
#[post("/run/route")]
pub async fn resolve_run_route(
    state: web::Data<HttpState>,
    payload: web::Json<RunAccountRequestBody>,
) -> ApiResult<web::Json<RouteResponseBody>> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    let route = state.runs.resolve_route(&email).await?;
    Ok(web::Json(route.into()))
}

/// End the account's active run and archive it.
#[utoipa::path(
    post,
    path = "/api/v1/run/end",
    request_body = RunAccountRequestBody,
    responses(
        (status = 204, description = "Run archived"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema),
        (status = 409, description = "No active run to end", body = ErrorSchema)
    ),
    tags = ["runs"],
    operation_id = "endRun"
)]
#[post("/run/end")]
pub async fn end_run(
    state: web::Data<HttpState>,
    payload: web::Json<RunAccountRequestBody>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    state.runs.end(&email).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Report the account's run state.
#[utoipa::path(
    get,
    path = "/api/v1/run/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Run status", body = RunStatusResponseBody),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema)
    ),
    tags = ["runs"],
    operation_id = "getRunStatus"
)]
#[get("/run/{email}")]
pub async fn run_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&path.into_inner(), FieldName::new("email"))?;
    let status = state.run_status.status(&email).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(RunStatusResponseBody::from(status)))
}

#[cfg(test)]
#[path = "runs_tests.rs"]
mod tests;
