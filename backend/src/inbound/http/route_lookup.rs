//! Standalone route lookup handler.
//!
//! ```text
//! POST /api/v1/route
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::runs::RouteResponseBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, LatLngBody, parse_lat_lng};

/// Request payload for a standalone route lookup.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteLookupRequestBody {
    pub origin: LatLngBody,
    pub destination: LatLngBody,
}

/// Compute a walking route without touching any run state.
#[utoipa::path(
    post,
    path = "/api/v1/route",
    request_body = RouteLookupRequestBody,
    responses(
        (status = 200, description = "Route computed", body = RouteResponseBody),
        (status = 400, description = "Invalid coordinates", body = ErrorSchema),
        (status = 502, description = "Route provider failed", body = ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "computeRoute"
)]
#[post("/route")]
pub async fn compute_route(
    state: web::Data<HttpState>,
    payload: web::Json<RouteLookupRequestBody>,
) -> ApiResult<web::Json<RouteResponseBody>> {
    let RouteLookupRequestBody {
        origin,
        destination,
    } = payload.into_inner();
    let origin = parse_lat_lng(origin, FieldName::new("origin"))?;
    let destination = parse_lat_lng(destination, FieldName::new("destination"))?;

    let route = state.routes.compute_route(origin, destination).await?;
    Ok(web::Json(route.into()))
}
