//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/accounts
//! GET  /api/v1/accounts/{email}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::HistoricalRun;
use crate::domain::ports::{AccountProfile, AccountSummary, RegisterAccountRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, LatLngBody, parse_credential, parse_display_name, parse_email,
};

/// Request payload for account registration.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequestBody {
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "Ada")]
    pub name: String,
    /// Stored as given.
    pub password: String,
}

/// Registered account summary.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryBody {
    pub email: String,
    pub name: String,
}

impl From<AccountSummary> for AccountSummaryBody {
    fn from(value: AccountSummary) -> Self {
        Self {
            email: value.email.to_string(),
            name: value.display_name.to_string(),
        }
    }
}

/// Archived run entry in a profile.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PastRunBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub origin: LatLngBody,
    pub destination: LatLngBody,
    pub distance_meters: u32,
    /// Seconds per kilometre, or `N/A`.
    pub average_pace: String,
    #[schema(format = "date-time")]
    pub completed_at: String,
}

impl From<HistoricalRun> for PastRunBody {
    fn from(value: HistoricalRun) -> Self {
        Self {
            id: value.id.to_string(),
            origin: value.origin.into(),
            destination: value.destination.into(),
            distance_meters: value.distance_meters,
            average_pace: value.average_pace.to_string(),
            completed_at: value.completed_at.to_rfc3339(),
        }
    }
}

/// Account profile with archived runs, newest first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfileBody {
    pub email: String,
    pub name: String,
    pub past_runs: Vec<PastRunBody>,
}

impl From<AccountProfile> for AccountProfileBody {
    fn from(value: AccountProfile) -> Self {
        Self {
            email: value.email.to_string(),
            name: value.display_name.to_string(),
            past_runs: value.past_runs.into_iter().map(PastRunBody::from).collect(),
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = RegisterAccountRequestBody,
    responses(
        (status = 201, description = "Account registered", body = AccountSummaryBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already taken", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "registerAccount"
)]
#[post("/accounts")]
pub async fn register_account(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterAccountRequestBody>,
) -> ApiResult<HttpResponse> {
    let RegisterAccountRequestBody {
        email,
        name,
        password,
    } = payload.into_inner();
    let request = RegisterAccountRequest {
        email: parse_email(&email, FieldName::new("email"))?,
        display_name: parse_display_name(&name, FieldName::new("name"))?,
        credential: parse_credential(password, FieldName::new("password"))?,
    };

    let summary = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(AccountSummaryBody::from(summary)))
}

/// Fetch an account profile and its run history.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Account profile", body = AccountProfileBody),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "getAccountProfile"
)]
#[get("/accounts/{email}")]
pub async fn account_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountProfileBody>> {
    let email = parse_email(&path.into_inner(), FieldName::new("email"))?;
    let profile = state.profiles.profile(&email).await?;
    Ok(web::Json(profile.into()))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
