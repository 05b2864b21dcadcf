//! Tests for account HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockAccountCommand, MockAccountQuery};
use crate::domain::{
    AccountId, DisplayName, Email, Error, HistoricalRunId, LatLng, Pace,
};
use crate::inbound::http::test_utils::test_app;

#[rstest]
#[actix_web::test]
async fn register_returns_created() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_register()
        .times(1)
        .withf(|request| request.email.as_ref() == "a@x.com" && request.credential.expose() == "pw")
        .return_once(|request| {
            Ok(AccountSummary {
                email: request.email,
                display_name: request.display_name,
            })
        });
    let app = actix_test::init_service(test_app(
        HttpState::fixtures().with_accounts(Arc::new(accounts)),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": " a@x.com ", "name": "Ada", "password": "pw" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "email": "a@x.com", "name": "Ada" }));
}

#[rstest]
#[case(json!({ "email": "", "name": "Ada", "password": "pw" }), "email", "empty")]
#[case(json!({ "email": "a@x.com", "name": "  ", "password": "pw" }), "name", "empty")]
#[case(json!({ "email": "a@x.com", "name": "Ada", "password": "" }), "password", "empty")]
#[case(json!({ "email": "ax.com", "name": "Ada", "password": "pw" }), "email", "malformed")]
#[actix_web::test]
async fn register_rejects_invalid_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut accounts = MockAccountCommand::new();
    accounts.expect_register().times(0);
    let app = actix_test::init_service(test_app(
        HttpState::fixtures().with_accounts(Arc::new(accounts)),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_register()
        .return_once(|_| Err(Error::conflict("Email already taken")));
    let app = actix_test::init_service(test_app(
        HttpState::fixtures().with_accounts(Arc::new(accounts)),
    ))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": "a@x.com", "name": "Ada", "password": "pw" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "Email already taken");
}

#[rstest]
#[actix_web::test]
async fn profile_lists_past_runs() {
    let completed = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single().expect("time");
    let past = HistoricalRun {
        id: HistoricalRunId::random(),
        account_id: AccountId::random(),
        origin: LatLng::new(0.0, 0.0).expect("origin"),
        destination: LatLng::new(0.0, 1.0).expect("destination"),
        distance_meters: 1500,
        average_pace: Pace::Unavailable,
        completed_at: completed,
    };
    let mut profiles = MockAccountQuery::new();
    profiles
        .expect_profile()
        .times(1)
        .withf(|email| email.as_ref() == "a@x.com")
        .return_once(move |_| {
            Ok(AccountProfile {
                email: Email::new("a@x.com").expect("email"),
                display_name: DisplayName::new("Ada").expect("name"),
                past_runs: vec![past],
            })
        });
    let app = actix_test::init_service(test_app(
        HttpState::fixtures().with_profiles(Arc::new(profiles)),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/accounts/a@x.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: AccountProfileBody = actix_test::read_body_json(response).await;
    assert_eq!(body.name, "Ada");
    assert_eq!(body.past_runs.len(), 1);
    assert_eq!(body.past_runs[0].distance_meters, 1500);
    assert_eq!(body.past_runs[0].average_pace, "N/A");
}

#[rstest]
#[actix_web::test]
async fn unknown_profiles_are_not_found() {
    let app = actix_test::init_service(test_app(HttpState::fixtures())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/accounts/ghost@x.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "Account does not exist");
}
