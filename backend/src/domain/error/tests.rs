//! Tests for domain error construction and trace capture.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case::invalid(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case::not_found(Error::not_found("missing"), ErrorCode::NotFound)]
#[case::conflict(Error::conflict("busy"), ErrorCode::Conflict)]
#[case::upstream(Error::upstream_failure("provider down"), ErrorCode::UpstreamFailure)]
#[case::unavailable(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case::internal(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_expected_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixture is a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("run already active") }).await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_absent_fields(base_error: Error) {
    let value = serde_json::to_value(base_error.with_details(json!({"field": "email"})))
        .expect("error serialises");

    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["error"], "bad");
    assert_eq!(value["details"]["field"], "email");
    assert!(value.get("traceId").is_none());
}

#[rstest]
#[case(ErrorCode::UpstreamFailure, true)]
#[case(ErrorCode::ServiceUnavailable, true)]
#[case(ErrorCode::Conflict, false)]
#[case(ErrorCode::NotFound, false)]
fn retryable_codes_are_infrastructure_failures(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_retryable(), expected);
}
