//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure is an `InvalidRequest` error with `details: {field, code}`
//! so clients can highlight the offending input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AccountValidationError, CoordinatesValidationError, Credential, DisplayName, Email, Error,
    LatLng,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    Empty,
    Malformed,
    TooLong,
    OutOfRange,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Empty => "empty",
            ErrorCode::Malformed => "malformed",
            ErrorCode::TooLong => "too_long",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Request field name as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn account_field_error(field: FieldName, err: &AccountValidationError) -> Error {
    let code = match err {
        AccountValidationError::EmptyEmail
        | AccountValidationError::EmptyDisplayName
        | AccountValidationError::EmptyCredential => ErrorCode::Empty,
        AccountValidationError::EmailTooLong { .. }
        | AccountValidationError::DisplayNameTooLong { .. } => ErrorCode::TooLong,
        AccountValidationError::MalformedEmail => ErrorCode::Malformed,
    };
    field_error(field.as_str(), code, err.to_string())
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<Email, Error> {
    Email::new(value).map_err(|err| account_field_error(field, &err))
}

pub(crate) fn parse_display_name(value: &str, field: FieldName) -> Result<DisplayName, Error> {
    DisplayName::new(value).map_err(|err| account_field_error(field, &err))
}

pub(crate) fn parse_credential(value: String, field: FieldName) -> Result<Credential, Error> {
    Credential::new(value).map_err(|err| account_field_error(field, &err))
}

/// Coordinate pair as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct LatLngBody {
    #[schema(example = 51.5007)]
    pub lat: f64,
    #[schema(example = json!(-0.1246))]
    pub lng: f64,
}

impl From<LatLng> for LatLngBody {
    fn from(value: LatLng) -> Self {
        Self {
            lat: value.latitude(),
            lng: value.longitude(),
        }
    }
}

pub(crate) fn parse_lat_lng(value: LatLngBody, field: FieldName) -> Result<LatLng, Error> {
    LatLng::new(value.lat, value.lng).map_err(|err| {
        let code = match err {
            CoordinatesValidationError::NonFinite { .. } => ErrorCode::Malformed,
            _ => ErrorCode::OutOfRange,
        };
        field_error(field.as_str(), code, format!("{}: {err}", field.as_str()))
    })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| {
                    field_error(
                        field.as_str(),
                        ErrorCode::InvalidTimestamp,
                        format!("{} must be an RFC 3339 timestamp", field.as_str()),
                    )
                })
        })
        .transpose()
}
