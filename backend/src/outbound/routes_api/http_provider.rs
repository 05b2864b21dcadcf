//! Reqwest-backed Google Routes adapter.
//!
//! Owns transport details only: request serialisation, HTTP status mapping,
//! and decoding the first candidate route.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{ComputeRoutesRequestDto, ComputeRoutesResponseDto};
use crate::domain::ports::{RouteProvider, RouteProviderError};
use crate::domain::{LatLng, RouteResult};

/// Public `computeRoutes` endpoint.
pub const DEFAULT_ROUTES_ENDPOINT: &str =
    "https://routes.googleapis.com/directions/v2:computeRoutes";
/// Response fields requested from the API.
pub const ROUTES_FIELD_MASK: &str = "routes.distanceMeters,routes.polyline.encodedPolyline";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Route provider calling the Google Routes API.
pub struct GoogleRoutesProvider {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GoogleRoutesProvider {
    /// Build a provider whose client enforces `timeout` per request.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

impl std::fmt::Debug for GoogleRoutesProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleRoutesProvider")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RouteProvider for GoogleRoutesProvider {
    async fn compute_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<RouteResult, RouteProviderError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(FIELD_MASK_HEADER, ROUTES_FIELD_MASK)
            .json(&ComputeRoutesRequestDto::walking(origin, destination))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_route(body.as_ref())
    }
}

fn parse_route(body: &[u8]) -> Result<RouteResult, RouteProviderError> {
    let decoded: ComputeRoutesResponseDto = serde_json::from_slice(body).map_err(|error| {
        RouteProviderError::decode(format!("invalid computeRoutes JSON payload: {error}"))
    })?;
    decoded
        .into_domain_route()
        .map_err(RouteProviderError::decode)
}

fn map_transport_error(error: reqwest::Error) -> RouteProviderError {
    if error.is_timeout() {
        RouteProviderError::timeout(error.to_string())
    } else {
        RouteProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RouteProviderError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RouteProviderError::timeout(message)
        }
        _ if status.is_client_error() => RouteProviderError::rejected(message),
        _ => RouteProviderError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = compact.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHAR_LIMIT).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network request and response mapping.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn point(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng).expect("valid point")
    }

    #[test]
    fn request_body_matches_compute_routes_shape() {
        let body = serde_json::to_value(ComputeRoutesRequestDto::walking(
            point(51.5, -0.12),
            point(51.51, -0.1),
        ))
        .expect("request serialises");

        assert_eq!(
            body,
            json!({
                "origin": { "location": { "latLng": { "latitude": 51.5, "longitude": -0.12 } } },
                "destination": { "location": { "latLng": { "latitude": 51.51, "longitude": -0.1 } } },
                "travelMode": "WALK"
            })
        );
    }

    #[test]
    fn parses_the_first_route() {
        let body = br#"{
            "routes": [
                { "distanceMeters": 1500, "polyline": { "encodedPolyline": "abc" } },
                { "distanceMeters": 9999, "polyline": { "encodedPolyline": "ignored" } }
            ]
        }"#;

        let route = parse_route(body).expect("route decodes");
        assert_eq!(route, RouteResult::new(1500, "abc"));
    }

    #[test]
    fn largest_storable_distance_is_accepted() {
        let body = br#"{ "routes": [ { "distanceMeters": 2147483647, "polyline": { "encodedPolyline": "abc" } } ] }"#;
        let route = parse_route(body).expect("route decodes");
        assert_eq!(route.distance_meters, 2_147_483_647);
    }

    #[test]
    fn missing_distance_means_zero() {
        let body = br#"{ "routes": [ { "polyline": { "encodedPolyline": "abc" } } ] }"#;
        let route = parse_route(body).expect("route decodes");
        assert_eq!(route.distance_meters, 0);
    }

    #[rstest]
    #[case::no_routes(br#"{}"#.as_slice())]
    #[case::empty_routes(br#"{ "routes": [] }"#.as_slice())]
    #[case::no_polyline(br#"{ "routes": [ { "distanceMeters": 5 } ] }"#.as_slice())]
    #[case::negative_distance(
        br#"{ "routes": [ { "distanceMeters": -1, "polyline": { "encodedPolyline": "a" } } ] }"#.as_slice()
    )]
    #[case::distance_past_storage_range(
        br#"{ "routes": [ { "distanceMeters": 2147483648, "polyline": { "encodedPolyline": "a" } } ] }"#.as_slice()
    )]
    #[case::not_json(b"<html>".as_slice())]
    fn malformed_responses_are_decode_errors(#[case] body: &[u8]) {
        let err = parse_route(body).expect_err("decode should fail");
        assert!(matches!(err, RouteProviderError::Decode { .. }));
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        assert!(matches!(
            map_status_error(status, b""),
            RouteProviderError::Timeout { .. }
        ));
    }

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    #[case::too_many_requests(StatusCode::TOO_MANY_REQUESTS)]
    fn client_statuses_map_to_rejected(#[case] status: StatusCode) {
        assert!(matches!(
            map_status_error(status, b"{\"error\":{\"message\":\"API key not valid\"}}"),
            RouteProviderError::Rejected { .. }
        ));
    }

    #[test]
    fn server_statuses_map_to_transport_with_preview() {
        let err = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"  upstream\n  down ");
        assert_eq!(
            err,
            RouteProviderError::transport("status 503: upstream down")
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let provider = GoogleRoutesProvider::new(
            Url::parse(DEFAULT_ROUTES_ENDPOINT).expect("valid url"),
            "secret-key",
            Duration::from_secs(1),
        )
        .expect("client builds");
        assert!(!format!("{provider:?}").contains("secret-key"));
    }
}
