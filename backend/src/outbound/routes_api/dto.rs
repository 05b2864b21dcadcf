//! Wire types for the `computeRoutes` request and response.

use serde::{Deserialize, Serialize};

use crate::domain::{LatLng, MAX_DISTANCE_METERS, RouteResult};

const TRAVEL_MODE_WALK: &str = "WALK";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComputeRoutesRequestDto {
    pub(super) origin: WaypointDto,
    pub(super) destination: WaypointDto,
    pub(super) travel_mode: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct WaypointDto {
    pub(super) location: LocationDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationDto {
    pub(super) lat_lng: LatLngDto,
}

#[derive(Debug, Serialize)]
pub(super) struct LatLngDto {
    pub(super) latitude: f64,
    pub(super) longitude: f64,
}

impl From<LatLng> for WaypointDto {
    fn from(value: LatLng) -> Self {
        Self {
            location: LocationDto {
                lat_lng: LatLngDto {
                    latitude: value.latitude(),
                    longitude: value.longitude(),
                },
            },
        }
    }
}

impl ComputeRoutesRequestDto {
    pub(super) fn walking(origin: LatLng, destination: LatLng) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: TRAVEL_MODE_WALK,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ComputeRoutesResponseDto {
    #[serde(default)]
    pub(super) routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RouteDto {
    /// Omitted by the API when zero.
    pub(super) distance_meters: Option<i64>,
    pub(super) polyline: Option<PolylineDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PolylineDto {
    pub(super) encoded_polyline: Option<String>,
}

impl ComputeRoutesResponseDto {
    pub(super) fn into_domain_route(self) -> Result<RouteResult, String> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| "response contained no routes".to_owned())?;

        let raw_distance = route.distance_meters.unwrap_or(0);
        let distance_meters = u32::try_from(raw_distance)
            .ok()
            .filter(|distance| *distance <= MAX_DISTANCE_METERS)
            .ok_or_else(|| format!("distanceMeters out of range: {raw_distance}"))?;
        let encoded_polyline = route
            .polyline
            .and_then(|polyline| polyline.encoded_polyline)
            .ok_or_else(|| "route is missing polyline.encodedPolyline".to_owned())?;

        Ok(RouteResult {
            distance_meters,
            encoded_polyline,
        })
    }
}
