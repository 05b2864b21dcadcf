//! Route computed by the route provider for an origin/destination pair.

/// Largest distance a route may carry; runs store distances as 32-bit signed
/// integers.
pub const MAX_DISTANCE_METERS: u32 = i32::MAX.unsigned_abs();

/// Distance and geometry of the first candidate route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    pub distance_meters: u32,
    pub encoded_polyline: String,
}

impl RouteResult {
    pub fn new(distance_meters: u32, encoded_polyline: impl Into<String>) -> Self {
        Self {
            distance_meters,
            encoded_polyline: encoded_polyline.into(),
        }
    }
}
