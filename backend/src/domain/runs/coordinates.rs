//! Geographic coordinate pair used for run origins and destinations.

use std::fmt;

/// Validation errors for [`LatLng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatesValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("latitude must be between -90 and 90 degrees")]
    LatitudeOutOfRange,
    #[error("longitude must be between -180 and 180 degrees")]
    LongitudeOutOfRange,
}

/// WGS84 latitude/longitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use running_late::domain::LatLng;
///
/// let point = LatLng::new(51.5, -0.12).expect("valid point");
/// assert_eq!(point.latitude(), 51.5);
/// assert!(LatLng::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl LatLng {
    /// Validate and construct a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesValidationError> {
        if !latitude.is_finite() {
            return Err(CoordinatesValidationError::NonFinite { field: "latitude" });
        }
        if !longitude.is_finite() {
            return Err(CoordinatesValidationError::NonFinite { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesValidationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesValidationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
