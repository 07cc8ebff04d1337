//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Display offsets on the map are
//! a few thousandths of a degree, so single precision would visibly quantize
//! the fan-out circles.

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Mean Earth radius in kilometres (IUGG).
    pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// `true` when the point is finite and inside `[-90, 90] × [-180, 180]`.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.is_finite() && self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Self::EARTH_RADIUS_KM * c
    }

    /// Euclidean distance in raw degree space.  Only meaningful for the tiny
    /// display offsets produced by the declutter pass.
    #[inline]
    pub fn planar_distance_deg(self, other: GeoPoint) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
