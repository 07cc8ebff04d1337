//! Coordinate quantization and fan-out geometry.
//!
//! Two entities collide when their coordinates round to the same
//! [`BucketKey`].  Rounding is applied to raw degrees, so a bucket is
//! ~111 m tall everywhere but narrower in longitude away from the equator.
//! That compression is deliberately left uncorrected: correcting it would
//! change which markers visibly cluster.

use std::f64::consts::TAU;
use std::fmt;

use gb_core::GeoPoint;

/// Quantized `(lat, lng)` pair identifying a collision bucket.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketKey {
    pub lat: i64,
    pub lng: i64,
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.lat, self.lng)
    }
}

/// Quantize `point` to `precision` decimal places.
///
/// Halves round toward positive infinity (`-73.0005` → `-73000` at 3
/// decimals), matching the rounding the map clients apply.
pub fn bucket_key(point: GeoPoint, precision: u32) -> BucketKey {
    let scale = 10f64.powi(precision as i32);
    BucketKey {
        lat: round_half_up(point.lat * scale),
        lng: round_half_up(point.lng * scale),
    }
}

/// `x - floor(x)` is exact, so only true halves round up; adding 0.5 first
/// would carry `0.49999999999999994` over to 1.  Callers pass coordinates
/// already checked by [`GeoPoint::is_valid`], which keeps the cast in range.
#[inline]
fn round_half_up(x: f64) -> i64 {
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Fan-out radius in degrees for a bucket with `total_slots` slots.
///
/// `base * max(1, sqrt(slots) * 0.8)`: one and two-slot buckets use the base
/// radius, larger ones grow with the square root so the ring stays readable.
pub fn fan_out_radius(base_radius_deg: f64, total_slots: usize) -> f64 {
    base_radius_deg * (((total_slots as f64).sqrt()) * 0.8).max(1.0)
}

/// Angle in radians of `slot` on a ring of `total_slots` evenly spaced slots.
#[inline]
pub fn slot_angle(slot: usize, total_slots: usize) -> f64 {
    slot as f64 * (TAU / total_slots as f64)
}

/// Display position of `slot` on a ring around `center`.
///
/// Slot 0 sits due north (`+lat`), subsequent slots advance toward `+lng`.
pub fn slot_position(center: GeoPoint, radius_deg: f64, slot: usize, total_slots: usize) -> GeoPoint {
    let angle = slot_angle(slot, total_slots);
    GeoPoint::new(
        center.lat + radius_deg * angle.cos(),
        center.lng + radius_deg * angle.sin(),
    )
}
