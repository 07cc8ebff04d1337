//! Declutter configuration.

use gb_core::{GbError, GbResult};

/// Tunables for a [`Declutter`](crate::Declutter) pass.
///
/// The base radius is a presentation parameter: it decides how far apart the
/// fanned-out markers appear, never which entities collide.  Collision is
/// decided by `precision` alone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclutterConfig {
    /// Fan-out radius in degrees for a bucket of one or two slots.  Larger
    /// buckets scale it by `sqrt(slots) * 0.8`.
    pub base_radius_deg: f64,

    /// Number of decimal places coordinates are rounded to before bucketing.
    /// 3 decimals ≈ 111 m of latitude.
    pub precision: u32,

    /// Emit `log::debug!` records for every fanned-out bucket.
    pub verbose: bool,
}

impl DeclutterConfig {
    /// Base radius used by the main map view (≈ 333 m of latitude).
    pub const MAP_VIEW_RADIUS_DEG: f64 = 0.003;

    /// Base radius used by the "no matches" showcase map (≈ 555 m).
    pub const SHOWCASE_RADIUS_DEG: f64 = 0.005;

    pub const DEFAULT_PRECISION: u32 = 3;

    /// Beyond 9 decimals the scaled coordinate no longer fits the quantizer's
    /// exact integer range for longitudes up to 180°.
    pub const MAX_PRECISION: u32 = 9;

    pub fn map_view() -> Self {
        Self {
            base_radius_deg: Self::MAP_VIEW_RADIUS_DEG,
            precision:       Self::DEFAULT_PRECISION,
            verbose:         false,
        }
    }

    pub fn showcase() -> Self {
        Self {
            base_radius_deg: Self::SHOWCASE_RADIUS_DEG,
            ..Self::map_view()
        }
    }

    pub fn with_base_radius(mut self, base_radius_deg: f64) -> Self {
        self.base_radius_deg = base_radius_deg;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject radii that would produce NaN or collapsed markers and
    /// precisions the quantizer cannot represent.
    pub fn validate(&self) -> GbResult<()> {
        if !self.base_radius_deg.is_finite() || self.base_radius_deg <= 0.0 {
            return Err(GbError::Config(format!(
                "base radius must be a positive finite number of degrees, got {}",
                self.base_radius_deg
            )));
        }
        if self.precision > Self::MAX_PRECISION {
            return Err(GbError::Config(format!(
                "precision {} exceeds the maximum of {} decimals",
                self.precision,
                Self::MAX_PRECISION
            )));
        }
        Ok(())
    }
}

impl Default for DeclutterConfig {
    fn default() -> Self {
        Self::map_view()
    }
}
