//! Input trait and output types of a declutter pass.

use std::fmt;

use gb_core::{EntityKey, GeoPoint};

/// Anything that may have a map position.
///
/// Returning `None`, or a non-finite or out-of-range point, means the entity
/// cannot be placed; it is passed through untouched.
pub trait Locatable {
    fn position(&self) -> Option<GeoPoint>;
}

impl Locatable for GeoPoint {
    fn position(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl Locatable for Option<GeoPoint> {
    fn position(&self) -> Option<GeoPoint> {
        *self
    }
}

/// Why an entity was moved off its true coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OffsetReason {
    /// Shared a bucket with other entities.
    UserClustering,
    /// Shared the viewer's own bucket.
    CurrentUserCluster,
}

impl OffsetReason {
    pub fn as_str(self) -> &'static str {
        match self {
            OffsetReason::UserClustering => "user-clustering",
            OffsetReason::CurrentUserCluster => "current-user-cluster",
        }
    }
}

impl fmt::Display for OffsetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ring an offset entity was placed on.
///
/// Serializes flat as `{ centerLat, centerLng, totalUsers, userPosition }`,
/// the shape map clients read.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "ClusterInfoRepr", from = "ClusterInfoRepr"))]
pub struct ClusterInfo {
    pub center:        GeoPoint,
    /// Slots on the ring, including the reserved owner slot when present.
    pub total_users:   usize,
    /// This entity's slot index in `0..total_users`.
    pub user_position: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterInfoRepr {
    center_lat:    f64,
    center_lng:    f64,
    total_users:   usize,
    user_position: usize,
}

#[cfg(feature = "serde")]
impl From<ClusterInfo> for ClusterInfoRepr {
    fn from(c: ClusterInfo) -> Self {
        Self {
            center_lat:    c.center.lat,
            center_lng:    c.center.lng,
            total_users:   c.total_users,
            user_position: c.user_position,
        }
    }
}

#[cfg(feature = "serde")]
impl From<ClusterInfoRepr> for ClusterInfo {
    fn from(r: ClusterInfoRepr) -> Self {
        Self {
            center:        GeoPoint::new(r.center_lat, r.center_lng),
            total_users:   r.total_users,
            user_position: r.user_position,
        }
    }
}

/// Record of a move: the true coordinate plus where and why it moved.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Offset {
    pub original: GeoPoint,
    pub reason:   OffsetReason,
    pub cluster:  ClusterInfo,
}

/// One output element, in the same slot as its input entity.
///
/// The entity is borrowed, never copied or mutated.  `position` is where the
/// marker should be drawn; real-world distances must use
/// [`true_position`](Self::true_position).
#[derive(Debug)]
pub struct Placement<'a, E> {
    pub entity:   &'a E,
    pub key:      EntityKey,
    /// Display position.  `None` for entities without usable coordinates.
    pub position: Option<GeoPoint>,
    pub offset:   Option<Offset>,
}

impl<E> Clone for Placement<'_, E> {
    fn clone(&self) -> Self {
        Self {
            entity:   self.entity,
            key:      self.key.clone(),
            position: self.position,
            offset:   self.offset,
        }
    }
}

impl<'a, E> Placement<'a, E> {
    #[inline]
    pub fn was_offset(&self) -> bool {
        self.offset.is_some()
    }

    pub fn reason(&self) -> Option<OffsetReason> {
        self.offset.map(|o| o.reason)
    }

    /// The entity's real coordinate, regardless of display offset.
    pub fn true_position(&self) -> Option<GeoPoint> {
        match self.offset {
            Some(offset) => Some(offset.original),
            None => self.position,
        }
    }

    /// Great-circle distance from `viewer` to the entity's true position.
    pub fn distance_km_from(&self, viewer: GeoPoint) -> Option<f64> {
        self.true_position().map(|p| viewer.distance_km(p))
    }
}
