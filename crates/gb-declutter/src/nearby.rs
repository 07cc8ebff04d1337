//! Proximity queries over true entity positions.
//!
//! Backs the "X km away" lists shown next to the map.  The index is built
//! from the *true* coordinates of a declutter pass, never from display
//! positions, so fanning markers apart does not change reported distances.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use gb_core::{EntityKey, GeoPoint};

use crate::placement::Placement;

/// Kilometres per degree of latitude on the mean-radius sphere.
const KM_PER_DEG: f64 = GeoPoint::EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Margin on the degree-space lower bound; haversine and the flat-earth
/// bound drift apart slightly over long spans.
const BOUND_SLACK: f64 = 0.99;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Entry {
    point: [f64; 2], // [lat, lng]
    index: usize,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Entry {
    /// Squared Euclidean distance in lat/lng space; used only for candidate
    /// ordering, final distances are haversine.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlng = self.point[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

// ── NearbyIndex ───────────────────────────────────────────────────────────────

/// A hit from a [`NearbyIndex`] query.
#[derive(Clone, Debug, PartialEq)]
pub struct Nearby {
    /// Index into the placements the index was built from.
    pub index:       usize,
    pub key:         EntityKey,
    pub distance_km: f64,
}

/// Spatial index over the true positions of a set of placements.
pub struct NearbyIndex {
    tree:        RTree<Entry>,
    keys:        Vec<EntityKey>,
    /// Largest `|lat|` of any indexed point.
    max_abs_lat: f64,
}

impl NearbyIndex {
    /// Bulk-load the true positions of `placements`.  Unplaced entities are
    /// skipped but keep their indices.
    pub fn from_placements<E>(placements: &[Placement<'_, E>]) -> Self {
        let entries: Vec<Entry> = placements
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                p.true_position().map(|pos| Entry { point: [pos.lat, pos.lng], index })
            })
            .collect();
        let max_abs_lat = entries.iter().map(|e| e.point[0].abs()).fold(0.0, f64::max);
        Self {
            tree: RTree::bulk_load(entries),
            keys: placements.iter().map(|p| p.key.clone()).collect(),
            max_abs_lat,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Every indexed entity within `radius_km` of `center`, nearest first.
    pub fn within_km(&self, center: GeoPoint, radius_km: f64) -> Vec<Nearby> {
        if !center.is_finite() || radius_km.is_nan() || radius_km < 0.0 {
            return Vec::new();
        }

        // Degree-space bounding box around the query circle, widened in
        // longitude by 1/cos(lat).
        let d_lat = radius_km / KM_PER_DEG;
        let cos_lat = center.lat.to_radians().cos().abs().max(1e-6);
        let d_lng = (radius_km / (KM_PER_DEG * cos_lat)).min(360.0);
        let envelope = AABB::from_corners(
            [center.lat - d_lat, center.lng - d_lng],
            [center.lat + d_lat, center.lng + d_lng],
        );

        let mut hits: Vec<Nearby> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|e| self.hit(e, center))
            .filter(|hit| hit.distance_km <= radius_km)
            .collect();
        sort_by_distance(&mut hits);
        hits
    }

    /// The `k` entities closest to `center` by haversine distance.
    ///
    /// The R-tree yields candidates in degree-space order, which overstates
    /// longitude spans away from the equator.  Candidates keep being pulled
    /// until the degree distance, scaled by the smallest `cos(lat)` among the
    /// indexed points and `center`, exceeds the k-th best haversine distance;
    /// no later candidate can then be closer.
    pub fn nearest(&self, center: GeoPoint, k: usize) -> Vec<Nearby> {
        if !center.is_finite() || k == 0 || self.is_empty() {
            return Vec::new();
        }
        let query = [center.lat, center.lng];
        let km_per_deg_floor = KM_PER_DEG * self.min_cos_lat(center) * BOUND_SLACK;

        let mut best: Vec<Nearby> = Vec::with_capacity(k + 1);
        for entry in self.tree.nearest_neighbor_iter(&query) {
            if best.len() == k {
                let bound_km = entry.distance_2(&query).sqrt() * km_per_deg_floor;
                if bound_km > best[k - 1].distance_km {
                    break;
                }
            }
            best.push(self.hit(entry, center));
            sort_by_distance(&mut best);
            best.truncate(k);
        }
        best
    }

    /// Smallest `cos(lat)` over the indexed points and `center`.  Zero at the
    /// poles, which disables early exit.
    fn min_cos_lat(&self, center: GeoPoint) -> f64 {
        let max_abs_lat = self.max_abs_lat.max(center.lat.abs()).min(90.0);
        max_abs_lat.to_radians().cos().max(0.0)
    }

    fn hit(&self, entry: &Entry, center: GeoPoint) -> Nearby {
        let pos = GeoPoint::new(entry.point[0], entry.point[1]);
        Nearby {
            index:       entry.index,
            key:         self.keys[entry.index].clone(),
            distance_km: center.distance_km(pos),
        }
    }
}

fn sort_by_distance(hits: &mut [Nearby]) {
    hits.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then(a.index.cmp(&b.index))
    });
}
