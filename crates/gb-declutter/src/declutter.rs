//! The de-collision pass.
//!
//! # Algorithm
//!
//! ```text
//! ① Bucket   — every placeable, non-owner entity goes into the bucket of its
//!              quantized coordinate (first-seen order, members in input order).
//! ② Overlap  — a bucket overlaps the owner when the owner's true location
//!              quantizes to the same key.
//! ③ Fan out  — buckets with ≥ 2 members, or any member and an owner overlap,
//!              are spread on a ring:
//!                slots  = members + (overlap ? 1 : 0)
//!                center = overlap ? owner location : first member
//!                radius = base * max(1, sqrt(slots) * 0.8)
//!              Slot 0 is left empty under overlap so the ring leaves room for
//!              the owner's marker, which the caller draws separately.
//! ④ Tag      — moved entities record their true coordinate, reason, and slot.
//! ```
//!
//! The owner's own entity is never bucketed, so it never moves and never
//! consumes a slot.  The pass is total: unplaceable entities are passed
//! through, and no input can make it fail.
//!
//! Feeding the output back in is not supported; callers must always pass the
//! raw source coordinates or points will be jittered again.

use log::debug;

use gb_core::{EntityId, EntityKey, GbResult, GeoPoint};

use crate::bucket::{bucket_key, fan_out_radius, slot_position, BucketKey};
use crate::config::DeclutterConfig;
use crate::owner::Owner;
use crate::placement::{ClusterInfo, Locatable, Offset, OffsetReason, Placement};

#[cfg(feature = "fx-hash")]
type BucketIndex = rustc_hash::FxHashMap<BucketKey, usize>;
#[cfg(not(feature = "fx-hash"))]
type BucketIndex = std::collections::HashMap<BucketKey, usize>;

/// Counters describing one pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclutterStats {
    /// Distinct buckets holding at least one non-owner entity.
    pub buckets:           usize,
    /// Buckets that were spread on a ring.
    pub fanned_out:        usize,
    /// Entities moved off their true coordinate.
    pub offset_entities:   usize,
    /// Entities without usable coordinates.
    pub unlocated:         usize,
}

struct Bucket {
    key:     BucketKey,
    /// `(input index, true position)` in input order.
    members: Vec<(usize, GeoPoint)>,
}

/// A configured de-collision pass.  Stateless; reuse freely.
#[derive(Clone, Debug, Default)]
pub struct Declutter {
    config: DeclutterConfig,
}

impl Declutter {
    /// Validate `config` and build a pass from it.
    pub fn new(config: DeclutterConfig) -> GbResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DeclutterConfig {
        &self.config
    }

    /// Compute display positions for `entities`.
    ///
    /// `id_of` extracts an entity's identity; it is used to recognise the
    /// owner's own record and to key entities in the output.  The result has
    /// the same length and order as `entities`.
    pub fn run<'a, E, F>(&self, entities: &'a [E], owner: &Owner, id_of: F) -> Vec<Placement<'a, E>>
    where
        E: Locatable,
        F: Fn(&E) -> Option<EntityId>,
    {
        self.run_with_stats(entities, owner, id_of).0
    }

    /// Like [`run`](Self::run) but also reports [`DeclutterStats`].
    pub fn run_with_stats<'a, E, F>(
        &self,
        entities: &'a [E],
        owner:    &Owner,
        id_of:    F,
    ) -> (Vec<Placement<'a, E>>, DeclutterStats)
    where
        E: Locatable,
        F: Fn(&E) -> Option<EntityId>,
    {
        let precision = self.config.precision;
        let mut stats = DeclutterStats::default();

        // ── ① Bucket ──────────────────────────────────────────────────────
        let mut placements: Vec<Placement<'a, E>> = Vec::with_capacity(entities.len());
        let mut buckets: Vec<Bucket> = Vec::new();
        let mut index = BucketIndex::default();

        for (i, entity) in entities.iter().enumerate() {
            let id = id_of(entity);
            let is_owner = id.as_ref().is_some_and(|id| owner.matches(id));
            let position = entity.position().filter(|p| p.is_valid());

            match position {
                None => stats.unlocated += 1,
                Some(pos) if !is_owner => {
                    let key = bucket_key(pos, precision);
                    let slot = *index.entry(key).or_insert_with(|| {
                        buckets.push(Bucket { key, members: Vec::new() });
                        buckets.len() - 1
                    });
                    buckets[slot].members.push((i, pos));
                }
                Some(_) => {}
            }

            placements.push(Placement {
                entity,
                key: EntityKey::resolve(id, i),
                position,
                offset: None,
            });
        }
        stats.buckets = buckets.len();

        // ── ② Overlap ─────────────────────────────────────────────────────
        let anchor: Option<(BucketKey, GeoPoint)> =
            owner.location().map(|p| (bucket_key(p, precision), p));

        // ── ③ Fan out + ④ Tag ─────────────────────────────────────────────
        for bucket in &buckets {
            let owner_center = anchor.filter(|(k, _)| *k == bucket.key).map(|(_, p)| p);
            let overlaps = owner_center.is_some();

            let Some(&(_, first)) = bucket.members.first() else { continue };
            if bucket.members.len() < 2 && !overlaps {
                continue;
            }

            let reserved = usize::from(overlaps);
            let total_slots = bucket.members.len() + reserved;
            let center = owner_center.unwrap_or(first);
            let radius = fan_out_radius(self.config.base_radius_deg, total_slots);
            let reason = if overlaps {
                OffsetReason::CurrentUserCluster
            } else {
                OffsetReason::UserClustering
            };

            if self.config.verbose {
                debug!(
                    "bucket {} fanned out: {} member(s), {} slot(s), radius {:.5}°, center {}, reason {}",
                    bucket.key,
                    bucket.members.len(),
                    total_slots,
                    radius,
                    center,
                    reason,
                );
            }

            for (n, &(i, original)) in bucket.members.iter().enumerate() {
                let slot = reserved + n;
                let placement = &mut placements[i];
                placement.position = Some(slot_position(center, radius, slot, total_slots));
                placement.offset = Some(Offset {
                    original,
                    reason,
                    cluster: ClusterInfo {
                        center,
                        total_users:   total_slots,
                        user_position: slot,
                    },
                });
            }

            stats.fanned_out += 1;
            stats.offset_entities += bucket.members.len();
        }

        if self.config.verbose {
            debug!(
                "declutter: {} entities, {} bucket(s), {} fanned out, {} offset, {} unlocated",
                entities.len(),
                stats.buckets,
                stats.fanned_out,
                stats.offset_entities,
                stats.unlocated,
            );
        }

        (placements, stats)
    }
}

/// Run a pass with the default (map view) configuration.
pub fn declutter<'a, E, F>(entities: &'a [E], owner: &Owner, id_of: F) -> Vec<Placement<'a, E>>
where
    E: Locatable,
    F: Fn(&E) -> Option<EntityId>,
{
    Declutter::default().run(entities, owner, id_of)
}
