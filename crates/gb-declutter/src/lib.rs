//! `gb-declutter` — marker de-collision for the gymbros map.
//!
//! Users and gyms that share a near-identical coordinate would render as a
//! single pin.  [`Declutter`] fans them out on a small ring around their
//! shared point (or around the viewer, when the viewer stands there) while
//! keeping the true coordinate alongside for distance labels.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`declutter`]   | `Declutter`, `DeclutterStats`, `declutter()`           |
//! | [`config`]      | `DeclutterConfig` and its map / showcase presets       |
//! | [`bucket`]      | `BucketKey`, quantization, ring geometry               |
//! | [`owner`]       | `Owner` — viewer location and identities               |
//! | [`placement`]   | `Locatable`, `Placement`, `Offset`, `OffsetReason`     |
//! | [`nearby`]      | `NearbyIndex` — R-tree over true positions             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on public value types.   |
//! | `fx-hash` | Uses FxHash instead of SipHash for the bucket index.       |
//!
//! # Example
//!
//! ```
//! use gb_core::GeoPoint;
//! use gb_declutter::{declutter, Owner};
//!
//! let points = [GeoPoint::new(45.0, -73.0), GeoPoint::new(45.0, -73.0)];
//! let placed = declutter(&points, &Owner::none(), |_| None);
//! assert!(placed.iter().all(|p| p.was_offset()));
//! assert_eq!(placed[0].true_position(), Some(points[0]));
//! ```

pub mod bucket;
pub mod config;
pub mod declutter;
pub mod nearby;
pub mod owner;
pub mod placement;


pub use bucket::{bucket_key, fan_out_radius, slot_position, BucketKey};
pub use config::DeclutterConfig;
pub use declutter::{declutter, Declutter, DeclutterStats};
pub use nearby::{Nearby, NearbyIndex};
pub use owner::Owner;
pub use placement::{ClusterInfo, Locatable, Offset, OffsetReason, Placement};
