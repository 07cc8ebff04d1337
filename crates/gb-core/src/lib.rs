//! `gb-core` — foundational types for the gymbros map workspace.
//!
//! This crate is a dependency of every other `gb-*` crate.  It has no `gb-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `EntityId`, `EntityKey`                               |
//! | [`geo`]   | `GeoPoint`, haversine distance                        |
//! | [`error`] | `GbError`, `GbResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GbError, GbResult};
pub use geo::GeoPoint;
pub use ids::{EntityId, EntityKey};
