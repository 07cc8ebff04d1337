//! The viewer's own context.

use gb_core::{EntityId, GeoPoint};

/// Where the viewer is and which records are the viewer's own.
///
/// Backend payloads are inconsistent about whether a user is identified by
/// `id` or `_id`, so an owner may carry several identities; an entity is the
/// owner's if its id equals any of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Owner {
    location: Option<GeoPoint>,
    ids:      Vec<EntityId>,
}

impl Owner {
    /// No known location and no identity: nothing is exempt, no bucket
    /// overlaps the owner.
    pub fn none() -> Self {
        Self::default()
    }

    /// Owner at `location` with no identity yet.
    pub fn at(location: GeoPoint) -> Self {
        Self { location: Some(location), ids: Vec::new() }
    }

    pub fn with_location(mut self, location: Option<GeoPoint>) -> Self {
        self.location = location;
        self
    }

    /// Add an identity.  Duplicates are ignored.
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        let id = id.into();
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        self
    }

    /// Viewer's true location, if known and a valid coordinate.
    pub fn location(&self) -> Option<GeoPoint> {
        self.location.filter(|p| p.is_valid())
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// `true` if `id` is one of the owner's identities.
    #[inline]
    pub fn matches(&self, id: &EntityId) -> bool {
        self.ids.iter().any(|own| own == id)
    }
}
