//! Entity identifiers.
//!
//! Backend records identify users and gyms by opaque strings, so `EntityId`
//! wraps a `String` rather than an integer.  Records that arrive without any
//! id are keyed by their position in the input slice via [`EntityKey::Index`].

use std::fmt;

/// Stable identifier of a user or gym record.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(s)
    }
}

/// Render key for an entity: its real id when it has one, otherwise a
/// synthetic key derived from its index in the input.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityKey {
    Id(EntityId),
    Index(usize),
}

impl EntityKey {
    /// Key for the entity at `index`, preferring `id` when present.
    pub fn resolve(id: Option<EntityId>, index: usize) -> Self {
        match id {
            Some(id) => EntityKey::Id(id),
            None => EntityKey::Index(index),
        }
    }

    /// The real id, if this key is not synthetic.
    pub fn id(&self) -> Option<&EntityId> {
        match self {
            EntityKey::Id(id) => Some(id),
            EntityKey::Index(_) => None,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "{id}"),
            EntityKey::Index(i) => write!(f, "entity-{i}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EntityKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
