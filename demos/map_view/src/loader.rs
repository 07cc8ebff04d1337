//! CSV loader for nearby-user / nearby-gym records.
//!
//! # CSV format
//!
//! ```csv
//! id,_id,kind,name,lat,lng
//! u1,,user,Maya,45.5088,-73.5878
//! ,6650f1c2,gym,Iron Temple,45.5088,-73.5878
//! u3,,user,Sam,,
//! ```
//!
//! Either `id` or `_id` may carry the identity.  Empty `lat`/`lng` fields
//! load as missing coordinates; such records are kept and shown without a
//! marker.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use gb_core::{EntityId, GbError, GbResult, GeoPoint};
use gb_declutter::Locatable;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EntityRecord {
    pub id:   Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub kind: String,
    pub name: String,
    pub lat:  Option<f64>,
    pub lng:  Option<f64>,
}

impl EntityRecord {
    /// `id`, falling back to `_id`.
    pub fn entity_id(&self) -> Option<EntityId> {
        self.id
            .as_deref()
            .or(self.mongo_id.as_deref())
            .filter(|s| !s.is_empty())
            .map(EntityId::from)
    }
}

impl Locatable for EntityRecord {
    fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lng?))
    }
}

/// Load entity records from a CSV file.
pub fn load_entities_csv(path: &Path) -> GbResult<Vec<EntityRecord>> {
    let file = std::fs::File::open(path)?;
    load_entities_reader(file)
}

/// Like [`load_entities_csv`] but accepts any `Read` source.
pub fn load_entities_reader<R: Read>(reader: R) -> GbResult<Vec<EntityRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<EntityRecord>()
        .map(|row| row.map_err(|e| GbError::Parse(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const CSV: &str = "\
id,_id,kind,name,lat,lng\n\
u1,,user,Maya,45.5088,-73.5878\n\
,6650f1c2,gym,Iron Temple,45.5088,-73.5878\n\
u3,,user,Sam,,\n\
";

    #[test]
    fn loads_ids_and_missing_coordinates() {
        let rows = load_entities_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].entity_id(), Some(EntityId::from("u1")));
        assert_eq!(rows[1].entity_id(), Some(EntityId::from("6650f1c2")));
        assert_eq!(rows[2].position(), None);
        assert_eq!(rows[1].position(), Some(GeoPoint::new(45.5088, -73.5878)));
    }

    #[test]
    fn bad_number_is_parse_error() {
        let bad = "id,_id,kind,name,lat,lng\nu1,,user,Maya,north,-73.0\n";
        assert!(matches!(load_entities_reader(Cursor::new(bad)), Err(GbError::Parse(_))));
    }
}
