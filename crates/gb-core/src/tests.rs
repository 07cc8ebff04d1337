//! Unit tests for gb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, EntityKey};

    #[test]
    fn resolve_prefers_real_id() {
        let key = EntityKey::resolve(Some(EntityId::from("u-17")), 3);
        assert_eq!(key, EntityKey::Id(EntityId::from("u-17")));
        assert_eq!(key.id().map(EntityId::as_str), Some("u-17"));
    }

    #[test]
    fn resolve_falls_back_to_index() {
        let key = EntityKey::resolve(None, 4);
        assert_eq!(key, EntityKey::Index(4));
        assert!(key.id().is_none());
    }

    #[test]
    fn display() {
        assert_eq!(EntityKey::Index(2).to_string(), "entity-2");
        assert_eq!(EntityKey::Id("abc".into()).to_string(), "abc");
        assert_eq!(EntityId::new(String::from("x")).into_inner(), "x");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(45.508, -73.587);
        assert!(p.distance_km(p) < 1e-9);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(45.0, -73.0);
        let b = GeoPoint::new(46.0, -73.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.5, "got {d}");
    }

    #[test]
    fn finiteness() {
        assert!(GeoPoint::new(0.0, 0.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn validity_requires_range() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.0001, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.5).is_valid());
        assert!(!GeoPoint::new(1e300, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn planar_distance() {
        let a = GeoPoint::new(1.0, 1.0);
        let b = GeoPoint::new(1.003, 1.004);
        assert!((a.planar_distance_deg(b) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(GeoPoint::new(45.0, -73.5).to_string(), "(45.000000, -73.500000)");
    }
}

#[cfg(test)]
mod error {
    use crate::GbError;

    #[test]
    fn messages() {
        assert_eq!(
            GbError::Config("bad radius".into()).to_string(),
            "configuration error: bad radius"
        );
        let io: GbError = std::io::Error::other("boom").into();
        assert!(io.to_string().starts_with("I/O error"));
    }
}
