//! map_view — declutters a set of nearby users and gyms for the map.
//!
//! Usage:
//!
//! ```text
//! map_view [entities.csv] [map|showcase] [owner_id owner_lat owner_lng] [--verbose]
//! ```
//!
//! Without a CSV path an embedded downtown Montréal fixture is used.  Prints
//! one JSON marker per record (display position, true position, offset
//! metadata, distance from the viewer) followed by the viewer's 5 km list.

mod loader;

use std::io::Cursor;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;

use gb_core::GeoPoint;
use gb_declutter::{
    ClusterInfo, Declutter, DeclutterConfig, NearbyIndex, OffsetReason, Owner, Placement,
};

use loader::{load_entities_csv, load_entities_reader, EntityRecord};

// ── Constants ─────────────────────────────────────────────────────────────────

const NEARBY_RADIUS_KM: f64 = 5.0;

// Three users share a gym's doorstep, the viewer lives next door to one of
// them, and one record has no coordinates.
const FIXTURE_CSV: &str = "\
id,_id,kind,name,lat,lng\n\
me,,user,Viewer,45.50880,-73.58780\n\
u1,,user,Maya,45.50880,-73.58780\n\
u2,,user,Olu,45.50412,-73.57731\n\
u3,,user,Sam,45.50415,-73.57729\n\
,6650f1c2,gym,Iron Temple,45.50410,-73.57730\n\
u4,,user,Ines,45.52010,-73.61200\n\
u5,,user,Kai,,\n\
";

// ── CLI ───────────────────────────────────────────────────────────────────────

struct Args {
    csv:     Option<String>,
    config:  DeclutterConfig,
    owner:   Owner,
    verbose: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut verbose = false;
    let mut positional: Vec<String> = Vec::new();
    for arg in args {
        if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else {
            positional.push(arg);
        }
    }

    let mut it = positional.into_iter();
    let csv = it.next().filter(|p| p != "-");
    let config = match it.next().as_deref() {
        None | Some("map") => DeclutterConfig::map_view(),
        Some("showcase") => DeclutterConfig::showcase(),
        Some(other) => bail!("unknown view {other:?}: expected \"map\" or \"showcase\""),
    }
    .with_verbose(verbose);

    let owner = match (it.next(), it.next(), it.next()) {
        (None, _, _) if csv.is_none() => {
            Owner::at(GeoPoint::new(45.50880, -73.58780)).with_id("me")
        }
        (None, _, _) => Owner::none(),
        (Some(id), Some(lat), Some(lng)) => {
            let lat: f64 = lat.parse().with_context(|| format!("owner latitude {lat:?}"))?;
            let lng: f64 = lng.parse().with_context(|| format!("owner longitude {lng:?}"))?;
            Owner::at(GeoPoint::new(lat, lng)).with_id(id)
        }
        (Some(id), None, _) => Owner::none().with_id(id),
        (Some(id), Some(lat), None) => {
            bail!("owner {id:?} has latitude {lat:?} but no longitude")
        }
    };

    Ok(Args { csv, config, owner, verbose })
}

// ── Output rows ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerRow<'a> {
    key:            String,
    kind:           &'a str,
    name:           &'a str,
    lat:            Option<f64>,
    lng:            Option<f64>,
    was_offset:     bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_lat:   Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_lng:   Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset_reason:  Option<OffsetReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cluster_info:   Option<ClusterInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_km:    Option<f64>,
}

fn marker_row<'a>(p: &Placement<'a, EntityRecord>, viewer: Option<GeoPoint>) -> MarkerRow<'a> {
    MarkerRow {
        key:           p.key.to_string(),
        kind:          &p.entity.kind,
        name:          &p.entity.name,
        lat:           p.position.map(|g| g.lat),
        lng:           p.position.map(|g| g.lng),
        was_offset:    p.was_offset(),
        original_lat:  p.offset.map(|o| o.original.lat),
        original_lng:  p.offset.map(|o| o.original.lng),
        offset_reason: p.reason(),
        cluster_info:  p.offset.map(|o| o.cluster),
        distance_km:   viewer.and_then(|v| p.distance_km_from(v)),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let entities: Vec<EntityRecord> = match &args.csv {
        Some(path) => load_entities_csv(Path::new(path))
            .with_context(|| format!("loading entities from {path}"))?,
        None => load_entities_reader(Cursor::new(FIXTURE_CSV))?,
    };
    info!("loaded {} record(s)", entities.len());

    let pass = Declutter::new(args.config)?;
    let (placements, stats) = pass.run_with_stats(&entities, &args.owner, EntityRecord::entity_id);
    info!(
        "{} bucket(s), {} fanned out, {} marker(s) offset, {} without coordinates",
        stats.buckets, stats.fanned_out, stats.offset_entities, stats.unlocated,
    );

    let viewer = args.owner.location();
    let rows: Vec<MarkerRow<'_>> = placements.iter().map(|p| marker_row(p, viewer)).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);

    if let Some(viewer) = viewer {
        let index = NearbyIndex::from_placements(&placements);
        println!();
        println!("Within {NEARBY_RADIUS_KM} km of {viewer}:");
        for hit in index.within_km(viewer, NEARBY_RADIUS_KM) {
            let record = &entities[hit.index];
            if record.entity_id().is_some_and(|id| args.owner.matches(&id)) {
                continue;
            }
            println!("  {:<12} {:<5} {:>6.2} km", record.name, record.kind, hit.distance_km);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_owner_location_is_parsed() {
        let parsed = parse_args(args(&["users.csv", "showcase", "me", "45.5", "-73.6"])).unwrap();
        assert_eq!(parsed.owner.location(), Some(GeoPoint::new(45.5, -73.6)));
        assert_eq!(parsed.config.base_radius_deg, DeclutterConfig::SHOWCASE_RADIUS_DEG);
    }

    #[test]
    fn partial_owner_location_is_rejected() {
        let err = parse_args(args(&["users.csv", "map", "me", "45.5"])).err().unwrap();
        assert!(err.to_string().contains("no longitude"), "got {err}");
    }

    #[test]
    fn owner_id_alone_has_no_location() {
        let parsed = parse_args(args(&["users.csv", "map", "me", "--verbose"])).unwrap();
        assert!(parsed.owner.location().is_none());
        assert!(parsed.verbose && parsed.config.verbose);
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!(parse_args(args(&["users.csv", "satellite"])).is_err());
    }

    #[test]
    fn marker_json_matches_client_shape() {
        let entities = load_entities_reader(Cursor::new(FIXTURE_CSV)).unwrap();
        let owner = Owner::at(GeoPoint::new(45.50880, -73.58780)).with_id("me");
        let placements = Declutter::default().run(&entities, &owner, EntityRecord::entity_id);

        // u1 shares the viewer's doorstep.
        let row = serde_json::to_value(marker_row(&placements[1], owner.location())).unwrap();
        assert_eq!(row["wasOffset"], true);
        assert_eq!(row["offsetReason"], "current-user-cluster");
        assert_eq!(row["originalLat"], 45.5088);
        assert_eq!(row["clusterInfo"]["centerLat"], 45.5088);
        assert_eq!(row["clusterInfo"]["centerLng"], -73.5878);
        assert_eq!(row["clusterInfo"]["totalUsers"], 2);
        assert!(row["clusterInfo"].get("center").is_none());

        // The viewer's own record is left in place and carries no offset keys.
        let own = serde_json::to_value(marker_row(&placements[0], owner.location())).unwrap();
        assert_eq!(own["wasOffset"], false);
        assert!(own.get("clusterInfo").is_none());
    }
}
