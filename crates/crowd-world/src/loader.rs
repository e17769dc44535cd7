//! CSV waypoint loader.
//!
//! # CSV format
//!
//! One row per waypoint:
//!
//! ```csv
//! kind,x,y
//! patrol,0.0,1.5
//! patrol,-3.0,2.0
//! exit,-10.0,0.0
//! exit,10.0,0.0
//! ```
//!
//! **`kind`** is `patrol` or `exit`; anything else is a parse error.  Row
//! order within each kind is preserved (exit `WaypointId`s follow file
//! order).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crowd_core::Vec2;

use crate::WorldError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    kind: String,
    x:    f32,
    y:    f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Waypoints split by kind, ready to feed `PatrolPoints::new` and
/// `ExitPoints::new`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WaypointSet {
    pub patrol: Vec<Vec2>,
    pub exits:  Vec<Vec2>,
}

/// Load a waypoint layout from a CSV file.
pub fn load_waypoints_csv(path: &Path) -> Result<WaypointSet, WorldError> {
    let file = std::fs::File::open(path).map_err(WorldError::Io)?;
    load_waypoints_reader(file)
}

/// Like [`load_waypoints_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded layouts.
pub fn load_waypoints_reader<R: Read>(reader: R) -> Result<WaypointSet, WorldError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut set = WaypointSet::default();

    for result in csv_reader.deserialize::<WaypointRecord>() {
        let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
        let point = Vec2::new(row.x, row.y);
        match row.kind.trim() {
            "patrol" => set.patrol.push(point),
            "exit" => set.exits.push(point),
            other => {
                return Err(WorldError::Parse(format!(
                    "invalid waypoint kind {other:?}: expected \"patrol\" or \"exit\""
                )));
            }
        }
    }

    Ok(set)
}
