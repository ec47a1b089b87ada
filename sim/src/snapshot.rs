//! Live-cell sets and snapshot types.
//!
//! `LiveCellSet` is the persisted unit: a sparse list of live coordinates
//! with no grid dimensions attached. `FrameSnapshot` is a read-only view of
//! the whole engine for hosts that prefer JSON over the flat render buffer.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Grid coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub column: usize,
    pub row: usize,
}

impl CellCoord {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

/// A coordinate as read back from storage. Signed so that hand-edited or
/// foreign data with negative values still parses and is dropped later.
#[derive(Debug, Clone, Copy, Deserialize)]
struct StoredCoord {
    column: i64,
    row: i64,
}

impl StoredCoord {
    fn to_coord(self) -> Option<CellCoord> {
        let column = usize::try_from(self.column).ok()?;
        let row = usize::try_from(self.row).ok()?;
        Some(CellCoord { column, row })
    }
}

/// All live cells as of the last completed generation, in grid order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveCellSet(Vec<CellCoord>);

impl LiveCellSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellCoord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CellCoord] {
        &self.0
    }

    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.0.contains(&CellCoord::new(column, row))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Order-independent comparison.
    pub fn same_cells(&self, other: &LiveCellSet) -> bool {
        let a: HashSet<_> = self.0.iter().collect();
        let b: HashSet<_> = other.0.iter().collect();
        a == b
    }

    /// Serialize to the stored form: `[{"column":c,"row":r}, ...]`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the stored form.
    ///
    /// Returns `None` when the document is not a list of coordinate objects.
    /// Entries with negative coordinates are dropped.
    pub fn from_json(data: &str) -> Option<Self> {
        let stored: Vec<StoredCoord> = serde_json::from_str(data).ok()?;
        Some(stored.into_iter().filter_map(StoredCoord::to_coord).collect())
    }
}

impl FromIterator<CellCoord> for LiveCellSet {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LiveCellSet {
    type Item = &'a CellCoord;
    type IntoIter = std::slice::Iter<'a, CellCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Complete engine state view for hosts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Completed generations since the grid was built.
    pub generation: u64,
    /// Whether the engine is currently ticking.
    pub running: bool,
    pub width: usize,
    pub height: usize,
    /// Pixel size of one cell.
    pub cell_size: f32,
    /// Current tick rate (interpretation depends on the tick mode).
    pub tick_rate: f32,
    pub live_cells: LiveCellSet,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_format() {
        let set: LiveCellSet = vec![CellCoord::new(1, 2), CellCoord::new(3, 0)]
            .into_iter()
            .collect();
        assert_eq!(
            set.to_json().unwrap(),
            r#"[{"column":1,"row":2},{"column":3,"row":0}]"#
        );
    }

    #[test]
    fn test_parse_drops_negative_coordinates() {
        let set = LiveCellSet::from_json(r#"[{"column":-1,"row":2},{"column":4,"row":5}]"#).unwrap();
        assert_eq!(set.as_slice(), &[CellCoord::new(4, 5)]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(LiveCellSet::from_json("not json").is_none());
        assert!(LiveCellSet::from_json(r#"{"column":1,"row":1}"#).is_none());
        assert!(LiveCellSet::from_json(r#"[{"col":1}]"#).is_none());
        assert_eq!(LiveCellSet::from_json("[]"), Some(LiveCellSet::new()));
    }

    #[test]
    fn test_same_cells_ignores_order() {
        let a: LiveCellSet = [(0, 0), (1, 1)].into_iter().map(CellCoord::from).collect();
        let b: LiveCellSet = [(1, 1), (0, 0)].into_iter().map(CellCoord::from).collect();
        assert!(a.same_cells(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_frame_snapshot_json() {
        let snapshot = FrameSnapshot {
            generation: 3,
            running: true,
            width: 10,
            height: 8,
            cell_size: 20.0,
            tick_rate: 10.0,
            live_cells: vec![CellCoord::new(2, 2)].into_iter().collect(),
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"generation\":3"));
        assert!(json.contains("\"live_cells\":[{\"column\":2,\"row\":2}]"));
    }
}
