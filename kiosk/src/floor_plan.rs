//! Floor Plan - resolved table markers and the current highlight
//!
//! Markers are resolved once from the table dataset. Rendering is left to the
//! caller; this module only tracks geometry and which table is lit.

use crate::store::DataStore;
use serde::Serialize;
use shared::TableId;
use shared::models::Position;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How strongly the highlighted marker stands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightIntensity {
    Low,
    Medium,
    #[default]
    High,
}

impl HighlightIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightIntensity::Low => "low",
            HighlightIntensity::Medium => "medium",
            HighlightIntensity::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown highlight intensity: {0} (expected low, medium or high)")]
pub struct InvalidIntensity(pub String);

impl FromStr for HighlightIntensity {
    type Err = InvalidIntensity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(HighlightIntensity::Low),
            "medium" => Ok(HighlightIntensity::Medium),
            "high" => Ok(HighlightIntensity::High),
            _ => Err(InvalidIntensity(s.to_string())),
        }
    }
}

impl fmt::Display for HighlightIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table marker ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableMarker {
    pub table: TableId,
    pub position: Position,
    pub radius: f64,
}

#[derive(Debug, Clone)]
pub struct FloorPlan {
    markers: Vec<TableMarker>,
    highlighted: Option<TableId>,
    intensity: HighlightIntensity,
}

impl FloorPlan {
    /// Resolve every table of the store into a marker
    ///
    /// The store has already validated placements, so a table that still
    /// cannot be placed is skipped with a warning.
    pub fn new(store: &DataStore, intensity: HighlightIntensity) -> Self {
        let grid = store.grid();
        let markers = store
            .tables()
            .iter()
            .filter_map(|table| match table.position(grid) {
                Ok(position) => Some(TableMarker {
                    table: table.number,
                    position,
                    radius: table.radius(grid),
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unplaceable table");
                    None
                }
            })
            .collect();

        Self {
            markers,
            highlighted: None,
            intensity,
        }
    }

    pub fn markers(&self) -> &[TableMarker] {
        &self.markers
    }

    pub fn marker(&self, table: TableId) -> Option<&TableMarker> {
        self.markers.iter().find(|m| m.table == table)
    }

    /// The lit marker, if any
    pub fn highlighted(&self) -> Option<&TableMarker> {
        self.highlighted.and_then(|t| self.marker(t))
    }

    pub fn intensity(&self) -> HighlightIntensity {
        self.intensity
    }

    /// Light up `table`, replacing any previous highlight
    ///
    /// Returns false when the table has no marker. The previous highlight is
    /// cleared either way.
    pub fn highlight(&mut self, table: TableId) -> bool {
        self.highlighted = None;
        if self.marker(table).is_none() {
            tracing::warn!(table = %table, "No marker for table");
            return false;
        }
        self.highlighted = Some(table);
        tracing::debug!(table = %table, intensity = %self.intensity, "Table highlighted");
        true
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Change the highlight intensity by name; an unknown name leaves the
    /// setting unchanged
    pub fn set_intensity(&mut self, value: &str) -> Result<HighlightIntensity, InvalidIntensity> {
        match value.parse() {
            Ok(intensity) => {
                self.intensity = intensity;
                tracing::debug!(intensity = %intensity, "Highlight intensity changed");
                Ok(intensity)
            }
            Err(e) => {
                tracing::warn!(value, "Invalid highlight intensity");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> FloorPlan {
        let store = DataStore::from_json(
            r#"{"Nguyen Van A": {"id": "1", "table": 7}}"#,
            r#"{
                "tables": [
                    {"number": 7, "row": 2, "column": 3},
                    {"number": 8, "x": 400, "y": 100, "radius": 45}
                ],
                "grid": {"startX": 100, "startY": 100, "cellWidth": 80, "cellHeight": 80}
            }"#,
        )
        .unwrap();
        FloorPlan::new(&store, HighlightIntensity::default())
    }

    #[test]
    fn test_markers_resolved() {
        let plan = plan();
        let seven = plan.marker(TableId::new(7)).unwrap();
        assert_eq!(seven.position, Position { x: 260.0, y: 180.0 });
        assert_eq!(seven.radius, 30.0);
        assert_eq!(plan.marker(TableId::new(8)).unwrap().radius, 45.0);
    }

    #[test]
    fn test_highlight_replaces_previous() {
        let mut plan = plan();
        assert!(plan.highlight(TableId::new(7)));
        assert!(plan.highlight(TableId::new(8)));
        assert_eq!(plan.highlighted().unwrap().table, TableId::new(8));

        assert!(!plan.highlight(TableId::new(99)));
        assert!(plan.highlighted().is_none());

        plan.highlight(TableId::new(7));
        plan.clear_highlight();
        assert!(plan.highlighted().is_none());
    }

    #[test]
    fn test_intensity() {
        let mut plan = plan();
        assert_eq!(plan.intensity(), HighlightIntensity::High);

        assert_eq!(plan.set_intensity(" Medium ").unwrap(), HighlightIntensity::Medium);
        assert!(plan.set_intensity("blinding").is_err());
        assert_eq!(plan.intensity(), HighlightIntensity::Medium);
        assert_eq!(HighlightIntensity::Low.to_string(), "low");
    }
}
