//! Table Layout Model
//!
//! A table marker is placed either at explicit coordinates or on a grid
//! cell (1-based row/column) that a shared [`GridConfig`] maps to
//! coordinates.

use crate::types::TableId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker radius used when neither the table nor the grid specifies one
pub const DEFAULT_TABLE_RADIUS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("table {0} is placed on the grid but no grid config was provided")]
    MissingGrid(TableId),

    #[error("table {table} has grid cell ({row}, {column}); rows and columns start at 1")]
    InvalidCell { table: TableId, row: u32, column: u32 },
}

/// 2D point on the seating diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Grid-to-coordinate transform shared by grid-placed tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub start_x: f64,
    pub start_y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_radius: Option<f64>,
}

impl GridConfig {
    /// Center of a 1-based grid cell
    pub fn position(&self, row: u32, column: u32) -> Position {
        Position {
            x: self.start_x + f64::from(column.saturating_sub(1)) * self.cell_width,
            y: self.start_y + f64::from(row.saturating_sub(1)) * self.cell_height,
        }
    }
}

/// Where a table sits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    Explicit { x: f64, y: f64 },
    Grid { row: u32, column: u32 },
}

/// One entry of the table layout dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub number: TableId,
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl TableLayout {
    /// Resolve the marker center
    pub fn position(&self, grid: Option<&GridConfig>) -> Result<Position, LayoutError> {
        match self.placement {
            Placement::Explicit { x, y } => Ok(Position { x, y }),
            Placement::Grid { row, column } => {
                if row == 0 || column == 0 {
                    return Err(LayoutError::InvalidCell {
                        table: self.number,
                        row,
                        column,
                    });
                }
                let grid = grid.ok_or(LayoutError::MissingGrid(self.number))?;
                Ok(grid.position(row, column))
            }
        }
    }

    /// Resolve the marker radius: table, then grid, then default
    pub fn radius(&self, grid: Option<&GridConfig>) -> f64 {
        self.radius
            .or_else(|| grid.and_then(|g| g.table_radius))
            .unwrap_or(DEFAULT_TABLE_RADIUS)
    }
}

/// The whole table layout dataset (`tables.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDataset {
    pub tables: Vec<TableLayout>,
    #[serde(default, alias = "gridConfig", skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridConfig>,
}
