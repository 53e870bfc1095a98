//! Data Store - guest and table datasets loaded once at startup
//!
//! Guests are held sorted by display name. That order is the tie-break for
//! every matcher tier, so results do not depend on the key order of the
//! source file.

use crate::core::{KioskError, Result};
use shared::TableId;
use shared::models::{GridConfig, GuestEntry, GuestRecord, TableDataset, TableLayout};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct DataStore {
    guests: Vec<GuestRecord>,
    tables: Vec<TableLayout>,
    grid: Option<GridConfig>,
}

impl DataStore {
    /// Load both datasets from disk
    pub fn load(guests_path: impl AsRef<Path>, tables_path: impl AsRef<Path>) -> Result<Self> {
        let guests_path = guests_path.as_ref();
        let tables_path = tables_path.as_ref();

        let guests_json = std::fs::read_to_string(guests_path)
            .map_err(|e| KioskError::dataset_load(guests_path, e))?;
        let tables_json = std::fs::read_to_string(tables_path)
            .map_err(|e| KioskError::dataset_load(tables_path, e))?;

        let guests: BTreeMap<String, GuestEntry> = serde_json::from_str(&guests_json)
            .map_err(|e| KioskError::dataset_load(guests_path, e))?;
        let tables: TableDataset = serde_json::from_str(&tables_json)
            .map_err(|e| KioskError::dataset_load(tables_path, e))?;

        let store = Self::from_parts(guests, tables)?;
        tracing::info!(
            guests = store.guests.len(),
            tables = store.tables.len(),
            "Datasets loaded"
        );
        Ok(store)
    }

    /// Build from in-memory JSON documents
    pub fn from_json(guests_json: &str, tables_json: &str) -> Result<Self> {
        let guests: BTreeMap<String, GuestEntry> = serde_json::from_str(guests_json)
            .map_err(|e| KioskError::dataset_load("guests", e))?;
        let tables: TableDataset = serde_json::from_str(tables_json)
            .map_err(|e| KioskError::dataset_load("tables", e))?;
        Self::from_parts(guests, tables)
    }

    /// Validate and assemble the datasets
    ///
    /// Duplicate table numbers and unplaceable tables fail the load. Guests
    /// pointing at a table with no layout are only logged; the miss shows up
    /// when that table is highlighted.
    pub fn from_parts(guests: BTreeMap<String, GuestEntry>, tables: TableDataset) -> Result<Self> {
        let TableDataset { tables, grid } = tables;

        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.number) {
                return Err(KioskError::DatasetInvalid(format!(
                    "table {} appears more than once",
                    table.number
                )));
            }
            table
                .position(grid.as_ref())
                .map_err(|e| KioskError::DatasetInvalid(e.to_string()))?;
        }

        if guests.keys().any(|name| name.trim().is_empty()) {
            return Err(KioskError::DatasetInvalid("guest name is blank".to_string()));
        }

        let guests: Vec<GuestRecord> = guests
            .into_iter()
            .map(|(name, entry)| entry.into_record(name))
            .collect();

        for guest in guests.iter().filter(|g| !seen.contains(&g.table)) {
            tracing::warn!(guest = %guest.name, table = %guest.table, "Guest assigned to a table with no layout");
        }

        Ok(Self {
            guests,
            tables,
            grid,
        })
    }

    /// All guests, sorted by name
    pub fn guests(&self) -> &[GuestRecord] {
        &self.guests
    }

    pub fn tables(&self) -> &[TableLayout] {
        &self.tables
    }

    pub fn grid(&self) -> Option<&GridConfig> {
        self.grid.as_ref()
    }

    /// Exact (case-sensitive) lookup by display name
    pub fn guest(&self, name: &str) -> Option<&GuestRecord> {
        self.guests
            .binary_search_by(|g| g.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.guests[i])
    }

    pub fn table(&self, number: TableId) -> Option<&TableLayout> {
        self.tables.iter().find(|t| t.number == number)
    }
}
