//! Guest Model

use crate::types::TableId;
use serde::{Deserialize, Serialize};

/// A guest's seating assignment
///
/// `name` is the unique display-form key from the guest dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub name: String,
    pub id: String,
    pub table: TableId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GuestRecord {
    /// Text shown next to the name in suggestion lists
    pub fn display_description(&self) -> String {
        describe(self.table, self.description.as_deref())
    }
}

/// One value of the guest dataset (`guests.json` maps name -> entry)
///
/// Two shapes are accepted: the detailed object, or a bare table number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GuestEntry {
    Detailed {
        #[serde(default)]
        id: Option<GuestIdValue>,
        table: TableId,
        #[serde(default)]
        description: Option<String>,
    },
    TableOnly(TableId),
}

/// Guest id as found in the dataset; numbers are accepted and stringified
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GuestIdValue {
    Text(String),
    Number(i64),
}

impl GuestEntry {
    /// Attach the dataset key to build a record. Entries without an id
    /// use the guest name as id.
    pub fn into_record(self, name: String) -> GuestRecord {
        match self {
            GuestEntry::Detailed {
                id,
                table,
                description,
            } => {
                let id = match id {
                    Some(GuestIdValue::Text(s)) if !s.trim().is_empty() => s,
                    Some(GuestIdValue::Number(n)) => n.to_string(),
                    _ => name.clone(),
                };
                GuestRecord {
                    name,
                    id,
                    table,
                    description: description.filter(|d| !d.trim().is_empty()),
                }
            }
            GuestEntry::TableOnly(table) => GuestRecord {
                id: name.clone(),
                name,
                table,
                description: None,
            },
        }
    }
}

/// Autocomplete suggestion, recomputed per keystroke
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub table: TableId,
    pub description: String,
    /// 1 = prefix, 2 = substring, 3 = word prefix
    pub priority: u8,
}

impl Suggestion {
    pub fn from_guest(guest: &GuestRecord, priority: u8) -> Self {
        Self {
            name: guest.name.clone(),
            table: guest.table,
            description: guest.display_description(),
            priority,
        }
    }
}

fn describe(table: TableId, description: Option<&str>) -> String {
    match description {
        Some(d) => d.to_string(),
        None => format!("Table {}", table),
    }
}
