//! Common identifier types
//!
//! Table ids show up as JSON numbers in some datasets and as strings in
//! others. They are normalized to [`TableId`] once, at the data boundary.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when a raw value cannot be normalized into a [`TableId`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid table id: {0:?}")]
pub struct InvalidTableId(pub String);

/// Canonical table identifier
///
/// Serializes as a plain JSON number. Deserializes from a number or from a
/// string holding an unsigned integer (surrounding whitespace allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TableId(u32);

impl TableId {
    pub const fn new(number: u32) -> Self {
        Self(number)
    }
}

impl From<u32> for TableId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl FromStr for TableId {
    type Err = InvalidTableId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| InvalidTableId(s.to_string()))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TableId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => u32::try_from(n)
                .map(Self)
                .map_err(|_| serde::de::Error::custom(InvalidTableId(n.to_string()))),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
