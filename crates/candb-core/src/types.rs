//! Shared catalog types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from raw value to display label
pub type Choices = BTreeMap<i64, String>;

/// Byte order of a signal within its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Most significant byte first (Motorola)
    #[default]
    BigEndian,
    /// Least significant byte first (Intel)
    LittleEndian,
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ByteOrder::BigEndian => "big_endian",
            ByteOrder::LittleEndian => "little_endian",
        };
        f.write_str(s)
    }
}
