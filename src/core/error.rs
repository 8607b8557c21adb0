use thiserror::Error;

use crate::core::types::{BuildingId, SpellId, UnitId};

#[derive(Error, Debug)]
pub enum TownError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog '{0}' has no entries")]
    EmptyCatalog(&'static str),

    #[error("Duplicate building id {0:?}")]
    DuplicateBuilding(BuildingId),

    #[error("Duplicate creature id {0:?}")]
    DuplicateCreature(UnitId),

    #[error("Duplicate spell id {0:?}")]
    DuplicateSpell(SpellId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Field '{field}' has length {len}, maximum is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Unexpected end of data while reading '{0}'")]
    UnexpectedEof(&'static str),

    #[error("Invalid value {value} for '{field}'")]
    InvalidEnum { field: &'static str, value: u8 },

    #[error("Field '{0}' is not valid UTF-8")]
    InvalidUtf8(&'static str),

    #[error("{0} trailing bytes after settlement record")]
    TrailingBytes(usize),
}

pub type Result<T> = std::result::Result<T, TownError>;
