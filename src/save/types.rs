//! Save data structures and error types.
//!
//! Everything here serializes to JSON through Serde. Entity state is
//! polymorphic through a type tag plus a nested JSON payload, so games
//! built on the framework can persist their own entity types without the
//! framework knowing about them.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// The root save file structure
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
    pub scenario: ScenarioState,
    pub entities: Vec<EntityState>,
}

/// Metadata about the save
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub save_type: SaveType,
    pub save_slot: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Manual,
    Auto,
    QuickSave,
}

/// Persisted scenario geometry: bounds, the four (possibly overridden)
/// limits, and the obstacle rectangles as plain tuples.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub z_index: i32,
    pub north_limit: i32,
    pub east_limit: i32,
    pub south_limit: i32,
    pub west_limit: i32,
    pub obstacles: Vec<(i32, i32, u32, u32)>,
}

/// Entity save data (polymorphic through entity_type)
#[derive(Debug, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: u64,
    pub entity_type: String,
    pub position: (i32, i32),
    /// JSON for entity-specific data
    pub data: String,
}

/// Error types for save/load operations
#[derive(Debug)]
pub enum SaveError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    InvalidVersion(u32),
    CorruptedData(String),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::IoError(e) => write!(f, "IO error: {}", e),
            SaveError::SerializationError(e) => write!(f, "Serialization error: {}", e),
            SaveError::InvalidVersion(v) => write!(f, "Invalid save version: {}", v),
            SaveError::CorruptedData(msg) => write!(f, "Corrupted save data: {}", msg),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::IoError(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::SerializationError(err)
    }
}

/// Generic wrapper for saveable data
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    pub data_type: String,
    pub json_data: String,
}

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;
