//! Save/Load system
//!
//! This module provides a JSON-based save/load system with:
//! - Human-readable, debuggable save files
//! - Multiple save slots (1-5)
//! - Autosave support with timestamped filenames and cleanup
//! - Extensible trait-based design for game-defined entity types
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//! - `saveable`: Saveable trait for entities and the scenario
//!
//! # Example Usage
//!
//! ```ignore
//! let mut save_manager = SaveManager::with_default_directory()?;
//!
//! let save_file = SaveFile {
//!     version: CURRENT_SAVE_VERSION,
//!     timestamp: SystemTime::now(),
//!     metadata: SaveMetadata { save_type: SaveType::Manual, save_slot: 1 },
//!     scenario: scenario_state,
//!     entities: entity_states,
//! };
//! save_manager.save_game(&save_file)?;
//!
//! let loaded = save_manager.load_game(1)?;
//! ```

pub mod manager;
pub mod saveable;
pub mod types;

// Re-export commonly used types
pub use manager::SaveManager;
pub use saveable::Saveable;
pub use types::*;
