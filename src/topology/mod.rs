//! Installation topology module.
//!
//! This module contains the hierarchical quantity model (tower → level →
//! device counts, tower → switch table), the normalized input records it is
//! built from, and the loader that performs the conversion.

pub mod input;
pub mod loader;
pub mod types;

// Re-export key types and functions for easier access
pub use input::{ApartmentRecord, ApartmentType, InputFile, LevelRecord, Reference, TowerRecord};
pub use loader::{build_topology, load_input, load_topology, InputError};
pub use types::{DeviceKind, Level, SwitchKind, Topology, Tower, EQUIPMENT_LEVEL_ID, ROOT_TOWER_ID};
