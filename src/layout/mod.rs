//! Schematic layout.
//!
//! Assigns an X to every tower, a Y to every level, and absolute points to
//! every switch box and device icon. The result is the read-only
//! coordinate index that all cable routers consume.

pub mod engine;
pub mod types;

pub use engine::compute_layout;
pub use types::{CoordinateIndex, ElementKey, GuideLine, Layout, Point, TowerPlacement};
