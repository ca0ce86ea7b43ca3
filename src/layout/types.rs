//! Layout output types.
//!
//! The [`CoordinateIndex`] is built once per run by the layout engine and is
//! read-only to every router afterwards.

use crate::topology::{DeviceKind, SwitchKind};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A point in drawing units. Y grows upwards, as in the target CAD editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point moved by (dx, dy).
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Identity of a placed element within one tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKey {
    /// A switch box (UPS included); the point is the box's top-left corner.
    Switch(SwitchKind),
    /// A device icon on a level; the point is the icon's anchor.
    Device { level: u32, kind: DeviceKind },
}

/// Map from (tower id, element) to its placed point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateIndex {
    entries: BTreeMap<(u32, ElementKey), Point>,
}

impl CoordinateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an element. Only the layout engine writes to the index, and
    /// it places every element exactly once.
    pub(crate) fn insert(&mut self, tower: u32, key: ElementKey, point: Point) {
        let previous = self.entries.insert((tower, key), point);
        debug_assert!(previous.is_none(), "element {:?} of tower {} placed twice", key, tower);
    }

    pub fn get(&self, tower: u32, key: ElementKey) -> Option<Point> {
        self.entries.get(&(tower, key)).copied()
    }

    /// Top-left corner of a tower's switch box.
    pub fn switch(&self, tower: u32, kind: SwitchKind) -> Option<Point> {
        self.get(tower, ElementKey::Switch(kind))
    }

    /// Anchor of a tower's device icon on a level.
    pub fn device(&self, tower: u32, level: u32, kind: DeviceKind) -> Option<Point> {
        self.get(tower, ElementKey::Device { level, kind })
    }

    /// All entries in (tower, element) order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, ElementKey, Point)> + '_ {
        self.entries.iter().map(|((tower, key), point)| (*tower, *key, *point))
    }

    /// Device anchors of one tower.
    pub fn devices_of(&self, tower: u32) -> impl Iterator<Item = (u32, DeviceKind, Point)> + '_ {
        self.iter().filter_map(move |(t, key, point)| match key {
            ElementKey::Device { level, kind } if t == tower => Some((level, kind, point)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Serialize)]
struct IndexEntry {
    tower: u32,
    element: ElementKey,
    point: Point,
}

impl Serialize for CoordinateIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(tower, element, point)| IndexEntry {
            tower,
            element,
            point,
        }))
    }
}

/// Horizontal reference line drawn for one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideLine {
    pub level: u32,
    pub label: String,
    pub start: Point,
    pub end: Point,
}

/// Horizontal placement of one tower.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TowerPlacement {
    pub id: u32,
    pub name: String,
    pub origin_x: f64,
    /// Center of the tower's name below the lowest level line.
    pub label_anchor: Point,
}

/// Complete layout of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub towers: Vec<TowerPlacement>,
    /// Level id → Y of the level line, shared by every tower.
    pub level_y: BTreeMap<u32, f64>,
    /// Level id → vertical room allotted to the level.
    pub level_heights: BTreeMap<u32, f64>,
    pub guides: Vec<GuideLine>,
    pub index: CoordinateIndex,
}

impl Layout {
    pub fn tower(&self, id: u32) -> Option<&TowerPlacement> {
        self.towers.iter().find(|t| t.id == id)
    }

    pub fn level_y(&self, level: u32) -> Option<f64> {
        self.level_y.get(&level).copied()
    }

    /// Y of the lowest level line; cable buses run below it.
    pub fn baseline(&self, config: &crate::config::Config) -> f64 {
        self.level_y
            .values()
            .next()
            .copied()
            .unwrap_or(config.y_origin)
    }
}
