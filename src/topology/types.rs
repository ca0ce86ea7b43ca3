//! Topology type definitions.
//!
//! The installation is modelled as towers holding ordered levels of device
//! counts and a table of switches. All collections are `BTreeMap`s so that
//! iteration is always in ascending id (or declared kind) order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identity of the root tower (main distribution frame).
pub const ROOT_TOWER_ID: u32 = 0;

/// Identity of the equipment (basement) level.
pub const EQUIPMENT_LEVEL_ID: u32 = 0;

/// Kinds of end devices counted per level.
///
/// The declaration order is the fixed stacking priority used when icons are
/// placed and when UTP trunks are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    AccessPoint,
    Phone,
    Tv,
    Data,
    Camera,
}

impl DeviceKind {
    /// All device kinds in priority order.
    pub const ALL: [DeviceKind; 5] = [
        DeviceKind::AccessPoint,
        DeviceKind::Phone,
        DeviceKind::Tv,
        DeviceKind::Data,
        DeviceKind::Camera,
    ];

    /// Short label used in quantity annotations ("3xAP").
    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::AccessPoint => "AP",
            DeviceKind::Phone => "TEL",
            DeviceKind::Tv => "TV",
            DeviceKind::Data => "DATA",
            DeviceKind::Camera => "CAM",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    /// Accepts the snake_case name, the short label and the legacy
    /// quantity column names (`apQty`, `telQty`, ...), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "access_point" | "ap" | "apqty" => Ok(DeviceKind::AccessPoint),
            "phone" | "tel" | "telefono" | "telqty" => Ok(DeviceKind::Phone),
            "tv" | "tvqty" => Ok(DeviceKind::Tv),
            "data" | "dat" | "datqty" => Ok(DeviceKind::Data),
            "camera" | "cam" | "camqty" => Ok(DeviceKind::Camera),
            other => Err(format!("unknown device kind '{}'", other)),
        }
    }
}

/// Kinds of switching/power equipment stacked on the equipment level.
///
/// The declaration order is the default stacking priority; UPS is only ever
/// present on the root tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchKind {
    Ups,
    Cctv,
    Data,
    Iptv,
    Telephony,
    Wifi,
    Core,
    Firewall,
}

impl SwitchKind {
    /// All switch kinds in default priority order.
    pub const ALL: [SwitchKind; 8] = [
        SwitchKind::Ups,
        SwitchKind::Cctv,
        SwitchKind::Data,
        SwitchKind::Iptv,
        SwitchKind::Telephony,
        SwitchKind::Wifi,
        SwitchKind::Core,
        SwitchKind::Firewall,
    ];

    /// Upper-case name used in captions and fiber labels ("2xFO WIFI").
    pub fn label(self) -> &'static str {
        match self {
            SwitchKind::Ups => "UPS",
            SwitchKind::Cctv => "CCTV",
            SwitchKind::Data => "DATA",
            SwitchKind::Iptv => "IPTV",
            SwitchKind::Telephony => "TEL",
            SwitchKind::Wifi => "WIFI",
            SwitchKind::Core => "CORE",
            SwitchKind::Firewall => "FIREWALL",
        }
    }

    pub fn is_ups(self) -> bool {
        self == SwitchKind::Ups
    }
}

impl fmt::Display for SwitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SwitchKind {
    type Err = String;

    /// Accepts the snake_case name, the caption label and the legacy
    /// `SW-` prefixed names (`SW-WIFI`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let name = lowered
            .strip_prefix("sw-")
            .or_else(|| lowered.strip_prefix("switch_"))
            .unwrap_or(&lowered);
        match name {
            "ups" => Ok(SwitchKind::Ups),
            "cctv" => Ok(SwitchKind::Cctv),
            "data" => Ok(SwitchKind::Data),
            "iptv" => Ok(SwitchKind::Iptv),
            "telephony" | "tel" => Ok(SwitchKind::Telephony),
            "wifi" => Ok(SwitchKind::Wifi),
            "core" => Ok(SwitchKind::Core),
            "firewall" => Ok(SwitchKind::Firewall),
            other => Err(format!("unknown switch kind '{}'", other)),
        }
    }
}

/// One floor (or the equipment level) of a tower.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    /// Display label used on the level guide line.
    pub label: String,
    pub quantities: BTreeMap<DeviceKind, u32>,
}

impl Level {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            quantities: BTreeMap::new(),
        }
    }

    /// Quantity of one device kind (zero when absent).
    pub fn quantity(&self, kind: DeviceKind) -> u32 {
        self.quantities.get(&kind).copied().unwrap_or(0)
    }

    /// Add units of a kind; returns the new quantity, or `None` (leaving the
    /// level unchanged) when it would not fit in a `u32`.
    pub fn add(&mut self, kind: DeviceKind, quantity: u32) -> Option<u32> {
        let entry = self.quantities.entry(kind).or_insert(0);
        *entry = entry.checked_add(quantity)?;
        Some(*entry)
    }
}

/// A tower with its levels and switch table.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub id: u32,
    pub name: String,
    pub levels: BTreeMap<u32, Level>,
    /// Switch kind → model name; at most one instance per kind.
    pub switches: BTreeMap<SwitchKind, String>,
}

impl Tower {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            levels: BTreeMap::new(),
            switches: BTreeMap::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_TOWER_ID
    }

    pub fn has_switch(&self, kind: SwitchKind) -> bool {
        self.switches.contains_key(&kind)
    }

    /// Total quantity of a device kind across every level of the tower.
    pub fn total(&self, kind: DeviceKind) -> u64 {
        self.levels.values().map(|l| u64::from(l.quantity(kind))).sum()
    }

    /// Level ids holding a nonzero quantity of `kind`, ascending.
    pub fn levels_with(&self, kind: DeviceKind) -> Vec<u32> {
        self.levels
            .values()
            .filter(|l| l.quantity(kind) > 0)
            .map(|l| l.id)
            .collect()
    }

    /// Get or create a level, using `label` only when it is created.
    pub fn level_mut(&mut self, id: u32, label: &str) -> &mut Level {
        self.levels
            .entry(id)
            .or_insert_with(|| Level::new(id, label))
    }
}

/// The whole installation, keyed by tower id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub towers: BTreeMap<u32, Tower>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tower: Tower) {
        self.towers.insert(tower.id, tower);
    }

    /// Towers in ascending id order.
    pub fn towers(&self) -> impl Iterator<Item = &Tower> {
        self.towers.values()
    }

    pub fn tower(&self, id: u32) -> Option<&Tower> {
        self.towers.get(&id)
    }

    pub fn root(&self) -> Option<&Tower> {
        self.towers.get(&ROOT_TOWER_ID)
    }

    /// Non-root towers in ascending id order.
    pub fn branches(&self) -> impl Iterator<Item = &Tower> {
        self.towers.values().filter(|t| !t.is_root())
    }

    pub fn has_ups(&self) -> bool {
        self.root().map_or(false, |r| r.has_switch(SwitchKind::Ups))
    }

    pub fn has_any_switch(&self) -> bool {
        self.towers.values().any(|t| !t.switches.is_empty())
    }

    /// Union of level ids across all towers, ascending.
    pub fn level_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .towers
            .values()
            .flat_map(|t| t.levels.keys().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Display label of a level, taken from the first tower (by id) that
    /// has it.
    pub fn level_label(&self, level_id: u32) -> Option<&str> {
        self.towers
            .values()
            .find_map(|t| t.levels.get(&level_id))
            .map(|l| l.label.as_str())
    }
}
