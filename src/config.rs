//! Settings for layout, routing, drawing and reporting.
//!
//! Every field has a default, so a settings file only needs to list the
//! values it overrides. All settings are read-only for the duration of a
//! run.

use crate::topology::{DeviceKind, SwitchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Top-level configuration structure that mirrors the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// X of the first tower's origin
    pub x_origin: f64,
    /// Y of the lowest level
    pub y_origin: f64,
    /// Horizontal extent reserved for one tower
    pub floor_width: f64,
    /// Horizontal gap between consecutive towers
    pub tower_gap: f64,
    /// Fixed gap added on top of the device rows of an occupied level
    pub level_gap: f64,
    /// Vertical distance between stacked device icons
    pub device_row_spacing: f64,
    /// Offset of the first device icon above its level line
    pub device_y_offset: f64,
    /// Offset of the device icon column from the tower origin
    pub device_column_offset: f64,
    /// Nominal icon width; UTP branches end at the icon's right edge
    pub device_width: f64,
    /// Offset of the switch column from the tower origin
    pub switch_column_offset: f64,
    pub switch_width: f64,
    pub switch_height: f64,
    /// Gap between consecutive switch boxes
    pub switch_vertical_spacing: f64,
    pub switch_text_height: f64,
    pub ups_width: f64,
    pub ups_height: f64,
    /// Gap between the UPS box and the first switch below it
    pub ups_switch_gap: f64,
    /// Space kept above and below the equipment stack inside level 0
    pub equipment_margin: f64,
    pub tower_label_height: f64,
    /// Distance of the tower name below the lowest level line
    pub tower_label_offset_y: f64,
    pub level_label_height: f64,
    /// Overhang of the level guide lines past the outermost towers
    pub guide_margin: f64,
    /// Text height of cable count labels
    pub label_height: f64,
    /// Distance of cable count labels above their cable
    pub label_offset: f64,

    /// Length of the horizontal lead leaving a switch towards its trunk
    pub utp_lead: f64,
    /// Clearance between the rightmost icon and the first UTP trunk
    pub utp_trunk_margin: f64,
    /// Spacing between parallel UTP trunks of one tower
    pub utp_trunk_step: f64,
    /// Distance of the first fiber bus below the equipment level line
    pub fiber_bus_drop: f64,
    /// Spacing between fiber buses of different switch kinds
    pub fiber_bus_step: f64,
    /// Lead length used where fiber leaves or enters a switch
    pub fiber_lead: f64,
    /// Clearance between the lowest fiber bus and the power bus
    pub power_bus_gap: f64,

    /// Cable name used on UTP switch totals ("12xCAT6A")
    pub utp_cable_label: String,
    /// Cable name used on fiber bus labels ("2xFO WIFI")
    pub fiber_label: String,
    /// Cable name used on power bus labels ("4xUPS-PWR")
    pub power_label: String,

    /// Drawing style and catalog model per device kind
    pub devices: BTreeMap<DeviceKind, DeviceStyle>,
    /// Switch kind each device kind is cabled to
    pub device_switch_map: BTreeMap<DeviceKind, SwitchKind>,
    /// Stacking priority of device icons within a level
    pub device_draw_order: Vec<DeviceKind>,
    /// Stacking priority of switches below the UPS
    pub switch_draw_order: Vec<SwitchKind>,
    pub layers: LayerTable,

    /// Estimated UTP meters per network point, for the BOM
    pub utp_meters_per_point: u32,
    /// Estimated fiber meters per backbone run, for the BOM
    pub fiber_meters_per_run: u32,
}

/// Layer and catalog information for one device kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStyle {
    pub layer: String,
    pub color: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A named drawing layer and its color index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub name: String,
    pub color: u8,
}

impl LayerStyle {
    fn new(name: &str, color: u8) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

/// Layers for everything that is not a device icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerTable {
    pub switches: LayerStyle,
    pub ups: LayerStyle,
    pub levels: LayerStyle,
    pub text: LayerStyle,
    pub utp: LayerStyle,
    pub fiber: LayerStyle,
    pub power: LayerStyle,
}

impl Default for LayerTable {
    fn default() -> Self {
        Self {
            switches: LayerStyle::new("Switches", 4),
            ups: LayerStyle::new("UPS", 1),
            levels: LayerStyle::new("Levels", 8),
            text: LayerStyle::new("Text", 7),
            utp: LayerStyle::new("Cables_UTP", 5),
            fiber: LayerStyle::new("Fiber_Backbone", 2),
            power: LayerStyle::new("Power", 1),
        }
    }
}

impl LayerTable {
    /// Non-device layers in creation order
    pub fn all(&self) -> [&LayerStyle; 7] {
        [
            &self.switches,
            &self.ups,
            &self.levels,
            &self.text,
            &self.utp,
            &self.fiber,
            &self.power,
        ]
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid draw order: {0}")]
    InvalidDrawOrder(String),
    #[error("Invalid device mapping: {0}")]
    InvalidMapping(String),
    #[error("Invalid layer: {0}")]
    InvalidLayer(String),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("floor_width", self.floor_width),
            ("tower_gap", self.tower_gap),
            ("device_row_spacing", self.device_row_spacing),
            ("switch_width", self.switch_width),
            ("switch_height", self.switch_height),
            ("ups_width", self.ups_width),
            ("ups_height", self.ups_height),
            ("utp_trunk_step", self.utp_trunk_step),
            ("fiber_bus_step", self.fiber_bus_step),
            ("label_height", self.label_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ValidationError::InvalidDimension(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("level_gap", self.level_gap),
            ("switch_vertical_spacing", self.switch_vertical_spacing),
            ("ups_switch_gap", self.ups_switch_gap),
            ("equipment_margin", self.equipment_margin),
            ("fiber_bus_drop", self.fiber_bus_drop),
            ("power_bus_gap", self.power_bus_gap),
            ("utp_trunk_margin", self.utp_trunk_margin),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ValidationError::InvalidDimension(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }

        let mut seen = HashSet::new();
        for kind in &self.device_draw_order {
            if !seen.insert(*kind) {
                return Err(ValidationError::InvalidDrawOrder(format!(
                    "device kind {} listed more than once",
                    kind
                )));
            }
        }

        let mut seen = HashSet::new();
        for kind in &self.switch_draw_order {
            if kind.is_ups() {
                return Err(ValidationError::InvalidDrawOrder(
                    "UPS is always stacked first and cannot appear in switch_draw_order".to_string(),
                ));
            }
            if !seen.insert(*kind) {
                return Err(ValidationError::InvalidDrawOrder(format!(
                    "switch kind {} listed more than once",
                    kind
                )));
            }
        }

        for (device, switch) in &self.device_switch_map {
            if switch.is_ups() {
                return Err(ValidationError::InvalidMapping(format!(
                    "device kind {} cannot be cabled to the UPS",
                    device
                )));
            }
        }

        for layer in self.layers.all() {
            if layer.name.trim().is_empty() {
                return Err(ValidationError::InvalidLayer("layer names cannot be empty".to_string()));
            }
        }
        for (kind, style) in &self.devices {
            if style.layer.trim().is_empty() {
                return Err(ValidationError::InvalidLayer(format!(
                    "device kind {} has an empty layer name",
                    kind
                )));
            }
        }

        Ok(())
    }

    /// Switch kind a device kind is cabled to, if any
    pub fn switch_for(&self, kind: DeviceKind) -> Option<SwitchKind> {
        self.device_switch_map.get(&kind).copied()
    }

    /// Device kinds that are drawn: the draw order restricted to kinds with
    /// a catalog entry
    pub fn drawn_devices(&self) -> impl Iterator<Item = DeviceKind> + '_ {
        self.device_draw_order
            .iter()
            .copied()
            .filter(move |kind| self.devices.contains_key(kind))
    }

    /// Layer of a device kind's icons, falling back to the text layer
    pub fn device_layer(&self, kind: DeviceKind) -> LayerStyle {
        match self.devices.get(&kind) {
            Some(style) => LayerStyle {
                name: style.layer.clone(),
                color: style.color,
            },
            None => self.layers.text.clone(),
        }
    }

    /// Annotation printed next to a device icon: the catalog model when
    /// known, the kind label otherwise
    pub fn device_caption(&self, kind: DeviceKind) -> String {
        self.devices
            .get(&kind)
            .and_then(|s| s.model.clone())
            .unwrap_or_else(|| kind.label().to_string())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        let devices = [
            (DeviceKind::AccessPoint, "APs", 3, Some("Meraki MR46")),
            (DeviceKind::Phone, "Phones", 6, Some("Yealink T46S")),
            (DeviceKind::Tv, "TVs", 30, Some("Apple TV 4K")),
            (DeviceKind::Data, "Data", 140, None),
            (DeviceKind::Camera, "Cameras", 210, None),
        ]
        .into_iter()
        .map(|(kind, layer, color, model)| {
            (
                kind,
                DeviceStyle {
                    layer: layer.to_string(),
                    color,
                    model: model.map(str::to_string),
                },
            )
        })
        .collect();

        let device_switch_map = [
            (DeviceKind::AccessPoint, SwitchKind::Wifi),
            (DeviceKind::Phone, SwitchKind::Telephony),
            (DeviceKind::Tv, SwitchKind::Iptv),
            (DeviceKind::Data, SwitchKind::Data),
            (DeviceKind::Camera, SwitchKind::Cctv),
        ]
        .into_iter()
        .collect();

        Self {
            x_origin: 0.0,
            y_origin: 0.0,
            floor_width: 400.0,
            tower_gap: 200.0,
            level_gap: 100.0,
            device_row_spacing: 80.0,
            device_y_offset: 20.0,
            device_column_offset: 150.0,
            device_width: 40.0,
            switch_column_offset: 50.0,
            switch_width: 120.0,
            switch_height: 30.0,
            switch_vertical_spacing: 10.0,
            switch_text_height: 8.0,
            ups_width: 80.0,
            ups_height: 60.0,
            ups_switch_gap: 30.0,
            equipment_margin: 50.0,
            tower_label_height: 25.0,
            tower_label_offset_y: 40.0,
            level_label_height: 15.0,
            guide_margin: 50.0,
            label_height: 10.0,
            label_offset: 10.0,
            utp_lead: 10.0,
            utp_trunk_margin: 50.0,
            utp_trunk_step: 30.0,
            fiber_bus_drop: 100.0,
            fiber_bus_step: 40.0,
            fiber_lead: 20.0,
            power_bus_gap: 40.0,
            utp_cable_label: "CAT6A".to_string(),
            fiber_label: "FO".to_string(),
            power_label: "UPS-PWR".to_string(),
            devices,
            device_switch_map,
            device_draw_order: DeviceKind::ALL.to_vec(),
            switch_draw_order: SwitchKind::ALL.iter().copied().filter(|k| !k.is_ups()).collect(),
            layers: LayerTable::default(),
            utp_meters_per_point: 15,
            fiber_meters_per_run: 50,
        }
    }
}
