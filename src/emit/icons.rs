//! Icon and equipment box geometry.
//!
//! Device icons are anchored at their bottom center. Switch and UPS boxes
//! are anchored at their top-left corner, matching the coordinate index.

use super::primitives::Drawing;
use crate::config::Config;
use crate::layout::Point;
use crate::routing::Justification;
use crate::topology::{DeviceKind, SwitchKind};

/// Radii of the access point's signal rings.
const AP_RINGS: [f64; 3] = [10.0, 21.25, 30.0];

/// A device kind's schematic symbol.
pub trait DeviceIcon {
    /// Draw the symbol with its bottom center at `at`, on the current layer.
    fn draw_icon(&self, at: Point, drawing: &mut Drawing);
}

impl DeviceIcon for DeviceKind {
    fn draw_icon(&self, at: Point, drawing: &mut Drawing) {
        match self {
            DeviceKind::AccessPoint => access_point(at, drawing),
            DeviceKind::Phone => phone(at, drawing),
            DeviceKind::Tv => tv(at, drawing),
            DeviceKind::Data => data_outlet(at, drawing),
            DeviceKind::Camera => camera(at, drawing),
        }
    }
}

/// Triangle with concentric signal rings around its apex.
fn access_point(at: Point, drawing: &mut Drawing) {
    let apex = at.offset(0.0, 25.0);
    let left = at.offset(-10.0, 0.0);
    drawing.polyline(vec![left, at.offset(10.0, 0.0), apex, left], false);
    for radius in AP_RINGS {
        drawing.circle(apex, radius);
    }
}

/// Handset body with the earpiece above it.
fn phone(at: Point, drawing: &mut Drawing) {
    drawing.rectangle(at.offset(-10.0, 0.0), at.offset(10.0, 30.0));
    drawing.circle(at.offset(0.0, 37.0), 5.0);
}

/// Screen standing on a triangular foot below the anchor.
fn tv(at: Point, drawing: &mut Drawing) {
    drawing.rectangle(at.offset(-20.0, 0.0), at.offset(20.0, 25.0));
    let left = at.offset(-10.0, 0.0);
    drawing.polyline(vec![left, at.offset(10.0, 0.0), at.offset(0.0, -10.0), left], false);
}

fn camera(at: Point, drawing: &mut Drawing) {
    drawing.rectangle(at.offset(-10.0, 0.0), at.offset(10.0, 15.0));
    drawing.circle(at.offset(0.0, 7.5), 3.0);
}

/// Filled triangle.
fn data_outlet(at: Point, drawing: &mut Drawing) {
    drawing.polyline(vec![at.offset(-10.0, 0.0), at.offset(10.0, 0.0), at.offset(0.0, 20.0)], true);
    drawing.hatch();
}

/// Switch box with a centered "KIND (model)" caption.
pub fn switch_box(top_left: Point, kind: SwitchKind, model: &str, config: &Config, drawing: &mut Drawing) {
    drawing.select(&config.layers.switches);
    let bottom_right = top_left.offset(config.switch_width, -config.switch_height);
    drawing.rectangle(top_left, bottom_right);

    let caption = if model.trim().is_empty() {
        kind.label().to_string()
    } else {
        format!("{} ({})", kind.label(), model)
    };
    drawing.text(
        top_left.midpoint(bottom_right),
        config.switch_text_height,
        Justification::MiddleCenter,
        caption,
    );
}

/// UPS box captioned "UPS" over a smaller "POWER".
pub fn ups_box(top_left: Point, config: &Config, drawing: &mut Drawing) {
    drawing.select(&config.layers.ups);
    let bottom_right = top_left.offset(config.ups_width, -config.ups_height);
    drawing.rectangle(top_left, bottom_right);

    let center = top_left.midpoint(bottom_right);
    let caption = config.ups_height / 4.0;
    drawing.text(center.offset(0.0, caption / 2.0), caption, Justification::MiddleCenter, "UPS");
    drawing.text(
        center.offset(0.0, -caption),
        config.switch_text_height,
        Justification::MiddleCenter,
        "POWER",
    );
}
