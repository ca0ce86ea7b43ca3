//! Assembly of the complete primitive stream.
//!
//! Output order: layers, tower names, equipment, device icons, level guide
//! lines, then the UTP, fiber and power routes.

use super::icons::{switch_box, ups_box, DeviceIcon};
use super::primitives::Drawing;
use crate::config::{Config, LayerStyle};
use crate::layout::{ElementKey, Layout};
use crate::routing::{CableClass, Justification, Route, RouteItem};
use crate::topology::Topology;
use log::info;

/// Build the drawing for a laid-out and routed topology.
pub fn build_drawing(topology: &Topology, layout: &Layout, routes: &[Route], config: &Config) -> Drawing {
    let mut drawing = Drawing::new(config.layers.text.clone());

    drawing.section("Layers");
    for layer in layers(config) {
        drawing.create_layer(&layer);
    }

    drawing.section("Towers");
    for tower in &layout.towers {
        drawing.text(
            tower.label_anchor,
            config.tower_label_height,
            Justification::Center,
            tower.name.as_str(),
        );
    }

    drawing.section("Equipment");
    for (tower_id, key, point) in layout.index.iter() {
        let ElementKey::Switch(kind) = key else {
            continue;
        };
        if kind.is_ups() {
            ups_box(point, config, &mut drawing);
        } else {
            let model = topology
                .tower(tower_id)
                .and_then(|t| t.switches.get(&kind))
                .map(String::as_str)
                .unwrap_or("");
            switch_box(point, kind, model, config, &mut drawing);
        }
    }

    drawing.section("Devices");
    for (_, key, point) in layout.index.iter() {
        let ElementKey::Device { kind, .. } = key else {
            continue;
        };
        drawing.select(&config.device_layer(kind));
        kind.draw_icon(point, &mut drawing);
        drawing.text(
            point.offset(-config.device_width, config.device_row_spacing / 4.0),
            config.label_height,
            Justification::MiddleRight,
            config.device_caption(kind),
        );
    }

    drawing.section("Levels");
    for guide in &layout.guides {
        drawing.select(&config.layers.levels);
        drawing.line(guide.start, guide.end);
        drawing.text(
            guide.start.offset(-config.label_offset, 0.0),
            config.level_label_height,
            Justification::MiddleRight,
            guide.label.as_str(),
        );
    }

    for route in routes {
        let layer = route_layer(route.class, config);
        drawing.section(route_section(route.class));
        for item in route.items() {
            match item {
                RouteItem::Segment(segment) => {
                    drawing.select(layer);
                    if let [from, to] = segment.points.as_slice() {
                        drawing.line(*from, *to);
                    } else {
                        drawing.polyline(segment.points.clone(), false);
                    }
                }
                RouteItem::Label(label) => {
                    drawing.text(label.anchor, label.height, label.justification, label.text.as_str());
                }
            }
        }
    }

    info!("Drawing assembled: {} primitives", drawing.len());
    drawing
}

/// Every layer the drawing uses, fixed layers first, without duplicates.
fn layers(config: &Config) -> Vec<LayerStyle> {
    let mut layers: Vec<LayerStyle> = config.layers.all().into_iter().cloned().collect();
    for kind in config.drawn_devices() {
        let layer = config.device_layer(kind);
        if !layers.iter().any(|l| l.name == layer.name) {
            layers.push(layer);
        }
    }
    layers
}

fn route_layer(class: CableClass, config: &Config) -> &LayerStyle {
    match class {
        CableClass::Utp => &config.layers.utp,
        CableClass::Fiber => &config.layers.fiber,
        CableClass::Power => &config.layers.power,
    }
}

fn route_section(class: CableClass) -> &'static str {
    match class {
        CableClass::Utp => "UTP cabling",
        CableClass::Fiber => "Fiber backbone",
        CableClass::Power => "Power distribution",
    }
}
