//! Backbone fiber from the root tower to every branch tower.
//!
//! One horizontal bus per switch kind shared by the root and at least one
//! branch. Buses hang below the lowest level line, one `fiber_bus_step`
//! apart, in ascending kind-label order. Each branch junction carries the
//! number of strands still running past it, counting down to 1 at the
//! last branch.

use super::{CableClass, Route};
use crate::config::Config;
use crate::layout::{Layout, Point};
use crate::topology::{SwitchKind, Topology};
use log::{debug, info, warn};

/// Switch kinds that get a backbone bus, in bus order.
///
/// A kind qualifies when the root tower has a placed instance and at least
/// one branch tower has one too. The UPS is never part of the backbone.
pub fn backbone_kinds(topology: &Topology, layout: &Layout) -> Vec<SwitchKind> {
    let Some(root) = topology.root() else {
        return Vec::new();
    };

    let mut kinds: Vec<SwitchKind> = root
        .switches
        .keys()
        .copied()
        .filter(|kind| !kind.is_ups())
        .filter(|kind| layout.index.switch(root.id, *kind).is_some())
        .filter(|kind| {
            topology
                .branches()
                .any(|branch| layout.index.switch(branch.id, *kind).is_some())
        })
        .collect();
    kinds.sort_by_key(|kind| kind.label());
    kinds
}

/// Y of the first backbone bus.
pub fn first_bus_y(layout: &Layout, config: &Config) -> f64 {
    layout.baseline(config) - config.fiber_bus_drop
}

/// Route the fiber backbone.
pub fn route_fiber(topology: &Topology, layout: &Layout, config: &Config) -> Route {
    let mut route = Route::new(CableClass::Fiber);
    let Some(root) = topology.root() else {
        warn!("No root tower in the model, skipping fiber backbone");
        return route;
    };

    let kinds = backbone_kinds(topology, layout);
    let start_y = first_bus_y(layout, config);

    for (i, kind) in kinds.iter().enumerate() {
        let Some(root_switch) = layout.index.switch(root.id, *kind) else {
            continue;
        };
        let bus_y = start_y - i as f64 * config.fiber_bus_step;
        let branches: Vec<Point> = topology
            .branches()
            .filter_map(|branch| layout.index.switch(branch.id, *kind))
            .collect();
        debug!("{} backbone bus at y={} to {} branches", kind, bus_y, branches.len());

        let side = Point::new(
            root_switch.x + config.switch_width,
            root_switch.y - config.switch_height / 2.0,
        );
        let mut previous = Point::new(side.x + 2.0 * config.fiber_lead, bus_y);
        route.segment(vec![side, side.offset(config.fiber_lead, 0.0), previous]);

        let mut remaining = branches.len();
        for switch in branches {
            let junction = Point::new(switch.x - config.fiber_lead, bus_y);
            route.line(previous, junction);
            route.label(
                format!("{}x{} {}", remaining, config.fiber_label, kind.label()),
                previous.midpoint(junction).offset(0.0, config.label_offset),
                config.label_height,
            );
            route.segment(vec![
                junction,
                Point::new(switch.x, bus_y + config.fiber_lead),
                Point::new(switch.x, switch.y - config.switch_height / 2.0),
            ]);
            previous = junction;
            remaining -= 1;
        }
    }

    info!("Fiber router drew {} backbone buses", kinds.len());
    route
}
