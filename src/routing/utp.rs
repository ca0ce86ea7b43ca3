//! Device → switch cabling inside each tower.
//!
//! Per tower, every device kind that has both an occupied level and a placed
//! switch of its mapped kind gets:
//!
//! - a lead from the switch's right side out to the kind's trunk column,
//! - one vertical trunk covering every occupied level,
//! - one horizontal branch per occupied level into the icon,
//! - a per-level count label on each branch and one total label at the
//!   switch end.
//!
//! Trunk columns start past the rightmost icon of the tower and step right
//! once per drawn kind, so trunks of one tower never share an X.

use super::{CableClass, Route};
use crate::config::Config;
use crate::layout::{Layout, Point};
use crate::topology::{DeviceKind, Topology, Tower};
use log::{debug, info};

/// Route the UTP cabling of every tower.
pub fn route_utp(topology: &Topology, layout: &Layout, config: &Config) -> Route {
    let mut route = Route::new(CableClass::Utp);
    let mut trunks = 0;

    for tower in topology.towers() {
        trunks += route_tower(tower, layout, config, &mut route);
    }

    info!("UTP router drew {} trunks ({} items)", trunks, route.items().len());
    route
}

/// Route one tower; returns the number of trunks drawn.
fn route_tower(tower: &Tower, layout: &Layout, config: &Config, route: &mut Route) -> usize {
    let index = &layout.index;
    let Some(rightmost) = index.devices_of(tower.id).map(|(_, _, p)| p.x).reduce(f64::max) else {
        debug!("Tower {} has no device icons, no UTP", tower.id);
        return 0;
    };
    let trunk_base = rightmost + config.device_width / 2.0 + config.utp_trunk_margin;
    let mut trunk_offset = 0.0;
    let mut drawn = 0;

    for kind in config.drawn_devices() {
        let Some(switch_kind) = config.switch_for(kind) else {
            continue;
        };
        let Some(switch) = index.switch(tower.id, switch_kind) else {
            continue;
        };
        let drops = occupied_drops(tower, kind, layout);
        if drops.is_empty() {
            continue;
        }

        let trunk_x = trunk_base + trunk_offset;
        let side = Point::new(switch.x + config.switch_width, switch.y - config.switch_height / 2.0);
        let foot = Point::new(trunk_x, side.y);
        debug!(
            "Tower {}: {} trunk at x={} into {} switch",
            tower.id, kind, trunk_x, switch_kind
        );

        // The lead and the trunk foot share the switch's mid-height, so the
        // stub between them has zero length and the lead is one polyline.
        route.segment(vec![side, side.offset(config.utp_lead, 0.0), foot]);

        let low = drops.iter().map(|(_, _, p)| p.y).fold(foot.y, f64::min);
        let high = drops.iter().map(|(_, _, p)| p.y).fold(foot.y, f64::max);
        route.line(Point::new(trunk_x, low), Point::new(trunk_x, high));

        let mut total: u64 = 0;
        for (_, quantity, icon) in &drops {
            let start = Point::new(trunk_x, icon.y);
            let end = Point::new(icon.x + config.device_width / 2.0, icon.y);
            route.line(start, end);
            route.label(
                format!("{}x{}", quantity, kind.label()),
                start.midpoint(end).offset(0.0, config.label_offset),
                config.label_height,
            );
            total += u64::from(*quantity);
        }

        route.label(
            format!("{}x{}", total, config.utp_cable_label),
            side.midpoint(foot).offset(0.0, config.label_offset),
            config.label_height,
        );

        trunk_offset += config.utp_trunk_step;
        drawn += 1;
    }

    drawn
}

/// (level, quantity, icon anchor) of every placed level holding `kind`,
/// ascending by level id.
fn occupied_drops(tower: &Tower, kind: DeviceKind, layout: &Layout) -> Vec<(u32, u32, Point)> {
    tower
        .levels_with(kind)
        .into_iter()
        .filter_map(|level| {
            let icon = layout.index.device(tower.id, level, kind)?;
            let quantity = tower.levels.get(&level)?.quantity(kind);
            Some((level, quantity, icon))
        })
        .collect()
}
