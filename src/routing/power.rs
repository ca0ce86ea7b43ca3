//! Power distribution from the root UPS.
//!
//! A single bus runs below every fiber bus. The UPS drops onto it from the
//! bottom of its box, and every switch whose connection point lies to the
//! right of that drop gets a riser from the bus, labelled with the number
//! of feeds still to be delivered.
//!
//! Switches at or left of the drop receive no riser; the bus only extends
//! to the right.

use super::fiber::{backbone_kinds, first_bus_y};
use super::{CableClass, Route};
use crate::config::Config;
use crate::layout::{ElementKey, Layout, Point};
use crate::topology::{SwitchKind, Topology, ROOT_TOWER_ID};
use log::{debug, info};

/// Route power from the UPS to every eligible switch.
pub fn route_power(topology: &Topology, layout: &Layout, config: &Config) -> Route {
    let mut route = Route::new(CableClass::Power);
    let Some(ups) = layout.index.switch(ROOT_TOWER_ID, SwitchKind::Ups) else {
        debug!("No UPS placed, skipping power distribution");
        return route;
    };

    let fiber_buses = backbone_kinds(topology, layout).len();
    let bus_y = first_bus_y(layout, config)
        - fiber_buses as f64 * config.fiber_bus_step
        - config.power_bus_gap;
    let drop_x = ups.x + config.ups_width / 2.0;

    let feeds = eligible_switches(layout, drop_x, config);
    let skipped = layout
        .index
        .iter()
        .filter(|(_, key, _)| matches!(key, ElementKey::Switch(kind) if !kind.is_ups()))
        .count()
        - feeds.len();
    if skipped > 0 {
        debug!("{} switches at or left of the UPS drop get no power riser", skipped);
    }
    if feeds.is_empty() {
        return route;
    }

    let drop = Point::new(drop_x, bus_y);
    route.line(Point::new(drop_x, ups.y - config.ups_height), drop);

    let mut previous = drop;
    let mut remaining = feeds.len();
    let mut stacked = 0;
    for (tower, kind, connection) in &feeds {
        let junction = Point::new(connection.x, bus_y);
        debug!("Power riser to tower {} {} at x={}", tower, kind, junction.x);
        // Switches of one stack share a junction: no zero-length bus piece,
        // and each repeated label is lifted one text row.
        if junction != previous {
            route.line(previous, junction);
            stacked = 0;
        } else {
            stacked += 1;
        }
        let lift = config.label_offset + stacked as f64 * config.label_height;
        route.label(
            format!("{}x{}", remaining, config.power_label),
            previous.midpoint(junction).offset(0.0, lift),
            config.label_height,
        );
        route.line(junction, *connection);
        previous = junction;
        remaining -= 1;
    }

    info!("Power router fed {} switches from the UPS", feeds.len());
    route
}

/// Non-UPS switches right of the drop, as (tower, kind, bottom-center),
/// ordered by X then tower id then kind.
fn eligible_switches(layout: &Layout, drop_x: f64, config: &Config) -> Vec<(u32, SwitchKind, Point)> {
    let mut feeds: Vec<(u32, SwitchKind, Point)> = layout
        .index
        .iter()
        .filter_map(|(tower, key, point)| match key {
            ElementKey::Switch(kind) if !kind.is_ups() => Some((
                tower,
                kind,
                Point::new(point.x + config.switch_width / 2.0, point.y - config.switch_height),
            )),
            _ => None,
        })
        .filter(|(_, _, connection)| connection.x > drop_x)
        .collect();
    feeds.sort_by(|a, b| a.2.x.total_cmp(&b.2.x).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
    feeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::routing::fiber::route_fiber;
    use crate::routing::fixtures::{tower, two_branch_wifi};

    fn labels(route: &Route) -> Vec<String> {
        route.labels().map(|l| l.text.clone()).collect()
    }

    #[test]
    fn test_every_switch_is_fed_with_descending_counts() {
        let config = Config::default();
        let topology = two_branch_wifi();
        let layout = compute_layout(&topology, &config);

        let route = route_power(&topology, &layout, &config);
        assert_eq!(labels(&route), vec!["4xUPS-PWR", "3xUPS-PWR", "2xUPS-PWR", "1xUPS-PWR"]);

        // UPS drop, four risers, and three bus pieces: the root's two
        // switches share one junction.
        assert_eq!(route.segments().count(), 1 + 4 + 3);
        let first = route.segments().next().unwrap();
        let ups = layout.index.switch(0, SwitchKind::Ups).unwrap();
        assert_eq!(first.points[0], Point::new(ups.x + config.ups_width / 2.0, ups.y - config.ups_height));
    }

    #[test]
    fn test_shared_junction_labels_do_not_overlap() {
        let config = Config::default();
        let topology = two_branch_wifi();
        let layout = compute_layout(&topology, &config);

        let route = route_power(&topology, &layout, &config);
        let anchors: Vec<Point> = route.labels().map(|l| l.anchor).collect();
        let bus_y = route.segments().next().unwrap().points[1].y;

        // The root's second switch repeats the first one's junction.
        assert_eq!(anchors[0].y, bus_y + config.label_offset);
        assert_eq!(anchors[1].y, bus_y + (config.label_offset + config.label_height));
        // Branch labels sit on their own bus pieces again.
        assert_eq!(anchors[2].y, bus_y + config.label_offset);
        assert_eq!(anchors[3].y, bus_y + config.label_offset);
    }

    #[test]
    fn test_power_bus_runs_below_fiber_buses() {
        let config = Config::default();
        let topology = two_branch_wifi();
        let layout = compute_layout(&topology, &config);

        let fiber = route_fiber(&topology, &layout, &config);
        let power = route_power(&topology, &layout, &config);
        let lowest_fiber = fiber
            .segments()
            .flat_map(|s| s.points.iter())
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min);
        let bus_y = power.segments().next().unwrap().points[1].y;
        assert!(bus_y < lowest_fiber);
    }

    #[test]
    fn test_no_ups_no_power() {
        let config = Config::default();
        let mut topology = Topology::new();
        topology.insert(tower(0, &[SwitchKind::Wifi]));
        topology.insert(tower(1, &[SwitchKind::Wifi]));
        let layout = compute_layout(&topology, &config);

        let route = route_power(&topology, &layout, &config);
        assert!(route.is_empty());
    }

    #[test]
    fn test_switches_left_of_drop_are_skipped() {
        let mut config = Config::default();
        // A UPS wider than the switch column moves the drop past the root's
        // own switch centers.
        config.ups_width = 200.0;
        let mut topology = Topology::new();
        topology.insert(tower(0, &[SwitchKind::Ups, SwitchKind::Data]));
        topology.insert(tower(1, &[SwitchKind::Data]));
        let layout = compute_layout(&topology, &config);

        let route = route_power(&topology, &layout, &config);
        assert_eq!(labels(&route), vec!["1xUPS-PWR"]);
        let riser = route.segments().last().unwrap();
        let branch = layout.index.switch(1, SwitchKind::Data).unwrap();
        assert_eq!(riser.points[1].x, branch.x + config.switch_width / 2.0);
    }

    #[test]
    fn test_nothing_right_of_drop_draws_nothing() {
        let mut config = Config::default();
        config.ups_width = 200.0;
        let mut topology = Topology::new();
        topology.insert(tower(0, &[SwitchKind::Ups, SwitchKind::Data]));
        let layout = compute_layout(&topology, &config);

        assert!(route_power(&topology, &layout, &config).is_empty());
    }
}
