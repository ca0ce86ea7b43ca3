//! Layout engine.
//!
//! Converts the tower → level quantity model into absolute coordinates:
//!
//! 1. Towers are placed left to right in id order at a constant pitch of
//!    `floor_width + tower_gap`.
//! 2. Levels are placed bottom-up from `y_origin`. Each level receives
//!    enough room for the busiest tower at that level (distinct device kinds
//!    × row spacing) plus `level_gap`; the equipment level instead reserves
//!    the tallest switch/UPS stack plus margins. Every tower shares the
//!    level's Y.
//! 3. Switches are stacked downwards inside the equipment level, UPS first
//!    on the root tower, then in the configured priority order.
//! 4. Device icons are stacked upwards from each level line in the
//!    configured priority order, skipping empty kinds without a gap.
//! 5. One guide line per level spans the whole drawing.
//!
//! All running cursors are locals of the functions below.

use super::types::{CoordinateIndex, ElementKey, GuideLine, Layout, Point, TowerPlacement};
use crate::config::Config;
use crate::topology::loader::default_level_label;
use crate::topology::{Level, SwitchKind, Topology, Tower, EQUIPMENT_LEVEL_ID};
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Compute the complete layout of a topology.
pub fn compute_layout(topology: &Topology, config: &Config) -> Layout {
    let towers = place_towers(topology, config);
    let (level_y, level_heights) = place_levels(topology, config);

    let mut index = CoordinateIndex::new();
    for (tower, placement) in topology.towers().zip(&towers) {
        if let Some(&equipment_y) = level_y.get(&EQUIPMENT_LEVEL_ID) {
            let equipment_top = equipment_y + level_heights[&EQUIPMENT_LEVEL_ID] - config.equipment_margin;
            stack_switches(tower, placement.origin_x, equipment_top, config, &mut index);
        }
        stack_devices(tower, placement.origin_x, &level_y, config, &mut index);
    }

    let guides = guide_lines(topology, &towers, &level_y, config);

    info!(
        "Layout placed {} towers over {} levels ({} elements)",
        towers.len(),
        level_y.len(),
        index.len()
    );

    Layout {
        towers,
        level_y,
        level_heights,
        guides,
        index,
    }
}

/// Horizontal origin of every tower, in id order.
fn place_towers(topology: &Topology, config: &Config) -> Vec<TowerPlacement> {
    let pitch = config.floor_width + config.tower_gap;
    let label_y = config.y_origin - config.tower_label_offset_y;

    topology
        .towers()
        .enumerate()
        .map(|(i, tower)| {
            let origin_x = config.x_origin + i as f64 * pitch;
            debug!("Tower {} '{}' at x={}", tower.id, tower.name, origin_x);
            TowerPlacement {
                id: tower.id,
                name: tower.name.clone(),
                origin_x,
                label_anchor: Point::new(origin_x + config.floor_width / 2.0, label_y),
            }
        })
        .collect()
}

/// Y and height of every level, bottom-up in id order.
fn place_levels(topology: &Topology, config: &Config) -> (BTreeMap<u32, f64>, BTreeMap<u32, f64>) {
    let mut level_ids = topology.level_ids();
    if topology.has_any_switch() && !level_ids.contains(&EQUIPMENT_LEVEL_ID) {
        level_ids.insert(0, EQUIPMENT_LEVEL_ID);
    }

    let mut level_y = BTreeMap::new();
    let mut level_heights = BTreeMap::new();
    let mut cursor = config.y_origin;

    for level_id in level_ids {
        let rows = topology
            .towers()
            .filter_map(|t| t.levels.get(&level_id))
            .map(|l| device_rows(l, config))
            .max()
            .unwrap_or(0);
        let rows_height = rows as f64 * config.device_row_spacing;

        let height = if level_id == EQUIPMENT_LEVEL_ID {
            rows_height + equipment_block(topology, config)
        } else {
            rows_height + config.level_gap
        };

        debug!("Level {} at y={} (rows={}, height={})", level_id, cursor, rows, height);
        level_y.insert(level_id, cursor);
        level_heights.insert(level_id, height);
        cursor += height;
    }

    (level_y, level_heights)
}

/// Number of icon rows a level needs: its distinct drawn device kinds.
fn device_rows(level: &Level, config: &Config) -> usize {
    config
        .drawn_devices()
        .filter(|kind| level.quantity(*kind) > 0)
        .count()
}

/// Vertical room reserved on the equipment level for the tallest stack.
fn equipment_block(topology: &Topology, config: &Config) -> f64 {
    let tallest = topology
        .towers()
        .map(|t| stack_height(t, config))
        .fold(0.0_f64, f64::max);

    if tallest > 0.0 {
        tallest + 2.0 * config.equipment_margin
    } else {
        config.level_gap
    }
}

/// Height of a tower's switch/UPS stack.
fn stack_height(tower: &Tower, config: &Config) -> f64 {
    let mut height = 0.0;
    if tower.is_root() && tower.has_switch(SwitchKind::Ups) {
        height += config.ups_height + config.ups_switch_gap;
    }
    let switches = stacked_switches(tower, config).count();
    height + switches as f64 * (config.switch_height + config.switch_vertical_spacing)
}

/// Non-UPS switches of a tower in stacking order.
fn stacked_switches<'a>(tower: &'a Tower, config: &'a Config) -> impl Iterator<Item = SwitchKind> + 'a {
    config
        .switch_draw_order
        .iter()
        .copied()
        .filter(move |kind| tower.has_switch(*kind))
}

/// Stack a tower's UPS and switches downwards from `top`.
fn stack_switches(tower: &Tower, origin_x: f64, top: f64, config: &Config, index: &mut CoordinateIndex) {
    if tower.switches.is_empty() {
        debug!("Tower {} has no switches, no equipment column", tower.id);
        return;
    }

    let column_x = origin_x + config.switch_column_offset;
    let mut cursor = top;

    if tower.is_root() && tower.has_switch(SwitchKind::Ups) {
        index.insert(tower.id, ElementKey::Switch(SwitchKind::Ups), Point::new(column_x, cursor));
        cursor -= config.ups_height + config.ups_switch_gap;
    }

    for kind in stacked_switches(tower, config) {
        debug!("Tower {}: {} switch at ({}, {})", tower.id, kind, column_x, cursor);
        index.insert(tower.id, ElementKey::Switch(kind), Point::new(column_x, cursor));
        cursor -= config.switch_height + config.switch_vertical_spacing;
    }

    for kind in tower.switches.keys() {
        if !kind.is_ups() && !config.switch_draw_order.contains(kind) {
            warn!("Tower {}: {} switch not in switch draw order. Skipping.", tower.id, kind);
        }
    }
}

/// Stack each level's device icons upwards from the level line.
fn stack_devices(
    tower: &Tower,
    origin_x: f64,
    level_y: &BTreeMap<u32, f64>,
    config: &Config,
    index: &mut CoordinateIndex,
) {
    let column_x = origin_x + config.device_column_offset;

    for (level_id, level) in &tower.levels {
        let Some(&y) = level_y.get(level_id) else {
            continue;
        };
        let mut cursor = y + config.device_y_offset;
        for kind in config.drawn_devices() {
            if level.quantity(kind) == 0 {
                continue;
            }
            index.insert(
                tower.id,
                ElementKey::Device { level: *level_id, kind },
                Point::new(column_x, cursor),
            );
            cursor += config.device_row_spacing;
        }

        for (kind, quantity) in &level.quantities {
            if *quantity == 0 {
                continue;
            }
            if !config.devices.contains_key(kind) {
                warn!(
                    "Tower {} level '{}': {} not in device catalog. Skipping {} units.",
                    tower.id, level.label, kind, quantity
                );
            } else if !config.device_draw_order.contains(kind) {
                warn!(
                    "Tower {} level '{}': {} not in device draw order. Skipping {} units.",
                    tower.id, level.label, kind, quantity
                );
            }
        }
    }
}

/// One guide line per level across every tower.
fn guide_lines(
    topology: &Topology,
    towers: &[TowerPlacement],
    level_y: &BTreeMap<u32, f64>,
    config: &Config,
) -> Vec<GuideLine> {
    let Some(last) = towers.last() else {
        return Vec::new();
    };
    let start_x = config.x_origin - config.guide_margin;
    let end_x = last.origin_x + config.floor_width + config.guide_margin;

    level_y
        .iter()
        .map(|(level_id, y)| GuideLine {
            level: *level_id,
            label: topology
                .level_label(*level_id)
                .map(str::to_string)
                .unwrap_or_else(|| default_level_label(*level_id)),
            start: Point::new(start_x, *y),
            end: Point::new(end_x, *y),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::DeviceKind;

    fn tower(id: u32, switches: &[SwitchKind]) -> Tower {
        let mut tower = Tower::new(id, if id == 0 { "MDF".to_string() } else { format!("IDF{}", id) });
        for kind in switches {
            tower.switches.insert(*kind, "MS225".to_string());
        }
        tower
    }

    fn sample() -> Topology {
        let mut topology = Topology::new();
        topology.insert(tower(0, &[SwitchKind::Ups, SwitchKind::Wifi, SwitchKind::Data]));

        let mut idf1 = tower(1, &[SwitchKind::Wifi, SwitchKind::Iptv, SwitchKind::Cctv]);
        let level = idf1.level_mut(1, "NIVEL1");
        level.add(DeviceKind::AccessPoint, 2);
        level.add(DeviceKind::Tv, 3);
        idf1.level_mut(2, "NIVEL2").add(DeviceKind::Phone, 1);
        topology.insert(idf1);

        let mut idf2 = tower(2, &[]);
        let level = idf2.level_mut(1, "FIRST");
        level.add(DeviceKind::AccessPoint, 1);
        level.add(DeviceKind::Phone, 1);
        level.add(DeviceKind::Camera, 1);
        topology.insert(idf2);
        topology
    }

    #[test]
    fn test_tower_pitch_is_constant() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);
        let pitch = config.floor_width + config.tower_gap;

        for pair in layout.towers.windows(2) {
            assert_eq!(pair[1].origin_x - pair[0].origin_x, pitch);
        }
        assert_eq!(layout.towers[0].origin_x, config.x_origin);
    }

    #[test]
    fn test_levels_increase_with_dynamic_height() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);

        let ys: Vec<f64> = layout.level_y.values().copied().collect();
        assert_eq!(ys.len(), 3);
        assert!(ys.windows(2).all(|w| w[1] > w[0]));

        // Level 1: the busiest tower has three kinds.
        assert_eq!(layout.level_heights[&1], 3.0 * config.device_row_spacing + config.level_gap);
        // Level 2: one kind.
        assert_eq!(layout.level_heights[&2], config.device_row_spacing + config.level_gap);
        // Equipment level: the root stack (UPS + 2 switches) is taller than IDF1 (3 switches).
        let stack = config.ups_height + config.ups_switch_gap
            + 2.0 * (config.switch_height + config.switch_vertical_spacing);
        assert_eq!(layout.level_heights[&0], stack + 2.0 * config.equipment_margin);
    }

    #[test]
    fn test_switch_stack_follows_priority_order() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);

        let cctv = layout.index.switch(1, SwitchKind::Cctv).unwrap();
        let iptv = layout.index.switch(1, SwitchKind::Iptv).unwrap();
        let wifi = layout.index.switch(1, SwitchKind::Wifi).unwrap();

        // Top-down: CCTV, IPTV, WIFI, each box separated by the configured gap.
        let gap = config.switch_vertical_spacing;
        assert_eq!((cctv.y - config.switch_height) - iptv.y, gap);
        assert_eq!((iptv.y - config.switch_height) - wifi.y, gap);
        assert_eq!(cctv.x, layout.towers[1].origin_x + config.switch_column_offset);
    }

    #[test]
    fn test_ups_is_stacked_first_on_root() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);

        let ups = layout.index.switch(0, SwitchKind::Ups).unwrap();
        let data = layout.index.switch(0, SwitchKind::Data).unwrap();
        let wifi = layout.index.switch(0, SwitchKind::Wifi).unwrap();
        assert_eq!(ups.y - config.ups_height - config.ups_switch_gap, data.y);
        assert!(wifi.y < data.y);

        // Stack stays inside the equipment level band.
        let bottom = wifi.y - config.switch_height;
        assert!(bottom > layout.level_y(0).unwrap());
        assert!(ups.y < layout.level_y(1).unwrap());
    }

    #[test]
    fn test_tower_without_switches_has_no_column() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);
        let idf2_switches = layout
            .index
            .iter()
            .filter(|(t, key, _)| *t == 2 && matches!(key, ElementKey::Switch(_)))
            .count();
        assert_eq!(idf2_switches, 0);
        assert_eq!(layout.index.devices_of(2).count(), 3);
    }

    #[test]
    fn test_devices_stack_without_gaps() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);
        let y1 = layout.level_y(1).unwrap();

        let ap = layout.index.device(1, 1, DeviceKind::AccessPoint).unwrap();
        let tv = layout.index.device(1, 1, DeviceKind::Tv).unwrap();
        assert_eq!(ap.y, y1 + config.device_y_offset);
        // No phones on level 1 of IDF1, so the TV takes the second row.
        assert_eq!(tv.y, ap.y + config.device_row_spacing);
        assert_eq!(layout.index.device(1, 1, DeviceKind::Phone), None);

        // Levels share one Y across towers.
        let idf2_ap = layout.index.device(2, 1, DeviceKind::AccessPoint).unwrap();
        assert_eq!(idf2_ap.y, ap.y);
    }

    #[test]
    fn test_guide_lines_span_all_towers() {
        let config = Config::default();
        let layout = compute_layout(&sample(), &config);

        assert_eq!(layout.guides.len(), 3);
        let equipment = &layout.guides[0];
        assert_eq!(equipment.label, "BASEMENT");
        assert_eq!(equipment.start.x, config.x_origin - config.guide_margin);
        assert_eq!(
            equipment.end.x,
            layout.towers[2].origin_x + config.floor_width + config.guide_margin
        );
        // Level 1 label comes from the first tower that has the level.
        assert_eq!(layout.guides[1].label, "NIVEL1");
    }

    #[test]
    fn test_kinds_outside_the_catalog_are_not_placed() {
        let mut config = Config::default();
        config.devices.retain(|kind, _| *kind == DeviceKind::AccessPoint);
        let layout = compute_layout(&sample(), &config);

        assert!(layout.index.device(1, 1, DeviceKind::AccessPoint).is_some());
        assert_eq!(layout.index.device(1, 1, DeviceKind::Tv), None);
        assert_eq!(layout.index.device(2, 1, DeviceKind::Phone), None);
        assert_eq!(layout.index.devices_of(2).count(), 1);
        // Level 2 holds only a phone, so it keeps no icon rows.
        assert_eq!(layout.level_heights[&2], config.level_gap);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = Config::default();
        assert_eq!(compute_layout(&sample(), &config), compute_layout(&sample(), &config));
    }
}
