#[cfg(test)]
mod plan_scenarios {
    use std::io::Write;
    use tempfile::Builder;

    use cableplan::config::Config;
    use cableplan::layout::compute_layout;
    use cableplan::orchestrator::build_plan;
    use cableplan::routing::{route_fiber, route_power, route_utp, Route};
    use cableplan::topology::{load_topology, DeviceKind, SwitchKind, Topology};

    /// Root with UPS, WiFi and Data; two WiFi-only branches with 2 APs on level 1.
    const TWO_BRANCH_WIFI: &str = r#"
towers:
  - id: 0
    name: MDF
    switches: { SW-UPS: UPS, SW-WIFI: Meraki MS225, SW-DATA: Meraki MS225 }
  - id: 1
    name: IDF1
    switches: { SW-WIFI: Meraki MS225 }
  - id: 2
    name: IDF2
    switches: { SW-WIFI: Meraki MS225 }
levels:
  - { tower: IDF1, level: NIVEL1, devices: { apQty: 2 } }
  - { tower: IDF2, level: NIVEL1, devices: { apQty: 2 } }
"#;

    /// Three towers of mixed equipment, several levels, records in shuffled order.
    const CAMPUS: &str = r#"
apartment_types:
  - name: 2H
    devices: { ap: 2, phone: 1, tv: 3 }
  - name: 3H
    devices: { ap: 2, phone: 1, tv: 4 }
towers:
  - id: 3
    name: IDF3
    switches: { cctv: DS-3E3728F, wifi: MS225, iptv: RG-NBS6002 }
  - id: 0
    name: MDF
    switches: { data: MS225, wifi: MS225, ups: UPS, iptv: RG-NBS6002, cctv: DS-3E3728F, telephony: MS225 }
  - id: 1
    name: IDF1
    switches: { telephony: MS225, wifi: MS225, iptv: RG-NBS6002 }
apartments:
  - { tower: IDF3, level: NIVEL2, type: 3H }
  - { tower: IDF1, level: NIVEL1, type: 2H }
  - { tower: IDF1, level: NIVEL4, type: 3H }
  - { tower: IDF1, level: NIVEL1, type: 3H }
  - { tower: IDF3, level: NIVEL5, type: 2H }
levels:
  - { tower: IDF3, level: 2, devices: { camera: 4 } }
"#;

    fn load(yaml: &str) -> Topology {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", yaml).unwrap();
        load_topology(file.path()).unwrap()
    }

    fn labels(route: &Route) -> Vec<String> {
        route.labels().map(|l| l.text.clone()).collect()
    }

    #[test]
    fn test_two_branch_wifi_scenario() {
        let config = Config::default();
        let topology = load(TWO_BRANCH_WIFI);
        let layout = compute_layout(&topology, &config);

        // Root: UPS plus two switch boxes; one box per branch.
        assert!(layout.index.switch(0, SwitchKind::Ups).is_some());
        assert!(layout.index.switch(0, SwitchKind::Wifi).is_some());
        assert!(layout.index.switch(0, SwitchKind::Data).is_some());
        for branch in [1, 2] {
            let boxes = layout
                .index
                .iter()
                .filter(|(t, key, _)| *t == branch && matches!(key, cableplan::layout::ElementKey::Switch(_)))
                .count();
            assert_eq!(boxes, 1);
        }

        let utp = route_utp(&topology, &layout, &config);
        let ap_labels = labels(&utp).into_iter().filter(|l| l == "2xAP").count();
        assert_eq!(ap_labels, 2);

        let fiber = route_fiber(&topology, &layout, &config);
        assert_eq!(labels(&fiber), vec!["2xFO WIFI", "1xFO WIFI"]);

        let power = route_power(&topology, &layout, &config);
        assert_eq!(
            labels(&power),
            vec!["4xUPS-PWR", "3xUPS-PWR", "2xUPS-PWR", "1xUPS-PWR"]
        );
    }

    #[test]
    fn test_tower_pitch_and_shared_levels() {
        let config = Config::default();
        let topology = load(CAMPUS);
        let layout = compute_layout(&topology, &config);

        let xs: Vec<f64> = layout.towers.iter().map(|t| t.origin_x).collect();
        let ids: Vec<u32> = layout.towers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 3]);
        for pair in xs.windows(2) {
            assert_eq!(pair[1] - pair[0], config.floor_width + config.tower_gap);
        }

        let ys: Vec<f64> = layout.level_y.values().copied().collect();
        assert!(ys.windows(2).all(|w| w[1] > w[0]));

        // Both branch towers have APs on different levels but share level Ys.
        let level2 = layout.level_y(2).unwrap();
        let ap = layout
            .index
            .device(3, 2, cableplan::topology::DeviceKind::AccessPoint)
            .unwrap();
        assert_eq!(ap.y, level2 + config.device_y_offset);
    }

    #[test]
    fn test_switch_stack_ignores_record_order() {
        let config = Config::default();
        let topology = load(CAMPUS);
        let layout = compute_layout(&topology, &config);

        // IDF3 lists cctv, wifi, iptv; the stack follows the priority order.
        let cctv = layout.index.switch(3, SwitchKind::Cctv).unwrap();
        let iptv = layout.index.switch(3, SwitchKind::Iptv).unwrap();
        let wifi = layout.index.switch(3, SwitchKind::Wifi).unwrap();
        assert!(cctv.y > iptv.y && iptv.y > wifi.y);
        assert_eq!(cctv.y - config.switch_height - iptv.y, config.switch_vertical_spacing);
        assert_eq!(iptv.y - config.switch_height - wifi.y, config.switch_vertical_spacing);
    }

    #[test]
    fn test_utp_level_labels_sum_to_totals() {
        let config = Config::default();
        let topology = load(CAMPUS);
        let layout = compute_layout(&topology, &config);
        let utp = route_utp(&topology, &layout, &config);

        // IDF1 TVs: 3 + 4 on level 1, 4 on level 4; IDF3 TVs: 4 on level 2, 3 on level 5.
        let all = labels(&utp);
        assert!(all.contains(&"7xTV".to_string()));
        assert!(all.contains(&"11xCAT6A".to_string()));
        assert!(all.contains(&"4xCAM".to_string()));

        // IDF1 phones: 2 on level 1, 1 on level 4, 3 in total.
        assert!(all.contains(&"3xCAT6A".to_string()));
    }

    #[test]
    fn test_fiber_counts_descend_per_kind() {
        let config = Config::default();
        let topology = load(CAMPUS);
        let layout = compute_layout(&topology, &config);
        let fiber = route_fiber(&topology, &layout, &config);

        assert_eq!(
            labels(&fiber),
            vec![
                "1xFO CCTV",
                "2xFO IPTV",
                "1xFO IPTV",
                "1xFO TEL",
                "2xFO WIFI",
                "1xFO WIFI",
            ]
        );
    }

    #[test]
    fn test_no_ups_means_no_power() {
        let config = Config::default();
        let yaml = TWO_BRANCH_WIFI.replace("SW-UPS: UPS, ", "");
        let topology = load(&yaml);
        let layout = compute_layout(&topology, &config);

        let power = route_power(&topology, &layout, &config);
        assert_eq!(power.segments().count(), 0);
        assert_eq!(power.labels().count(), 0);
    }

    #[test]
    fn test_drawing_is_byte_identical_between_runs() {
        let config = Config::default();
        let first = build_plan(&load(CAMPUS), &config, "2026-10-19 08:00:00");
        let second = build_plan(&load(CAMPUS), &config, "2026-10-19 08:00:00");

        assert_eq!(first.script, second.script);
        assert_eq!(first.bom, second.bom);
        assert_eq!(first.layout_json().unwrap(), second.layout_json().unwrap());
    }

    #[test]
    fn test_partial_device_catalog_skips_missing_kinds() {
        let config: Config = serde_yaml::from_str(
            r#"
devices:
  access_point: { layer: "WiFi_APs", color: 3 }
"#,
        )
        .unwrap();
        let yaml = TWO_BRANCH_WIFI.replace(
            "switches: { SW-WIFI: Meraki MS225 }\n  - id: 2",
            "switches: { SW-WIFI: Meraki MS225, SW-TEL: Meraki MS225 }\n  - id: 2",
        ) + "  - { tower: IDF1, level: NIVEL1, devices: { phone: 3 } }\n";
        let topology = load(&yaml);
        assert_eq!(topology.tower(1).unwrap().levels[&1].quantity(DeviceKind::Phone), 3);

        let plan = build_plan(&topology, &config, "2026-10-19 08:00:00");
        assert_eq!(plan.layout.index.device(1, 1, DeviceKind::Phone), None);
        assert!(plan.layout.index.device(1, 1, DeviceKind::AccessPoint).is_some());
        assert!(!plan.script.contains("3xTEL"));
        assert!(plan.script.contains("2xAP"));
        assert!(plan.bom.contains("Network points:     4"));
        assert!(!plan.bom.contains(&format!("- {:<10}:", "TEL")));
    }

    #[test]
    fn test_branch_ups_is_ignored() {
        let config = Config::default();
        let yaml = TWO_BRANCH_WIFI.replace(
            "switches: { SW-WIFI: Meraki MS225 }\n  - id: 2",
            "switches: { SW-WIFI: Meraki MS225, SW-UPS: UPS }\n  - id: 2",
        );
        let topology = load(&yaml);
        assert!(!topology.tower(1).unwrap().has_switch(SwitchKind::Ups));

        let layout = compute_layout(&topology, &config);
        assert!(layout.index.switch(1, SwitchKind::Ups).is_none());
    }
}
