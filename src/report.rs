//! Bill of materials.
//!
//! Generates the plain-text BOM that accompanies the drawing: device totals,
//! switch counts per kind and model, and rough cable length estimates.

use crate::config::Config;
use crate::topology::{SwitchKind, Topology};
use std::collections::BTreeMap;

/// Summary counts behind the BOM.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BomTotals {
    pub towers: usize,
    pub network_points: u64,
    /// Device label → total units, in device draw order.
    pub devices: Vec<(String, u64)>,
    /// Switch kind → model → units. Switches without a model count under "".
    pub switches: BTreeMap<SwitchKind, BTreeMap<String, u32>>,
    pub backbone_runs: u32,
    pub has_ups: bool,
}

impl BomTotals {
    pub fn utp_meters(&self, config: &Config) -> u64 {
        self.network_points.saturating_mul(u64::from(config.utp_meters_per_point))
    }

    pub fn fiber_meters(&self, config: &Config) -> u64 {
        u64::from(self.backbone_runs) * u64::from(config.fiber_meters_per_run)
    }
}

/// Count everything the BOM lists.
pub fn bom_totals(topology: &Topology, config: &Config) -> BomTotals {
    let devices: Vec<(String, u64)> = config
        .drawn_devices()
        .map(|kind| {
            let total = topology.towers().map(|t| t.total(kind)).sum();
            (kind.label().to_string(), total)
        })
        .collect();

    let mut switches: BTreeMap<SwitchKind, BTreeMap<String, u32>> = BTreeMap::new();
    for tower in topology.towers() {
        for (kind, model) in &tower.switches {
            if kind.is_ups() {
                continue;
            }
            *switches
                .entry(*kind)
                .or_default()
                .entry(model.trim().to_string())
                .or_insert(0) += 1;
        }
    }

    // One strand per (kind, branch) pair served from the root.
    let backbone_runs = topology.root().map_or(0, |root| {
        root.switches
            .keys()
            .filter(|kind| !kind.is_ups())
            .map(|kind| topology.branches().filter(|b| b.has_switch(*kind)).count() as u32)
            .sum()
    });

    BomTotals {
        towers: topology.towers.len(),
        network_points: devices.iter().map(|(_, total)| total).sum(),
        devices,
        switches,
        backbone_runs,
        has_ups: topology.has_ups(),
    }
}

/// Render the BOM text. `generated_at` is printed verbatim in the header.
pub fn render_bom(topology: &Topology, config: &Config, generated_at: &str) -> String {
    let totals = bom_totals(topology, config);
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(60));
    lines.push("              CABLING BILL OF MATERIALS (BOM)".to_string());
    lines.push("=".repeat(60));
    lines.push(format!("Generated: {}", generated_at));
    lines.push(String::new());

    lines.push("--- PROJECT SUMMARY ---".to_string());
    lines.push(format!("Towers (MDF + IDF): {}", totals.towers));
    lines.push(format!("Network points:     {}", totals.network_points));
    lines.push(String::new());

    lines.push("--- DEVICES ---".to_string());
    for (label, total) in &totals.devices {
        lines.push(format!("- {:<10}: {} units", label, total));
    }
    lines.push(String::new());

    lines.push("--- SWITCHES BY KIND AND MODEL ---".to_string());
    if totals.switches.is_empty() {
        lines.push("- none".to_string());
    }
    for (kind, models) in &totals.switches {
        let count: u32 = models.values().sum();
        lines.push(format!("- {:<15}: {} units", kind.label(), count));
        for (model, units) in models {
            if !model.is_empty() {
                lines.push(format!("    - Model: {} ({} units)", model, units));
            }
        }
    }
    lines.push(String::new());

    lines.push("--- CABLE ESTIMATE ---".to_string());
    lines.push(format!(
        "- UTP {}: ~{} m",
        config.utp_cable_label,
        thousands(totals.utp_meters(config))
    ));
    lines.push(format!(
        "- Fiber {}: ~{} m (rough estimate, {} backbone runs)",
        config.fiber_label,
        thousands(totals.fiber_meters(config)),
        totals.backbone_runs
    ));
    lines.push(String::new());

    lines.push("--- NOTES ---".to_string());
    lines.push("- Quantities are taken from the input records.".to_string());
    lines.push("- Cable lengths are estimates and must be verified on site.".to_string());
    if totals.has_ups {
        lines.push("- One central UPS in the MDF feeds every switch.".to_string());
    }
    lines.push("=".repeat(60));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Format with comma thousands separators.
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
