//! Topology model construction.
//!
//! Turns the normalized input records into a [`Topology`]. Catalog problems
//! (unknown apartment type, device kind, switch kind, tower or level
//! reference) are recovered right here by skipping the record with a
//! warning, so one bad row does not block a large model. Structural problems
//! are fatal.

use super::input::{ApartmentType, InputFile, Reference};
use super::types::{DeviceKind, SwitchKind, Topology, Tower, EQUIPMENT_LEVEL_ID, ROOT_TOWER_ID};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info, warn};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;
use std::sync::LazyLock;

/// Trailing number of a tower or level name ("IDF3", "NIVEL 12").
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*$").expect("Invalid trailing number regex"));

/// Level names that denote the equipment level without carrying a number.
static EQUIPMENT_LEVEL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(sotano|basement|equipment|mdf)\s*$").expect("Invalid equipment level regex")
});

/// Structural input errors; these abort the run.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Duplicate tower id {0} in tower table")]
    DuplicateTower(u32),
    #[error("Input contains no towers")]
    EmptyModel,
    #[error("{kind} quantity on tower '{tower}' level '{level}' does not fit in 32 bits")]
    QuantityOverflow {
        tower: String,
        level: String,
        kind: DeviceKind,
    },
}

/// Read and parse a normalized input file (YAML or JSON by extension).
pub fn load_input(path: &Path) -> Result<InputFile> {
    info!("Loading topology input from: {:?}", path);
    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open topology input '{}'", path.display()))?;

    let input: InputFile = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_reader(file)
            .wrap_err_with(|| format!("Malformed JSON topology input '{}'", path.display()))?,
        _ => serde_yaml::from_reader(file)
            .wrap_err_with(|| format!("Malformed YAML topology input '{}'", path.display()))?,
    };

    Ok(input)
}

/// Load an input file and build the topology model from it.
pub fn load_topology(path: &Path) -> Result<Topology> {
    let input = load_input(path)?;
    build_topology(&input)
        .wrap_err_with(|| format!("Invalid topology input '{}'", path.display()))
}

/// Build the topology model from input records.
pub fn build_topology(input: &InputFile) -> Result<Topology, InputError> {
    if input.towers.is_empty() {
        return Err(InputError::EmptyModel);
    }

    let mut topology = Topology::new();
    for record in &input.towers {
        if topology.tower(record.id).is_some() {
            return Err(InputError::DuplicateTower(record.id));
        }
        let mut tower = Tower::new(record.id, record.name.clone());
        for (kind_name, model) in &record.switches {
            let kind = match kind_name.parse::<SwitchKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    warn!("Tower '{}': {}. Skipping switch entry.", record.name, e);
                    continue;
                }
            };
            if kind.is_ups() && record.id != ROOT_TOWER_ID {
                warn!("Tower '{}': UPS is only supported on the root tower. Skipping.", record.name);
                continue;
            }
            if tower.switches.contains_key(&kind) {
                warn!("Tower '{}': duplicate {} switch entry '{}'. Keeping the first.", record.name, kind, kind_name);
                continue;
            }
            tower.switches.insert(kind, model.clone());
        }
        topology.insert(tower);
    }

    let apartment_types: HashMap<&str, &ApartmentType> = input
        .apartment_types
        .iter()
        .map(|t| (t.name.as_str(), t))
        .collect();
    let type_devices: HashMap<&str, Vec<(DeviceKind, u32)>> = apartment_types
        .iter()
        .map(|(name, t)| (*name, parse_devices(&t.devices, &format!("apartment type '{}'", name))))
        .collect();

    let mut apartments_placed = 0usize;
    for apartment in &input.apartments {
        let Some(devices) = type_devices.get(apartment.apartment_type.as_str()) else {
            warn!("Apartment type '{}' not found in apartment types. Skipping row.", apartment.apartment_type);
            continue;
        };
        let Some(tower_id) = resolve_tower(&topology, &apartment.tower) else {
            warn!("Apartment references unknown tower '{}'. Skipping row.", apartment.tower);
            continue;
        };
        let Some((level_id, label)) = resolve_level(&apartment.level) else {
            warn!("Apartment references unknown level '{}'. Skipping row.", apartment.level);
            continue;
        };
        if let Some(tower) = topology.towers.get_mut(&tower_id) {
            add_devices(tower, level_id, &label, devices)?;
            apartments_placed += 1;
        }
    }

    for record in &input.levels {
        let Some(tower_id) = resolve_tower(&topology, &record.tower) else {
            warn!("Level record references unknown tower '{}'. Skipping row.", record.tower);
            continue;
        };
        let Some((level_id, default_label)) = resolve_level(&record.level) else {
            warn!("Level record references unknown level '{}'. Skipping row.", record.level);
            continue;
        };
        let label = record.label.clone().unwrap_or(default_label);
        let devices = parse_devices(&record.devices, &format!("level '{}'", label));
        if let Some(tower) = topology.towers.get_mut(&tower_id) {
            add_devices(tower, level_id, &label, &devices)?;
        }
    }

    if topology.root().is_none() {
        warn!("No root tower (id {}) in input; backbone and power routing will be skipped", ROOT_TOWER_ID);
    }

    info!(
        "Loaded {} towers, {} apartments placed, {} distinct levels",
        topology.towers.len(),
        apartments_placed,
        topology.level_ids().len()
    );
    Ok(topology)
}

/// Parse device kind keys, dropping unknown kinds with a warning. Aliases of
/// one kind stay separate entries and are summed when added to a level.
fn parse_devices(devices: &BTreeMap<String, u32>, context: &str) -> Vec<(DeviceKind, u32)> {
    let mut parsed = Vec::new();
    for (name, quantity) in devices {
        match name.parse::<DeviceKind>() {
            Ok(kind) => parsed.push((kind, *quantity)),
            Err(e) => warn!("In {}: {}. Skipping entry.", context, e),
        }
    }
    parsed
}

/// Accumulate device quantities into a tower level.
fn add_devices(
    tower: &mut Tower,
    level_id: u32,
    label: &str,
    devices: &[(DeviceKind, u32)],
) -> Result<(), InputError> {
    let tower_name = tower.name.clone();
    let level = tower.level_mut(level_id, label);
    for (kind, quantity) in devices {
        if level.add(*kind, *quantity).is_none() {
            return Err(InputError::QuantityOverflow {
                tower: tower_name,
                level: level.label.clone(),
                kind: *kind,
            });
        }
    }
    Ok(())
}

/// Resolve a tower reference to a declared tower id.
fn resolve_tower(topology: &Topology, reference: &Reference) -> Option<u32> {
    match reference {
        Reference::Id(id) => topology.tower(*id).map(|t| t.id),
        Reference::Name(name) => {
            if let Some(tower) = topology
                .towers()
                .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            {
                return Some(tower.id);
            }
            let id = trailing_number(name)?;
            debug!("Resolved tower name '{}' to id {}", name, id);
            topology.tower(id).map(|t| t.id)
        }
    }
}

/// Resolve a level reference to its id and display label.
fn resolve_level(reference: &Reference) -> Option<(u32, String)> {
    match reference {
        Reference::Id(id) => Some((*id, default_level_label(*id))),
        Reference::Name(name) => {
            if EQUIPMENT_LEVEL_NAME.is_match(name) {
                return Some((EQUIPMENT_LEVEL_ID, name.trim().to_string()));
            }
            trailing_number(name).map(|id| (id, name.trim().to_string()))
        }
    }
}

fn trailing_number(name: &str) -> Option<u32> {
    TRAILING_NUMBER
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Label used when a level is referenced by number only.
pub fn default_level_label(id: u32) -> String {
    if id == EQUIPMENT_LEVEL_ID {
        "BASEMENT".to_string()
    } else {
        format!("LEVEL {}", id)
    }
}
