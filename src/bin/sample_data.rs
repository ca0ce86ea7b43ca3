//! Sample topology generator for cableplan.
//!
//! Writes a normalized input file with a root MDF tower, `--towers` branch
//! towers and a fixed mix of apartment types placed at random over the
//! branch levels. The same seed always produces the same file.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use cableplan::topology::{ApartmentRecord, ApartmentType, InputFile, Reference, TowerRecord};

/// (name, bedrooms, units, [(device, quantity)])
const APARTMENT_MIX: [(&str, u32, usize, [(&str, u32); 3]); 4] = [
    ("1H", 1, 4, [("phone", 1), ("access_point", 2), ("tv", 2)]),
    ("2H", 2, 106, [("phone", 1), ("access_point", 2), ("tv", 3)]),
    ("3H", 3, 58, [("phone", 1), ("access_point", 2), ("tv", 4)]),
    ("4H", 4, 18, [("phone", 1), ("access_point", 3), ("tv", 5)]),
];

/// Switch table replicated in every tower.
const SWITCH_MODELS: [(&str, &str); 5] = [
    ("wifi", "Meraki MS225"),
    ("telephony", "Meraki MS225"),
    ("iptv", "RG-NBS6002"),
    ("cctv", "DS-3E3728F"),
    ("data", "Meraki MS225"),
];

#[derive(Parser, Debug)]
#[command(name = "cableplan-sample")]
#[command(about = "Generate a sample topology input for cableplan")]
#[command(version)]
struct Cli {
    /// Number of branch towers (IDF1..IDFn)
    #[arg(short, long, default_value = "15", value_parser = clap::value_parser!(u32).range(1..))]
    towers: u32,

    /// Number of apartment levels per branch tower
    #[arg(short, long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..))]
    levels: u32,

    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file (.yaml, or .json for JSON)
    #[arg(short, long, default_value = "towers.yaml")]
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Generating {} towers x {} levels (seed {})", cli.towers, cli.levels, seed);

    let input = generate_sample(cli.towers, cli.levels, seed);
    let text = if cli.output.extension().map_or(false, |ext| ext == "json") {
        serde_json::to_string_pretty(&input).context("Failed to serialize sample to JSON")?
    } else {
        serde_yaml::to_string(&input).context("Failed to serialize sample to YAML")?
    };

    fs::write(&cli.output, text)
        .with_context(|| format!("Failed to write sample input to {}", cli.output.display()))?;

    info!(
        "Sample input written to {} ({} apartments)",
        cli.output.display(),
        input.apartments.len()
    );
    Ok(())
}

/// Build a sample input file.
fn generate_sample(towers: u32, levels: u32, seed: u64) -> InputFile {
    let mut rng = StdRng::seed_from_u64(seed);

    let apartment_types = APARTMENT_MIX
        .iter()
        .map(|(name, bedrooms, _, devices)| ApartmentType {
            name: name.to_string(),
            bedrooms: Some(*bedrooms),
            devices: devices.iter().map(|(kind, qty)| (kind.to_string(), *qty)).collect(),
        })
        .collect();

    let mut tower_records = vec![TowerRecord {
        id: 0,
        name: "MDF".to_string(),
        switches: switch_table(true),
    }];
    tower_records.extend((1..=towers).map(|id| TowerRecord {
        id,
        name: format!("IDF{}", id),
        switches: switch_table(false),
    }));

    let mut units: Vec<&str> = APARTMENT_MIX
        .iter()
        .flat_map(|(name, _, count, _)| std::iter::repeat(*name).take(*count))
        .collect();
    units.shuffle(&mut rng);

    let apartments = units
        .into_iter()
        .enumerate()
        .map(|(i, kind)| ApartmentRecord {
            id: Some(i as u32 + 1),
            tower: Reference::Name(format!("IDF{}", rng.gen_range(1..=towers))),
            level: Reference::Name(format!("NIVEL{}", rng.gen_range(1..=levels))),
            apartment_type: kind.to_string(),
        })
        .collect();

    InputFile {
        apartment_types,
        towers: tower_records,
        apartments,
        levels: Vec::new(),
    }
}

fn switch_table(root: bool) -> BTreeMap<String, String> {
    let mut switches: BTreeMap<String, String> = SWITCH_MODELS
        .iter()
        .map(|(kind, model)| (kind.to_string(), model.to_string()))
        .collect();
    if root {
        switches.insert("ups".to_string(), "UPS".to_string());
    }
    switches
}
