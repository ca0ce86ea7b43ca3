//! Normalized input records.
//!
//! These mirror the tabular sources the installation is described with:
//! apartment type definitions, the tower/switch table, apartment placements
//! and (alternatively) already aggregated per-level quantities. The records
//! are plain serde structs so the same file can be written by the sample
//! generator and read back by the loader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Complete normalized input file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apartment_types: Vec<ApartmentType>,
    #[serde(default)]
    pub towers: Vec<TowerRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apartments: Vec<ApartmentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<LevelRecord>,
}

/// Device quantities installed in one apartment of a given type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    /// Device kind name → quantity per apartment.
    #[serde(default)]
    pub devices: BTreeMap<String, u32>,
}

/// One row of the tower table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerRecord {
    pub id: u32,
    pub name: String,
    /// Switch kind name → model name.
    #[serde(default)]
    pub switches: BTreeMap<String, String>,
}

/// One apartment placed in a tower level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub tower: Reference,
    pub level: Reference,
    #[serde(rename = "type")]
    pub apartment_type: String,
}

/// Aggregated device quantities for one tower level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    pub tower: Reference,
    pub level: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub devices: BTreeMap<String, u32>,
}

/// A tower or level reference, either numeric or by name (`IDF3`, `NIVEL2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(u32),
    Name(String),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Id(id) => write!(f, "{}", id),
            Reference::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_parsing() {
        let yaml = r#"
apartment_types:
  - name: 2H
    bedrooms: 2
    devices: { ap: 2, phone: 1, tv: 3 }
towers:
  - id: 0
    name: MDF
    switches: { ups: "SRT5K", wifi: "MS225" }
  - id: 1
    name: IDF1
apartments:
  - tower: IDF1
    level: NIVEL1
    type: 2H
  - tower: 1
    level: 2
    type: 2H
levels:
  - tower: 1
    level: 3
    label: ROOF
    devices: { camera: 4 }
"#;
        let input: InputFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(input.apartment_types.len(), 1);
        assert_eq!(input.towers[0].switches.len(), 2);
        assert!(input.towers[1].switches.is_empty());
        assert_eq!(input.apartments[0].tower, Reference::Name("IDF1".to_string()));
        assert_eq!(input.apartments[1].level, Reference::Id(2));
        assert_eq!(input.levels[0].label.as_deref(), Some("ROOF"));
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let yaml = r#"
towers:
  - id: 1
    name: IDF1
levels:
  - tower: 1
    level: 1
    devices: { ap: -2 }
"#;
        assert!(serde_yaml::from_str::<InputFile>(yaml).is_err());
    }
}
