//! # Cableplan - Multi-tower telecom cabling schematics
//!
//! This library turns a tower → level → device-quantity model of a
//! residential or commercial complex into a complete cabling schematic for
//! a CAD editor, plus a bill of materials.
//!
//! ## Overview
//!
//! A run places every tower side by side, stacks each tower's levels
//! bottom-up, puts the switch (and, on the root tower, UPS) stack inside the
//! equipment level, and then routes three independent cable systems:
//!
//! - **UTP**: device icons to their switch, one trunk per device kind
//! - **Fiber**: root switches to every branch tower on staggered buses
//! - **Power**: the root UPS to every switch on one bus below the fiber
//!
//! The result is emitted as an AutoLISP script of drawing primitives.
//! Layout strictly precedes routing; the coordinate index it produces is
//! read-only afterwards, and the same inputs always produce byte-identical
//! drawings.
//!
//! ## Architecture
//!
//! - `config`: settings structure, defaults and validation
//! - `config_loader`: settings file loading (YAML or JSON)
//! - `topology`: quantity model, input records and the model loader
//! - `layout`: layout engine and the coordinate index
//! - `routing`: UTP, fiber and power routers
//! - `emit`: primitive stream, icons and AutoLISP serialization
//! - `report`: bill of materials
//! - `orchestrator`: the whole pipeline, from files to files
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cableplan::orchestrator::{generate_plan, PlanOptions};
//! use std::path::PathBuf;
//!
//! let written = generate_plan(&PlanOptions {
//!     input: PathBuf::from("towers.yaml"),
//!     config: None,
//!     output_dir: PathBuf::from("cableplan_output"),
//!     write_bom: true,
//!     write_layout_json: false,
//! })?;
//!
//! // Load written.drawing in the CAD editor with APPLOAD.
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Input Format
//!
//! ```yaml
//! apartment_types:
//!   - name: 2H
//!     devices: { ap: 1, phone: 1, tv: 2, data: 2 }
//! towers:
//!   - id: 0
//!     name: MDF
//!     switches: { ups: SRT5K, wifi: MS225-48, data: MS225-48 }
//!   - id: 1
//!     name: IDF1
//!     switches: { wifi: MS120-24 }
//! apartments:
//!   - { tower: IDF1, level: NIVEL3, type: 2H }
//! ```
//!
//! ## Error Handling
//!
//! File-facing functions return `color_eyre::Result` with the offending path
//! in the error context. Unknown catalog references in the input are skipped
//! with a warning; structural problems abort the run before anything is
//! written.

pub mod config;
pub mod config_loader;
pub mod emit;
pub mod layout;
pub mod orchestrator;
pub mod report;
pub mod routing;
pub mod topology;
