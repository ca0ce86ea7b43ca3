//! Plan orchestrator.
//!
//! Coordinates a whole run: input and settings loading, layout, the three
//! cable routers, drawing emission and the report. Every output is rendered
//! in memory before the first file is written, so a failed run leaves no
//! partial drawing behind.

use crate::config::Config;
use crate::config_loader::load_config_or_default;
use crate::emit::{build_drawing, render_lisp};
use crate::layout::{compute_layout, Layout};
use crate::report::render_bom;
use crate::routing::{route_all, Route};
use crate::topology::{load_topology, Topology};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the drawing script inside the output directory.
pub const DRAWING_FILE: &str = "drawing.lsp";
pub const BOM_FILE: &str = "bom.txt";
pub const LAYOUT_FILE: &str = "layout.json";

/// What to read and what to write.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub write_bom: bool,
    pub write_layout_json: bool,
}

/// Everything one run produces, before anything touches the disk.
#[derive(Debug, Clone)]
pub struct Plan {
    pub layout: Layout,
    pub routes: Vec<Route>,
    /// AutoLISP drawing script.
    pub script: String,
    pub bom: String,
}

#[derive(Serialize)]
struct LayoutDump<'a> {
    layout: &'a Layout,
    routes: &'a [Route],
}

impl Plan {
    /// Layout and routes as pretty JSON.
    pub fn layout_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&LayoutDump {
            layout: &self.layout,
            routes: &self.routes,
        })
        .wrap_err("Failed to serialize layout to JSON")
    }

    pub fn segment_count(&self) -> usize {
        self.routes.iter().map(|r| r.segments().count()).sum()
    }
}

/// Run layout, routing and emission on an already loaded model.
///
/// `generated_at` only appears in the BOM header; the drawing script does
/// not depend on it.
pub fn build_plan(topology: &Topology, config: &Config, generated_at: &str) -> Plan {
    if topology.root().is_none() {
        warn!("Model has no root tower (id 0); no backbone or power will be drawn");
    }

    let layout = compute_layout(topology, config);
    let routes = route_all(topology, &layout, config);
    let drawing = build_drawing(topology, &layout, &routes, config);
    let script = render_lisp(&drawing);
    let bom = render_bom(topology, config, generated_at);

    Plan {
        layout,
        routes,
        script,
        bom,
    }
}

/// Paths written by [`generate_plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFiles {
    pub drawing: PathBuf,
    pub bom: Option<PathBuf>,
    pub layout: Option<PathBuf>,
}

/// Load the inputs, build the plan and write it to the output directory.
pub fn generate_plan(options: &PlanOptions) -> Result<WrittenFiles> {
    let config = load_config_or_default(options.config.as_deref())?;
    let topology = load_topology(&options.input)?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let plan = build_plan(&topology, &config, &generated_at);
    let layout_json = if options.write_layout_json {
        Some(plan.layout_json()?)
    } else {
        None
    };

    fs::create_dir_all(&options.output_dir).wrap_err_with(|| {
        format!("Failed to create output directory '{}'", options.output_dir.display())
    })?;

    let drawing = options.output_dir.join(DRAWING_FILE);
    write_file(&drawing, &plan.script)?;

    let bom = if options.write_bom {
        let path = options.output_dir.join(BOM_FILE);
        write_file(&path, &plan.bom)?;
        Some(path)
    } else {
        None
    };

    let layout = match layout_json {
        Some(json) => {
            let path = options.output_dir.join(LAYOUT_FILE);
            write_file(&path, &json)?;
            Some(path)
        }
        None => None,
    };

    println!("Generated cabling plan at {:?}", drawing);
    println!("  - Towers: {}", plan.layout.towers.len());
    println!("  - Levels: {}", plan.layout.level_y.len());
    println!("  - Placed elements: {}", plan.layout.index.len());
    println!("  - Cable segments: {}", plan.segment_count());
    if let Some(path) = &bom {
        println!("  - Bill of materials at {:?}", path);
    }
    if let Some(path) = &layout {
        println!("  - Layout dump at {:?}", path);
    }

    Ok(WrittenFiles { drawing, bom, layout })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}
