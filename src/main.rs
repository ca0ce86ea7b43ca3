use cableplan::orchestrator::{generate_plan, PlanOptions};
use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

/// Cabling schematic generator for multi-tower telecom installations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Normalized topology input (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    input: PathBuf,

    /// Settings file overriding the built-in layout and drawing defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the drawing script and reports
    #[arg(short, long, default_value = "cableplan_output")]
    output: PathBuf,

    /// Do not write the bill of materials
    #[arg(long)]
    no_bom: bool,

    /// Also write the computed layout and routes as JSON
    #[arg(long)]
    layout_json: bool,
}

impl Args {
    fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            input: self.input.clone(),
            config: self.config.clone(),
            output_dir: self.output.clone(),
            write_bom: !self.no_bom,
            write_layout_json: self.layout_json,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting cableplan");
    info!("Topology input: {:?}", args.input);
    info!("Output directory: {:?}", args.output);

    let written = generate_plan(&args.plan_options())?;

    info!("Load {:?} in the CAD editor to draw the schematic", written.drawing);
    info!("Cabling plan generated successfully");
    Ok(())
}
