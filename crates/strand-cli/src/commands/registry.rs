//! Multi-pattern registry compilation command.

use crate::commands::common::enforce_compliance;
use crate::config::Config;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use strand_codegen::render_registry;
use strand_graph::load_graph_dir;

#[derive(Args)]
pub struct RegistryArgs {
    /// Directory of graph JSON files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output C++ file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Path to a strandc.toml config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: RegistryArgs) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let graphs = load_graph_dir(&args.input_dir)?;
    enforce_compliance(&graphs, &config)?;

    let code = render_registry(&graphs)?;
    fs::write(&args.output, &code)
        .with_context(|| format!("failed to write output file '{}'", args.output.display()))?;

    println!("Generated {}", args.output.display());
    println!("  {} patterns compiled", graphs.len());
    println!("  {} lines generated", code.lines().count());
    Ok(())
}
