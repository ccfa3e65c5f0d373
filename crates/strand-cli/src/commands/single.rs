//! Single-pattern compilation command.

use crate::commands::common::enforce_compliance;
use crate::config::Config;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use strand_codegen::render_single;
use strand_graph::load_graph;

#[derive(Args)]
pub struct SingleArgs {
    /// Input graph JSON file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output C++ file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Path to a strandc.toml config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: SingleArgs) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let graph = load_graph(&args.input)?;
    enforce_compliance(std::slice::from_ref(&graph), &config)?;

    let code = render_single(&graph)?;
    fs::write(&args.output, &code)
        .with_context(|| format!("failed to write output file '{}'", args.output.display()))?;

    println!("Generated {}", args.output.display());
    println!("  {} nodes compiled", graph.nodes.len());
    println!("  {} lines generated", code.lines().count());
    Ok(())
}
