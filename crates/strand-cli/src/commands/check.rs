//! Validation command: load, validate, and compile without writing output.

use crate::commands::common::enforce_compliance;
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;
use strand_codegen::{render_registry, render_single};
use strand_graph::{load_graph, load_graph_dir};

#[derive(Args)]
pub struct CheckArgs {
    /// Graph JSON file, or a directory of graphs
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to a strandc.toml config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let batch = args.input.is_dir();
    let graphs = if batch {
        load_graph_dir(&args.input)?
    } else {
        vec![load_graph(&args.input)?]
    };

    enforce_compliance(&graphs, &config)?;

    // Full compilation, output discarded: the point is surfacing every
    // error the compile modes would hit.
    if batch {
        render_registry(&graphs)?;
    } else {
        render_single(&graphs[0])?;
    }

    println!("OK: {} pattern(s) compile cleanly", graphs.len());
    Ok(())
}
