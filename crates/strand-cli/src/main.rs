//! strandc - compile lighting node graphs to embedded C++ patterns.

mod commands;
mod config;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "strandc")]
#[command(author, version, about = "Strand pattern graph compiler", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input graph JSON file (bare compatibility form of `single`)
    input: Option<PathBuf>,

    /// Output C++ file (bare compatibility form of `single`)
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a single graph to C++
    Single(commands::single::SingleArgs),

    /// Compile every graph in a directory to a multi-pattern registry
    Registry(commands::registry::RegistryArgs),

    /// Validate and compile graphs without writing output
    Check(commands::check::CheckArgs),

    /// List the supported node types and their parameters
    Nodes(commands::nodes::NodesArgs),
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Single(args)) => commands::single::run(args),
        Some(Commands::Registry(args)) => commands::registry::run(args),
        Some(Commands::Check(args)) => commands::check::run(args),
        Some(Commands::Nodes(args)) => commands::nodes::run(args),
        None => match (cli.input, cli.output) {
            // Bare positional form kept for older build scripts:
            // `strandc <input> <output>` compiles in single mode.
            (Some(input), Some(output)) => commands::single::run(commands::single::SingleArgs {
                input,
                output,
                config: None,
            }),
            _ => {
                Cli::command().print_help()?;
                std::process::exit(2);
            }
        },
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}
