//! Sprig CLI - content tree navigator.
//!
//! Provides commands for:
//! - `tree`: Print the content tree
//! - `nav`: Show neighbours and cycle targets of a page
//! - `siblings`: List the siblings of a page
//! - `cycle`: Show the cycle collection of a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CycleArgs, GlobalArgs, NavArgs, SiblingsArgs, TreeArgs};
use output::Output;

/// Sprig - content tree navigator.
#[derive(Parser)]
#[command(name = "sprig", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the content tree.
    Tree(TreeArgs),
    /// Show neighbours and cycle targets of a page.
    Nav(NavArgs),
    /// List the siblings of a page.
    Siblings(SiblingsArgs),
    /// Show the cycle collection of a page.
    Cycle(CycleArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree(args) => args.execute(&cli.global),
        Commands::Nav(args) => args.execute(&cli.global),
        Commands::Siblings(args) => args.execute(&cli.global),
        Commands::Cycle(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
