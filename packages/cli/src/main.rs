mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add_zone, apply, inspect, move_zone, AddZoneArgs, ApplyArgs, InspectArgs, MoveZoneArgs,
};
use config::Config;

/// Facsimile CLI - link score measures to regions of page images
#[derive(Parser, Debug)]
#[command(name = "facs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List pages, zones and measures of an MEI file
    Inspect(InspectArgs),

    /// Draw a new zone on a page and link it to a measure
    AddZone(AddZoneArgs),

    /// Change the bounds of an existing zone
    MoveZone(MoveZoneArgs),

    /// Replay a JSON list of editor mutations
    Apply(ApplyArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| Config::load(&cwd.display().to_string()))
        .and_then(|config| {
            init_logging(&config.log_level);
            run(cli.command, &config)
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Inspect(args) => inspect(args, config),
        Command::AddZone(args) => add_zone(args, config),
        Command::MoveZone(args) => move_zone(args, config),
        Command::Apply(args) => apply(args, config),
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}
