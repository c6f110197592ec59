pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "neuroboutique",
    about = "NeuroBoutique operator CLI",
    long_about = "Inspect configuration, check storefront readiness, and run the recommendation \
                  and brain-impact engines against the demo catalog.",
    after_help = "Examples:\n  neuroboutique doctor --json\n  neuroboutique recommend --sleep 40\n  \
                  neuroboutique impact --line 1:1 --line 2:2"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config and demo store readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print the demo catalog")]
    Catalog,
    #[command(
        about = "Rank the demo catalog for a cognitive profile",
        long_about = "Unset dimensions take the baseline profile value. With no dimension flags \
                      the catalog is returned in stored order."
    )]
    Recommend {
        #[arg(long)]
        memory: Option<f64>,
        #[arg(long)]
        focus: Option<f64>,
        #[arg(long)]
        sleep: Option<f64>,
        #[arg(long)]
        energy: Option<f64>,
        #[arg(long)]
        mood: Option<f64>,
        #[arg(long, help = "Number of products to return (defaults to the configured limit)")]
        limit: Option<usize>,
    },
    #[command(about = "Predict brain impact and price a cart of demo products")]
    Impact {
        #[arg(long = "line", value_name = "PRODUCT_ID:QTY", required = true)]
        lines: Vec<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Catalog => commands::catalog::run(),
        Command::Recommend { memory, focus, sleep, energy, mood, limit } => {
            commands::recommend::run(
                commands::recommend::ProfileArgs { memory, focus, sleep, energy, mood },
                limit,
            )
        }
        Command::Impact { lines } => commands::impact::run(&lines),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
