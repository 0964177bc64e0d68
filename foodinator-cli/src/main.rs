use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod planner;

use commands::{ConfigCommand, GroceryCommand, MealsCommand, PlanCommand, ScheduleCommand};
use config::Config;
use planner::Planner;

#[derive(Parser)]
#[command(name = "foodinator")]
#[command(version)]
#[command(about = "Plan a week of meals and build the grocery list", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the meal catalog
    Meals(MealsCommand),

    /// Choose meals for the week
    Plan(PlanCommand),

    /// Day-by-day schedule and cooked status
    Schedule(ScheduleCommand),

    /// Grocery list for the planned meals
    Grocery(GroceryCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path),
        Some(Commands::Meals(cmd)) => cmd.run(&mut Planner::open(&config)?),
        Some(Commands::Plan(cmd)) => cmd.run(&mut Planner::open(&config)?),
        Some(Commands::Schedule(cmd)) => cmd.run(&mut Planner::open(&config)?),
        Some(Commands::Grocery(cmd)) => cmd.run(&mut Planner::open(&config)?),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}
