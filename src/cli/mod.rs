//! Command-line front-end: runs a projection over a JSON snapshot export.

pub mod output;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::{ConfigManager, ProjectionConfig};
use crate::errors::Result;
use crate::projection::ProjectionService;
use crate::sources::SourceSnapshot;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CASHFLOW_CORE_BUILD_HASH"),
    ", ",
    env!("CASHFLOW_CORE_BUILD_PROFILE"),
    ", built ",
    env!("CASHFLOW_CORE_BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "cashflow_cli", version = VERSION)]
#[command(about = "Projects bank balance and safe-to-spend amounts from a records snapshot")]
pub struct Cli {
    /// Directory holding config.json (also read from `CASHFLOW_CORE_HOME`).
    #[arg(long, env = "CASHFLOW_CORE_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a projection and print the safe-spending summary.
    Project(ProjectArgs),
    /// Inspect or write the stored projection settings.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// JSON snapshot of bank balance and upstream records.
    #[arg(long)]
    pub snapshot: PathBuf,
    /// Projection start date (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    pub today: Option<NaiveDate>,
    #[arg(long)]
    pub reserve: Option<Decimal>,
    #[arg(long)]
    pub horizon: Option<u32>,
    /// Ignore events dated today.
    #[arg(long)]
    pub exclude_today: bool,
    /// Seed from the ledger balance instead of the available balance.
    #[arg(long)]
    pub ledger_balance: bool,
    /// Print the full report as JSON.
    #[arg(long)]
    pub json: bool,
    /// Print every simulated day, not only days with activity.
    #[arg(long)]
    pub all_days: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Show,
    /// Write a config file, keeping stored values not overridden here.
    Set(ConfigSetArgs),
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    #[arg(long)]
    pub reserve: Option<Decimal>,
    #[arg(long)]
    pub horizon: Option<u32>,
    #[arg(long)]
    pub exclude_today: Option<bool>,
    #[arg(long)]
    pub use_available_balance: Option<bool>,
    #[arg(long)]
    pub assumed_settlement_days: Option<u32>,
}

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.plain {
        colored::control::set_override(false);
    }
    let manager = match cli.home {
        Some(home) => ConfigManager::with_base_dir(home)?,
        None => ConfigManager::new()?,
    };

    match cli.command {
        Command::Project(args) => project(&manager, args),
        Command::Config(args) => match args.command {
            ConfigCommand::Show => {
                let config = manager.load()?;
                output::print_config(manager.path(), &config)
            }
            ConfigCommand::Set(args) => {
                let mut config = manager.load()?;
                apply_overrides(&mut config, &args);
                manager.save(&config)?;
                output::success(format!("Configuration saved to {}", manager.path().display()));
                Ok(())
            }
        },
    }
}

fn project(manager: &ConfigManager, args: ProjectArgs) -> Result<()> {
    let mut config = manager.load()?;
    if let Some(reserve) = args.reserve {
        config.reserve_amount = reserve;
    }
    if let Some(horizon) = args.horizon {
        config.horizon_days = horizon;
    }
    if args.exclude_today {
        config.exclude_today_events = true;
    }
    if args.ledger_balance {
        config.use_available_balance = false;
    }

    let snapshot = SourceSnapshot::load_from_path(&args.snapshot)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let report = ProjectionService::run(&snapshot, &config, today)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report, args.all_days);
    }
    Ok(())
}

fn apply_overrides(config: &mut ProjectionConfig, args: &ConfigSetArgs) {
    if let Some(reserve) = args.reserve {
        config.reserve_amount = reserve;
    }
    if let Some(horizon) = args.horizon {
        config.horizon_days = horizon;
    }
    if let Some(exclude_today) = args.exclude_today {
        config.exclude_today_events = exclude_today;
    }
    if let Some(use_available) = args.use_available_balance {
        config.use_available_balance = use_available;
    }
    if let Some(days) = args.assumed_settlement_days {
        config.assumed_settlement_days = days;
    }
}
