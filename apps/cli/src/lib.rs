//! # GO-RENT Command Line
//!
//! Library half of the `gorent` binary: argument parsing, logging setup
//! and command dispatch. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! gorent_cli/
//! ├── lib.rs          ◄─── You are here (clap types, run, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── TOML config + environment overrides
//! │   └── db.rs       ◄─── Database state wrapper
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── vehicles, restock, discounts
//! │   ├── quote.rs    ◄─── quote, quick, receipt
//! │   ├── history.rs  ◄─── history, stats
//! │   ├── export.rs   ◄─── export
//! │   └── config.rs   ◄─── config
//! └── error.rs        ◄─── CliError + exit codes
//! ```
//!
//! ## Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Parse arguments (clap) ──────────────────────────────────────────► │
//! │     • usage errors exit 2 before anything else runs                    │
//! │                                                                         │
//! │  2. Initialize logging ──────────────────────────────────────────────► │
//! │     • stderr only, stdout carries command output                       │
//! │     • RUST_LOG wins over -v / -vv                                      │
//! │                                                                         │
//! │  3. Load configuration ──────────────────────────────────────────────► │
//! │     • --config, GORENT_CONFIG, default path, built-in defaults         │
//! │                                                                         │
//! │  4. Open database (only for commands that need it) ──────────────────► │
//! │     • --db, GORENT_DB_PATH, config file, platform data dir             │
//! │                                                                         │
//! │  5. Dispatch ────────────────────────────────────────────────────────► │
//! │     • Ok  → stdout, exit 0                                             │
//! │     • Err → "error: ..." on stderr, exit code from ErrorCode           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gorent_core::{ExportFormat, RentalRequest};

use commands::quote::QuoteOptions;
use error::{CliError, CliResult};
use state::{ConfigState, DbState};

/// Vehicle rental price calculator.
#[derive(Parser, Debug)]
#[command(name = "gorent", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides the configured path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List vehicles with price per day and remaining stock
    Vehicles {
        #[arg(long)]
        json: bool,
    },

    /// Put every vehicle back to its catalog stock
    Restock,

    /// List discount tiers, optionally for a rental length
    Discounts {
        /// Show which tier applies to this many days
        #[arg(long)]
        days: Option<u32>,
    },

    /// Calculate the price of a rental
    Quote(QuoteArgs),

    /// One-unit estimate without customer details
    Quick {
        #[arg(long)]
        vehicle: String,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        #[arg(long)]
        json: bool,
    },

    /// Saved transactions, newest first
    History {
        /// Show at most this many transactions
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,

        /// Delete every saved transaction (stock is kept)
        #[arg(long, conflicts_with_all = ["limit", "json"])]
        clear: bool,
    },

    /// Reprint the receipt of a saved transaction
    Receipt {
        /// Transaction id, e.g. GR-LXZ3K1A0-7QF2
        id: String,
    },

    /// Write the history to a CSV or JSON file
    Export {
        #[arg(long, default_value_t)]
        format: ExportFormat,

        /// Output file, default gorent_transactions_<millis>.<ext>
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Revenue and rental statistics
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Vehicle id, see `gorent vehicles`
    #[arg(long)]
    pub vehicle: String,

    /// Rental length in days
    #[arg(long, allow_negative_numbers = true)]
    pub days: i64,

    /// Number of units
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub units: i64,

    /// Customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Save the transaction and reserve stock
    #[arg(long)]
    pub save: bool,

    /// Print a receipt instead of the summary
    #[arg(long, conflicts_with = "json")]
    pub receipt: bool,

    #[arg(long)]
    pub json: bool,
}

impl QuoteArgs {
    fn request(&self) -> RentalRequest {
        RentalRequest::new(
            self.vehicle.clone(),
            self.name.clone().unwrap_or_default(),
            self.days,
            self.units,
        )
    }

    fn options(&self) -> QuoteOptions {
        QuoteOptions {
            save: self.save,
            receipt: self.receipt,
            json: self.json,
        }
    }
}

impl Command {
    /// Whether the command reads or writes history or stock.
    pub fn needs_database(&self) -> bool {
        !matches!(
            self,
            Command::Discounts { .. } | Command::Quick { .. } | Command::Config
        )
    }
}

/// Parses arguments, runs one command and maps the outcome to an exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli, Utc::now())) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(code = ?err.code, "Command failed");
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

/// Loads configuration, opens the database when needed and dispatches.
pub async fn execute(cli: Cli, now: DateTime<Utc>) -> CliResult<String> {
    let config = ConfigState::load(cli.config)?;
    debug!(store = %config.store_name, vehicles = config.calculator.vehicles.len(), "Configuration loaded");

    if !cli.command.needs_database() {
        return dispatch(&config, None, cli.command, now).await;
    }

    let path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let db = DbState::open(path).await?;
    info!("Database ready");

    let result = dispatch(&config, Some(&db), cli.command, now).await;
    db.close().await;
    result
}

/// Runs `command` against already-loaded state.
///
/// `db` may be `None` only for commands where
/// [`Command::needs_database`] is false.
pub async fn dispatch(
    config: &ConfigState,
    db: Option<&DbState>,
    command: Command,
    now: DateTime<Utc>,
) -> CliResult<String> {
    match command {
        Command::Discounts { days } => Ok(commands::catalog::list_discounts(config, days)),
        Command::Quick {
            vehicle,
            days,
            json,
        } => commands::quote::quick(config, &vehicle, days, json),
        Command::Config => commands::config::show_config(config),

        Command::Vehicles { json } => {
            commands::catalog::list_vehicles(config, require(db)?, json).await
        }
        Command::Quote(args) => {
            commands::quote::quote(config, require(db)?, &args.request(), args.options(), now)
                .await
        }
        Command::Restock => commands::catalog::restock(config, require(db)?).await,
        Command::History { clear: true, .. } => {
            commands::history::clear_history(require(db)?).await
        }
        Command::History { limit, json, .. } => {
            commands::history::history(config, require(db)?, limit, json).await
        }
        Command::Receipt { id } => commands::quote::receipt(config, require(db)?, &id).await,
        Command::Export { format, output } => {
            commands::export::export_history(require(db)?, format, output, now).await
        }
        Command::Stats { json } => commands::history::stats(config, require(db)?, json).await,
    }
}

fn require(db: Option<&DbState>) -> CliResult<&DbState> {
    db.ok_or_else(|| CliError::internal("command requires a database"))
}

/// Installs the stderr log subscriber.
///
/// ## Log Levels
/// - default: `warn`
/// - `-v`: `info,sqlx=warn`
/// - `-vv`: `debug,sqlx=warn`
/// - `RUST_LOG=gorent_db=trace` etc. replaces all of the above
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info,sqlx=warn",
            _ => "debug,sqlx=warn",
        })
    });

    // try_init: a subscriber may already be installed when run from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
