//! lhdice - Log Horizon TRPG dice roller

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lhdice::system::HELP_MESSAGE;
use lhdice::tables::{ConsumptionKind, TreasureKind};
use lhdice::{load_system, Config, DiceSource, LogHorizon, Server};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log Horizon TRPG dice roller
#[derive(Parser, Debug)]
#[command(
    name = "lhdice",
    version,
    about = "Log Horizon TRPG check rolls and random tables",
    disable_help_subcommand = true
)]
struct Args {
    /// TOML config file (default: lhdice.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate commands given on the command line
    Roll {
        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Commands, e.g. 3LH>=8 PCT2 CTRS1$
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Read commands from stdin, one per line
    Repl {
        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the HTTP API
    Serve {
        /// Address to listen on, overrides bind_addr
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Validate the locale tables and exit
    Check,
    /// Print the command reference
    Help,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;

    // Initialize tracing; stdout is reserved for roll output
    let (json_layer, text_layer) = if config.log_json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(json_layer)
        .with(text_layer)
        .init();

    match args.command {
        Command::Roll { seed, texts } => {
            let system = load_system(&config)?;
            let dice = DiceSource::new(seed.or(config.seed));
            let mut unsupported = false;
            for text in &texts {
                unsupported |= !print_roll(&system, &dice, text);
            }
            Ok(if unsupported {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Repl { seed } => {
            let system = load_system(&config)?;
            let dice = DiceSource::new(seed.or(config.seed));
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                print_roll(&system, &dice, &line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            let server = Arc::new(Server::new(config)?);

            let signal_server = server.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, shutting down");
                    signal_server.shutdown();
                }
            });

            server.run().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let system = load_system(&config)?;
            let catalog = system.catalog();
            for kind in ConsumptionKind::ALL {
                let table = catalog.consumption(kind);
                println!("{:<5} {} ({} bands)", kind.key(), table.name(), table.band_count());
            }
            for kind in TreasureKind::ALL {
                let table = catalog.treasure(kind);
                println!("{:<5} {} (7..={})", kind.key(), table.name(), table.last_index());
            }
            for table in catalog.d66_tables() {
                println!("{:<5} {} (d66)", table.key(), table.name());
            }
            println!("ok: max {} dice", system.max_dice());
            Ok(ExitCode::SUCCESS)
        }
        Command::Help => {
            print!("{}", HELP_MESSAGE);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print one evaluated command; false when it was not recognized
fn print_roll(system: &LogHorizon, dice: &DiceSource, text: &str) -> bool {
    match dice.with_randomizer(|randomizer| system.eval(text, randomizer)) {
        Some(result) if result.secret => {
            println!("(secret) {}", result.text);
            true
        }
        Some(result) => {
            println!("{}", result.text);
            true
        }
        None => {
            warn!(command = text, "unsupported command");
            println!("{}: unsupported command", text);
            false
        }
    }
}
