//! Ticket token minter.
//!
//! Terminal front end for the page controller: each prompt line is a click,
//! and the page is printed after every action or provider event.
//!
//! ```text
//! stdin line ──▶ cli::parse_line ──▶ PageController::dispatch ──┐
//!                                                               ├──▶ MemoryPage ──▶ stdout
//! provider event ──▶ PageController::next_event ──▶ refresh ────┘
//! ```

use std::path::PathBuf;

use alloy::primitives::Address;
use clap::Parser;
use tokio::io::BufReader;

use ticket_minter::cli;
use ticket_minter::config::load_or_default;
use ticket_minter::connector::LocalWalletConnector;
use ticket_minter::observability::logging;
use ticket_minter::ui::MemoryPage;
use ticket_minter::{PageController, Shutdown};

#[derive(Parser)]
#[command(name = "ticket-minter")]
#[command(about = "Connect a wallet and mint ticket tokens", long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the config (RUST_LOG overrides both)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    let level = args
        .log_level
        .unwrap_or_else(|| config.observability.log_level.clone());
    logging::init(&level);

    tracing::info!("ticket-minter v{} starting", env!("CARGO_PKG_VERSION"));

    let contract_address: Address = config
        .blockchain
        .contract_address
        .parse()
        .map_err(|e| format!("invalid contract address: {e}"))?;

    let connector = LocalWalletConnector::new(&config.wallet, &config.blockchain);
    let mut controller = PageController::new(
        Box::new(connector),
        MemoryPage::new(),
        config.ui.clone(),
        contract_address,
    );
    controller.init();

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    cli::run(
        &mut controller,
        BufReader::new(tokio::io::stdin()),
        shutdown.subscribe(),
    )
    .await;

    tracing::info!("Shutdown complete");
    Ok(())
}
