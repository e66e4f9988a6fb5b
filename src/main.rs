//! # Rostercall — Roster Announcement Bot
//!
//! Scans the scheduling provider for upcoming events, reconciles confirmed
//! assignments against declared staffing needs, and posts the consolidated
//! roster to group chat once per event date at the configured lead time.
//!
//! Usage:
//!   rostercall                       # Run on the configured cron cadence
//!   rostercall --once                # Run a single tick and exit
//!   rostercall --once --dry-run      # Render without posting

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rostercall_channels::GroupChatChannel;
use rostercall_core::config::RosterConfig;
use rostercall_provider::ProviderClient;
use rostercall_scheduler::{Engine, TickOutcome};

#[derive(Parser)]
#[command(
    name = "rostercall",
    version,
    about = "📣 Rostercall — roster announcement bot"
)]
struct Cli {
    /// Run a single tick and exit
    #[arg(long)]
    once: bool,

    /// Config file path (default: ~/.rostercall/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Log the rendered message instead of posting it
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Default log directives. Filter directives match exact crate targets, so
/// every emitting crate must be named for its events to show up.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "rostercall=debug,rostercall_scheduler=debug,rostercall_provider=debug,rostercall_channels=debug"
    } else {
        "rostercall=info,rostercall_scheduler=info,rostercall_provider=info,rostercall_channels=info"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(cli.verbose))),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path).to_string();
            RosterConfig::load_from(Path::new(&expanded))?
        }
        None => RosterConfig::load()?,
    };

    let dry_run = cli.dry_run || config.flags.dry_run;
    if dry_run {
        tracing::info!("🔇 Dry run: messages go to the log, not the chat");
    }

    let source = Arc::new(ProviderClient::new(&config.provider));
    let sink = Arc::new(GroupChatChannel::new(config.chat.clone(), dry_run));
    let mut engine = Engine::new(source, sink, config);

    if cli.once {
        match engine.run_once().await? {
            TickOutcome::Posted { day } => tracing::info!("📣 Posted roster for {day}"),
            TickOutcome::Idle => tracing::info!("😴 Nothing due"),
        }
        Ok(())
    } else {
        engine.run_forever().await?;
        Ok(())
    }
}
