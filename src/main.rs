mod cli;
mod config;
mod inventory;
mod models;
mod reconcile;
mod report;
mod services;
mod topology;
mod utils;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Config;
use services::{Auditor, ReportKind};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vlan_audit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let cfg = Config::load().with_cli(&cli);
    tracing::info!("Configs: {}", cfg.configs_dir.display());
    tracing::info!("Output: {}", cfg.output_dir.display());

    let kinds: Vec<ReportKind> = match cli.command.unwrap_or(Commands::All) {
        Commands::Matrix => vec![ReportKind::Matrix],
        Commands::Zones => vec![ReportKind::Zones],
        Commands::DcDiff => vec![ReportKind::DcDiff],
        Commands::Inventory => vec![ReportKind::Inventory],
        Commands::Regions => vec![ReportKind::Regions],
        Commands::All => ReportKind::ALL.to_vec(),
    };

    let auditor = Auditor::new(cfg)?;
    let summary = auditor.run(&kinds)?;

    tracing::info!(
        "Done: {} files written ({} dumps read, {} skipped)",
        summary.outputs.len(),
        summary.stats.files_read,
        summary.stats.files_skipped
    );
    Ok(())
}
