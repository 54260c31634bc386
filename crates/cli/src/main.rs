mod channel_commands;
mod config_commands;
mod db_commands;
mod video_commands;

use std::{path::PathBuf, sync::Arc};

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    steeple_config::SteepleConfig,
    steeple_store::{SqliteVideoStore, VideoStore},
    steeple_sync::{ChannelRegistry, SyncScheduler, SyncService},
    steeple_youtube::YoutubeClient,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "steeple", about = "Steeple — church media video sync service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info", env = "STEEPLE_LOG")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file path (skips standard-location discovery).
    #[arg(long, global = true, env = "STEEPLE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sync scheduler until interrupted (default when no subcommand
    /// is provided).
    Serve,
    /// Run exactly one sync pass and print the per-channel breakdown.
    Sync,
    /// Cached video management.
    Videos {
        #[command(subcommand)]
        action: video_commands::VideoAction,
    },
    /// Channel registry inspection.
    Channels {
        #[command(subcommand)]
        action: channel_commands::ChannelAction,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
    /// Database management (migrate, reset).
    Db {
        #[command(subcommand)]
        action: db_commands::DbAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Load config from the explicit path or standard locations, then apply env
/// overrides.
fn load_config(cli: &Cli) -> anyhow::Result<SteepleConfig> {
    let mut config = match &cli.config {
        Some(path) => steeple_config::load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => steeple_config::discover_and_load(),
    };
    steeple_config::apply_env_overrides(&mut config);
    Ok(config)
}

/// Validate config and abort on fatal diagnostics (missing API key, broken
/// channel entries). Warnings and infos are printed but not fatal.
fn require_valid(config: &SteepleConfig) -> anyhow::Result<()> {
    let result = steeple_config::validate_config(config);
    for d in &result.diagnostics {
        eprintln!("{}: {} ({})", d.severity, d.message, d.path);
    }
    if result.has_errors() {
        anyhow::bail!("configuration is invalid; fix the errors above and retry");
    }
    Ok(())
}

/// Open (and migrate) the SQLite store at the configured path.
async fn open_store(config: &SteepleConfig) -> anyhow::Result<SqliteVideoStore> {
    let path = steeple_config::database_path(config);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let url = format!("sqlite:{}?mode=rwc", path.display());
    SqliteVideoStore::new(&url)
        .await
        .with_context(|| format!("failed to open database at {}", path.display()))
}

fn build_service(
    config: &SteepleConfig,
    store: Arc<dyn VideoStore>,
) -> anyhow::Result<SyncService> {
    let client = YoutubeClient::new(config.youtube.api_key.clone())?;
    let registry = ChannelRegistry::new(config.effective_channels());
    Ok(SyncService::new(
        client,
        store,
        registry,
        config.youtube.effective_max_results(),
    ))
}

async fn serve(config: SteepleConfig) -> anyhow::Result<()> {
    require_valid(&config)?;

    let store: Arc<dyn VideoStore> = Arc::new(open_store(&config).await?);
    let service = Arc::new(build_service(&config, store)?);
    let scheduler = SyncScheduler::new(
        service,
        config.sync.interval_duration(),
        config.sync.run_on_start,
    );

    scheduler.start().await;
    info!("steeple serving; press ctrl-c to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    scheduler.stop().await;
    Ok(())
}

async fn sync_once(config: SteepleConfig) -> anyhow::Result<()> {
    require_valid(&config)?;

    let store: Arc<dyn VideoStore> = Arc::new(open_store(&config).await?);
    let service = build_service(&config, store)?;
    let summary = service.run_pass().await;

    println!("{:<34} {:<14} {:>6} {:>6}", "CHANNEL", "STATUS", "MERGED", "FAILED");
    for report in &summary.reports {
        println!(
            "{:<34} {:<14} {:>6} {:>6}",
            report.name,
            report.status.to_string(),
            report.merged,
            report.failed
        );
    }
    println!("\nTotal merged: {}", summary.merged_total());
    Ok(())
}

/// Ask the operator to confirm a destructive action. `--yes` flags skip this.
pub(crate) fn confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer_is_yes(&answer)
}

pub(crate) fn answer_is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Sync => sync_once(config).await,
        Commands::Videos { action } => video_commands::handle(action, &config).await,
        Commands::Channels { action } => channel_commands::handle(action, &config).await,
        Commands::Config { action } => config_commands::handle(action, &config),
        Commands::Db { action } => db_commands::handle(action, &config).await,
    }
}
