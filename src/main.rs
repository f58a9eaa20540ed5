use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use panel_feeder::cli::{parse_event, Cli, Commands};
use panel_feeder::config::Config;
use panel_feeder::services::{CleanupReport, FeedProcessor, RetentionPruner};
use panel_feeder::sources::{FeedSource, JsonFileSource, PlaceholderSource};
use panel_feeder::storage::{
    PanelFeedRepository, PostgresPanelFeedRepository, PostgresStorage, SqlitePanelFeedRepository,
    SqliteStorage,
};

fn main() {
    // Logs go to stderr so stdout carries only the invocation result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize storage
    let repository = build_repository(&config)?;

    match cli.command {
        Commands::Run { event } => cmd_run(repository, &config, event.as_deref()),
        Commands::Prune => cmd_prune(repository),
    }
}

fn build_repository(config: &Config) -> anyhow::Result<Box<dyn PanelFeedRepository>> {
    match &config.sqlite_path {
        Some(path) => {
            let storage = SqliteStorage::new(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(SqlitePanelFeedRepository::new(storage)))
        }
        None => {
            let storage = PostgresStorage::new(config.database.clone());
            Ok(Box::new(PostgresPanelFeedRepository::new(storage)))
        }
    }
}

fn build_source(config: &Config) -> Box<dyn FeedSource> {
    match &config.feed_items_file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(PlaceholderSource::new(config.panel.source_feed.clone())),
    }
}

fn cmd_run(
    repository: Box<dyn PanelFeedRepository>,
    config: &Config,
    event: Option<&str>,
) -> anyhow::Result<i32> {
    let event = parse_event(event);
    let processor = FeedProcessor::new(build_source(config), repository, config.panel.clone());
    let response = processor.handle(&event);

    println!("{}", serde_json::to_string(&response)?);

    Ok(if response.is_success() { 0 } else { 1 })
}

fn cmd_prune(repository: Box<dyn PanelFeedRepository>) -> anyhow::Result<i32> {
    match RetentionPruner::new(&repository).prune() {
        CleanupReport::Pruned(deleted) => {
            println!("Removed {} expired records.", deleted);
            Ok(0)
        }
        CleanupReport::Failed(error) => {
            println!("Cleanup failed: {}", error);
            Ok(1)
        }
    }
}
