//! banwatch Discord bot
//!
//! Answers `!check <player id>` with the ban status of a Free Fire account,
//! looked up region by region, and serves a liveness endpoint for the
//! hosting platform.

mod commands;
mod config;
mod errors;
mod handlers;
mod health;
mod language_store;
mod messages;
mod service;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use banwatch_lookup::RegionResolver;
use clap::Parser;
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::ApplicationId;
use serenity::model::user::OnlineStatus;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{BotStatus, Config};
use crate::handlers::{CommandServiceKey, Handler};
use crate::health::HealthState;
use crate::language_store::InMemoryLanguageStore;
use crate::service::CommandService;

/// banwatch bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/banwatch.toml")]
    config: String,

    /// Discord bot token (overrides config file)
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Health check server port (overrides config file)
    #[arg(long, env = "HEALTH_CHECK_PORT")]
    health_port: Option<u16>,
}

fn online_status(status: BotStatus) -> OnlineStatus {
    match status {
        BotStatus::Online => OnlineStatus::Online,
        BotStatus::Idle => OnlineStatus::Idle,
        BotStatus::Dnd => OnlineStatus::DoNotDisturb,
        BotStatus::Offline => OnlineStatus::Invisible,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banwatch_bot=debug,banwatch_lookup=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting banwatch bot");

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, loading from environment");
        Config::from_env()?
    };
    if let Some(token) = args.token {
        config.discord.bot_token = token;
    }
    if let Some(port) = args.health_port {
        config.health.port = port;
    }

    config.validate().context("Invalid configuration")?;

    info!(
        regions = config.lookup.regions.len(),
        base_url = %config.lookup.base_url,
        prefix = %config.discord.command_prefix,
        "Lookup configured"
    );

    let resolver = RegionResolver::new(config.lookup.clone())
        .context("Failed to build lookup HTTP client")?;
    let service = Arc::new(CommandService::new(
        resolver,
        InMemoryLanguageStore::new(),
        config.discord.command_prefix.clone(),
    ));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut builder = Client::builder(&config.discord.bot_token, intents)
        .event_handler(Handler)
        .status(online_status(config.discord.status));
    if let Some(app_id) = config.discord.application_id {
        builder = builder.application_id(ApplicationId::new(app_id.get()));
    }

    let mut client = builder
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Discord client: {}", e))?;

    let health_state = HealthState::new();

    {
        let mut data = client.data.write().await;
        data.insert::<CommandServiceKey>(service);
        data.insert::<HealthState>(health_state.clone());
    }

    let health_port = config.health.port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_state, health_port).await {
            error!("Health server error: {}", e);
        }
    });

    // Graceful shutdown: close all shards on SIGTERM or Ctrl+C.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("Shutdown signal received, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord gateway connection...");

    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Discord client error: {}", e))?;

    info!("banwatch bot stopped");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    tokio::signal::ctrl_c().await.ok();
}
