//! Configuration management for banwatch-bot

#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{bail, Context, Result};
use banwatch_lookup::LookupConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU64;

/// Value shipped in the sample `.env`; treated as "not configured".
const PLACEHOLDER_TOKEN: &str = "your_bot_token_here";
const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_HEALTH_PORT: u16 = 10000;

/// Source of environment variables.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordBotConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Discord bot specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordBotConfig {
    /// Bot token from the Discord developer portal
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
    /// Zero is rejected when parsing; Discord never issues it.
    #[serde(default)]
    pub application_id: Option<NonZeroU64>,
    #[serde(default)]
    pub status: BotStatus,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

/// Presence shown once the bot connects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    #[default]
    Online,
    Idle,
    Dnd,
    Offline,
}

impl BotStatus {
    /// Unknown values fall back to `Online`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "idle" => BotStatus::Idle,
            "dnd" => BotStatus::Dnd,
            "offline" => BotStatus::Offline,
            _ => BotStatus::Online,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_health_port")]
    pub port: u16,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HEALTH_PORT,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&SystemEnv)
    }

    pub fn from_env_with<E: ReadEnv>(env: &E) -> Result<Self> {
        let bot_token = env.var("TOKEN").context("TOKEN not set")?;

        let application_id = match env.var("APPLICATION_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<NonZeroU64>()
                    .with_context(|| format!("APPLICATION_ID is not a non-zero number: {}", raw))?,
            ),
            None => None,
        };

        let status = env
            .var("BOT_STATUS")
            .map(|s| BotStatus::parse_lossy(&s))
            .unwrap_or_default();

        let command_prefix = env
            .var("COMMAND_PREFIX")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(default_command_prefix);

        let mut lookup = LookupConfig::default();
        if let Some(base_url) = env.var("LOOKUP_BASE_URL") {
            lookup.base_url = base_url;
        }
        if let Some(regions) = env.var("LOOKUP_REGIONS") {
            lookup.regions = LookupConfig::parse_regions(&regions);
        }
        if let Some(raw) = env.var("LOOKUP_TIMEOUT_SECS") {
            lookup.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("LOOKUP_TIMEOUT_SECS is not a number: {}", raw))?;
        }

        let port = match env.var("HEALTH_CHECK_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("HEALTH_CHECK_PORT is not a port: {}", raw))?,
            None => DEFAULT_HEALTH_PORT,
        };

        Ok(Config {
            discord: DiscordBotConfig {
                bot_token,
                application_id,
                status,
                command_prefix,
            },
            lookup,
            health: HealthConfig { port },
        })
    }

    /// Refuse to start with settings that cannot work.
    pub fn validate(&self) -> Result<()> {
        validate_token(&self.discord.bot_token)?;
        if self.discord.command_prefix.trim().is_empty() {
            bail!("command prefix must not be empty");
        }
        if self.lookup.regions.is_empty() {
            bail!("at least one lookup region is required");
        }
        if self.lookup.timeout_secs == 0 {
            bail!("lookup timeout must be at least one second");
        }
        Ok(())
    }
}

/// Discord tokens are three non-empty dot-separated segments.
fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() || token == PLACEHOLDER_TOKEN {
        bail!("Please set a valid TOKEN (bot token is missing)");
    }
    if token.chars().any(char::is_whitespace) {
        bail!("bot token must not contain whitespace");
    }
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        bail!("bot token does not look like a Discord token");
    }
    Ok(())
}

fn default_bot_token() -> String {
    std::env::var("TOKEN").unwrap_or_default()
}

fn default_command_prefix() -> String {
    DEFAULT_COMMAND_PREFIX.to_string()
}

fn default_health_port() -> u16 {
    DEFAULT_HEALTH_PORT
}
