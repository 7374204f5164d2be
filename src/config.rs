//! Application configuration loaded from environment variables.
//!
//! Notification credentials come in a pair:
//! - `DISCORD_BOT_TOKEN` — bot token used for the send handshake
//! - `DISCORD_CHANNEL_ID` — numeric channel that receives alerts
//!
//! Both are optional, but when one is set the other must be present.
//! Without them the sink is disabled while search, tracking, and the
//! watch loop keep working.
//!
//! Optional overrides: `STEAM_API_URL`, `STEAM_REGION`, `STEAM_LANGUAGE`,
//! `DISCORD_API_URL`, `WATCH_INTERVAL_SECS`, `TRACKED_ITEMS_PATH`.

use std::path::PathBuf;
use std::time::Duration;

/// Default public storefront API endpoint.
const DEFAULT_STEAM_API_URL: &str = "https://store.steampowered.com/api";

/// Default Discord REST API endpoint.
const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";

/// Default country code for price queries.
const DEFAULT_REGION: &str = "us";

/// Default language for search results.
const DEFAULT_LANGUAGE: &str = "english";

/// Default seconds between watch-loop ticks (one hour).
const DEFAULT_WATCH_INTERVAL_SECS: u64 = 3600;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub steam: SteamConfig,
    pub discord: DiscordConfig,
    /// Time between watch-loop ticks.
    pub watch_interval: Duration,
    /// When set, the tracked-item store is mirrored to this JSON file.
    pub tracked_items_path: Option<PathBuf>,
}

/// Storefront-specific configuration values.
#[derive(Debug)]
pub struct SteamConfig {
    pub api_url: String,
    pub region: String,
    pub language: String,
}

/// Notification-channel configuration values.
#[derive(Debug)]
pub struct DiscordConfig {
    pub api_url: String,
    pub bot_token: Option<String>,
    pub channel_id: Option<u64>,
}

/// Loads the application configuration from environment variables.
///
/// Endpoint URLs, region, language, and the watch interval all have
/// defaults. The bot token and channel id are optional as a pair.
///
/// # Errors
///
/// Returns [`StorewatchError::Config`](crate::StorewatchError::Config) if
/// only one of the two notification variables is set, the channel id is
/// not numeric, or the watch interval is zero or not numeric.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let steam_api_url = non_empty_var("STEAM_API_URL")
        .unwrap_or_else(|| DEFAULT_STEAM_API_URL.to_string());
    let region = non_empty_var("STEAM_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
    let language =
        non_empty_var("STEAM_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let discord_api_url = non_empty_var("DISCORD_API_URL")
        .unwrap_or_else(|| DEFAULT_DISCORD_API_URL.to_string());
    let bot_token = non_empty_var("DISCORD_BOT_TOKEN");
    let channel_id = non_empty_var("DISCORD_CHANNEL_ID");

    match (&bot_token, &channel_id) {
        (Some(_), None) => {
            return Err(crate::StorewatchError::Config(
                "DISCORD_BOT_TOKEN is set but DISCORD_CHANNEL_ID is missing".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(crate::StorewatchError::Config(
                "DISCORD_CHANNEL_ID is set but DISCORD_BOT_TOKEN is missing".to_string(),
            ));
        }
        _ => {}
    }

    let channel_id = channel_id
        .map(|raw| {
            raw.parse::<u64>().map_err(|_| {
                crate::StorewatchError::Config(format!(
                    "DISCORD_CHANNEL_ID is not a number: {raw}"
                ))
            })
        })
        .transpose()?;

    let watch_interval_secs = match non_empty_var("WATCH_INTERVAL_SECS") {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            crate::StorewatchError::Config(format!("WATCH_INTERVAL_SECS is not a number: {raw}"))
        })?,
        None => DEFAULT_WATCH_INTERVAL_SECS,
    };
    if watch_interval_secs == 0 {
        return Err(crate::StorewatchError::Config(
            "WATCH_INTERVAL_SECS must be positive".to_string(),
        ));
    }

    let tracked_items_path = non_empty_var("TRACKED_ITEMS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        steam: SteamConfig {
            api_url: steam_api_url,
            region,
            language,
        },
        discord: DiscordConfig {
            api_url: discord_api_url,
            bot_token,
            channel_id,
        },
        watch_interval: Duration::from_secs(watch_interval_secs),
        tracked_items_path,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
