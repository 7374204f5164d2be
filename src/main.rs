use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use storewatch::StorewatchError;
use storewatch::config::{AppConfig, fetch_config};
use storewatch::notify::{DisabledSink, DiscordSink, Notifier, spawn_sink};
use storewatch::source::{PriceSource, SteamClient};
use storewatch::store::TrackedItemStore;
use storewatch::track::track_item;
use storewatch::watch::PriceWatcher;

#[tokio::main]
async fn main() -> Result<(), StorewatchError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let config = fetch_config()?;
    let http = reqwest::Client::new();
    let source = SteamClient::new(http.clone(), config.steam.api_url.clone());

    let default_channel = config.discord.channel_id.unwrap_or_default();
    let store = match &config.tracked_items_path {
        Some(path) => Arc::new(TrackedItemStore::load(path.clone(), default_channel)),
        None => Arc::new(TrackedItemStore::new()),
    };

    // A missing token disables alerts but not the rest of the system:
    // search, tracking, and the watch loop still run.
    let notifier = match &config.discord.bot_token {
        Some(token) => spawn_sink(DiscordSink::new(
            http,
            config.discord.api_url.clone(),
            token.clone(),
        )),
        None => {
            warn!("DISCORD_BOT_TOKEN not set; notifications are disabled");
            spawn_sink(DisabledSink)
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        Some((command, rest)) if command == "search" => {
            run_search(&source, &config, &rest.join(" ")).await
        }
        Some((command, rest)) if command == "track" => {
            run_track(&source, &store, &notifier, &config, &rest.join(" ")).await
        }
        Some((command, _)) => Err(StorewatchError::InvalidInput(format!(
            "unknown command: {command} (expected `search`, `track`, or no arguments)"
        ))),
        None => {
            run_watcher(source, store, notifier, &config).await;
            Ok(())
        }
    }
}

/// One-shot search: prints each match with its current price.
async fn run_search(
    source: &SteamClient,
    config: &AppConfig,
    query: &str,
) -> Result<(), StorewatchError> {
    let hits = source
        .search(query, &config.steam.region, &config.steam.language)
        .await?;
    if hits.is_empty() {
        println!("no matches for '{query}'");
        return Ok(());
    }

    for hit in &hits {
        match source.quote(hit.id, &config.steam.region).await {
            Ok(Some(price)) => println!("{} (id {}) ${price:.2}", hit.name, hit.id),
            Ok(None) => println!("{} (id {}) N/A", hit.name, hit.id),
            Err(e) => println!("{} (id {}) price lookup failed: {e}", hit.name, hit.id),
        }
    }
    Ok(())
}

/// One-shot track: searches, takes the best match, and starts tracking it.
async fn run_track(
    source: &SteamClient,
    store: &TrackedItemStore,
    notifier: &Notifier,
    config: &AppConfig,
    query: &str,
) -> Result<(), StorewatchError> {
    let hits = source
        .search(query, &config.steam.region, &config.steam.language)
        .await?;
    let Some(hit) = hits.first() else {
        return Err(StorewatchError::InvalidInput(format!(
            "no matches for '{query}'"
        )));
    };

    let channel_id = config.discord.channel_id.unwrap_or_default();
    let item = track_item(
        source,
        store,
        notifier,
        hit,
        &config.steam.region,
        channel_id,
    )
    .await?;
    println!(
        "tracking {} (id {}) at ${:.2}",
        item.name, item.appid, item.baseline_price
    );
    Ok(())
}

/// Runs the watch loop until Ctrl-C, then awaits its clean exit.
async fn run_watcher(
    source: SteamClient,
    store: Arc<TrackedItemStore>,
    notifier: Notifier,
    config: &AppConfig,
) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let watcher = PriceWatcher::new(
        source,
        store,
        notifier,
        config.watch_interval,
        config.steam.region.clone(),
        shutdown_rx,
    );
    let handle = tokio::spawn(watcher.run());

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => error!(error = %e, "failed to listen for ctrl-c, shutting down"),
    }

    // Flip the cancellation flag and wait for the watcher to reach a safe
    // point before the process exits.
    let _ = shutdown_tx.send(true);
    if let Err(e) = handle.await {
        error!(error = %e, "watcher task panicked");
    }
}
