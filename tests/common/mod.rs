//! Shared test doubles for the price source and notification transport.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use storewatch::models::search::SearchHit;
use storewatch::notify::ChannelSink;
use storewatch::source::PriceSource;
use storewatch::{Result, StorewatchError};

/// Scripted quote outcome for one appid.
#[derive(Clone)]
pub enum Quote {
    Price(Decimal),
    Absent,
    Unavailable,
}

/// Price source with per-appid scripted outcomes.
///
/// Clones share state, so a test can hand one clone to the watcher and
/// re-script quotes between ticks through another.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    quotes: Arc<Mutex<HashMap<u64, Quote>>>,
    hits: Arc<Mutex<Vec<SearchHit>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quote(&self, appid: u64, quote: Quote) {
        self.quotes.lock().unwrap().insert(appid, quote);
    }

    pub fn set_hits(&self, hits: Vec<SearchHit>) {
        *self.hits.lock().unwrap() = hits;
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn search(
        &self,
        query: &str,
        _region: &str,
        _language: &str,
    ) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(StorewatchError::InvalidInput(
                "search query is empty".to_string(),
            ));
        }
        Ok(self.hits.lock().unwrap().clone())
    }

    async fn quote(&self, appid: u64, _region: &str) -> Result<Option<Decimal>> {
        match self.quotes.lock().unwrap().get(&appid) {
            Some(Quote::Price(price)) => Ok(Some(*price)),
            Some(Quote::Absent) | None => Ok(None),
            Some(Quote::Unavailable) => Err(StorewatchError::SourceUnavailable(
                "scripted outage".to_string(),
            )),
        }
    }
}

/// Transport that is ready immediately and records every delivered post.
///
/// Clones share state; `fail_sends(true)` makes subsequent posts fail
/// with a transport error.
#[derive(Clone, Default)]
pub struct RecordingSink {
    posts: Arc<Mutex<Vec<(u64, String)>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().unwrap() = fail;
    }

    pub fn posts(&self) -> Vec<(u64, String)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSink for RecordingSink {
    async fn handshake(&self) -> Result<()> {
        Ok(())
    }

    async fn post(&self, channel_id: u64, text: &str) -> Result<()> {
        if *self.fail_sends.lock().unwrap() {
            return Err(StorewatchError::SinkSendFailed(
                "scripted send failure".to_string(),
            ));
        }
        self.posts
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(())
    }
}
