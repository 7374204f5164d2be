//! Notification sink: a single-consumer queue drained by a worker task.
//!
//! Producers (the watch loop, the tracking flow) hold a cheap [`Notifier`]
//! handle and submit requests into an mpsc queue; the worker task owns the
//! transport, performs its handshake once, flips a readiness flag, and
//! delivers queued requests in order on its own task. This keeps every
//! transport call on the sink's execution context — producers never touch
//! the transport directly.
//!
//! The sink never retries. A failed delivery is reported back to the
//! producer through a oneshot reply; retry policy belongs to the caller.

mod discord;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{error, info};

use crate::{Result, StorewatchError};

pub use discord::DiscordSink;

/// Queue capacity for pending notifications.
const QUEUE_CAPACITY: usize = 64;

/// Transport behind the sink worker.
///
/// `handshake` runs once at worker startup; `post` delivers one message
/// and must map target-not-found, permission, and transport failures to
/// their distinct error variants.
#[async_trait]
pub trait ChannelSink: Send + Sync {
    /// Completes the transport login/handshake.
    async fn handshake(&self) -> Result<()>;

    /// Posts `text` to `channel_id`. No retries.
    async fn post(&self, channel_id: u64, text: &str) -> Result<()>;
}

/// Stand-in transport used when no bot token is configured.
///
/// Never becomes ready, so every send fails with
/// [`SinkNotReady`](StorewatchError::SinkNotReady) once the caller's
/// ready timeout expires.
pub struct DisabledSink;

#[async_trait]
impl ChannelSink for DisabledSink {
    async fn handshake(&self) -> Result<()> {
        Err(StorewatchError::SinkNotReady)
    }

    async fn post(&self, channel_id: u64, _text: &str) -> Result<()> {
        Err(StorewatchError::SinkTargetNotFound { channel_id })
    }
}

/// One queued alert awaiting delivery.
struct NotifyRequest {
    channel_id: u64,
    content: String,
    ready_timeout: Duration,
    reply: oneshot::Sender<Result<()>>,
}

/// Cloneable producer handle for submitting alerts to the sink worker.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<NotifyRequest>,
    ready: watch::Receiver<bool>,
}

impl Notifier {
    /// Whether the transport handshake has completed.
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Sends `content` to `channel_id` and waits for the delivery result.
    ///
    /// The worker holds the request until the transport is ready, bounded
    /// by `ready_timeout` — the sink's startup and the watch loop's first
    /// tick race at process start, so an early send queues instead of
    /// failing outright.
    ///
    /// # Errors
    ///
    /// [`SinkNotReady`](StorewatchError::SinkNotReady) when the handshake
    /// does not complete within `ready_timeout`, otherwise whatever the
    /// transport reported for this delivery.
    pub async fn send(
        &self,
        channel_id: u64,
        content: impl Into<String>,
        ready_timeout: Duration,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = NotifyRequest {
            channel_id,
            content: content.into(),
            ready_timeout,
            reply: reply_tx,
        };
        self.tx
            .send(request)
            .await
            .map_err(|_| StorewatchError::SinkSendFailed("sink worker has exited".to_string()))?;
        reply_rx
            .await
            .map_err(|_| StorewatchError::SinkSendFailed("sink worker dropped the request".to_string()))?
    }
}

/// Spawns the sink worker task and returns the producer handle.
///
/// The worker exits once every [`Notifier`] clone has been dropped and
/// the queue has drained.
pub fn spawn_sink<S: ChannelSink + 'static>(sink: S) -> Notifier {
    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
    let (ready_tx, ready_rx) = watch::channel(false);
    tokio::spawn(run_sink(sink, rx, ready_tx));
    Notifier {
        tx,
        ready: ready_rx,
    }
}

/// Worker loop: handshake once, then deliver queued requests in order.
async fn run_sink<S: ChannelSink>(
    sink: S,
    mut rx: mpsc::Receiver<NotifyRequest>,
    ready: watch::Sender<bool>,
) {
    match sink.handshake().await {
        Ok(()) => {
            let _ = ready.send(true);
            info!("notification sink ready");
        }
        Err(e) => {
            // Requests will wait out their ready timeout and fail with
            // SinkNotReady; the sink does not retry the handshake.
            error!(error = %e, "notification sink handshake failed");
        }
    }

    let ready_rx = ready.subscribe();
    while let Some(request) = rx.recv().await {
        let result = deliver(&sink, &ready_rx, &request).await;
        let _ = request.reply.send(result);
    }
}

/// Delivers one request, waiting for readiness first.
async fn deliver<S: ChannelSink>(
    sink: &S,
    ready: &watch::Receiver<bool>,
    request: &NotifyRequest,
) -> Result<()> {
    if !*ready.borrow() {
        let mut ready = ready.clone();
        let became_ready =
            tokio::time::timeout(request.ready_timeout, ready.wait_for(|is_ready| *is_ready))
                .await;
        match became_ready {
            Ok(Ok(_)) => {}
            _ => return Err(StorewatchError::SinkNotReady),
        }
    }
    sink.post(request.channel_id, &request.content).await
}
