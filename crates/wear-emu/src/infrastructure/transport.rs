//! Transport: the simulated send/acknowledge channel between the host
//! application and the device.
//!
//! Every `send` is stamped with a fresh transaction id and queued on a
//! single delivery worker. After the configured response delay the worker
//! fires the caller's ack exactly once and emits a one-shot
//! [`TransportEvent::Sent`] on the event channel so the device runtime (and
//! any logging observer) sees the outbound message. Because one worker
//! drains a single queue, two back-to-back sends always ack and deliver in
//! issue order.
//!
//! The negative-acknowledge callback is accepted and stored for the
//! lifetime of the delivery, but no internal condition ever invokes it –
//! the simulated channel cannot fail. Callers must not rely on failure
//! delivery; the asymmetry is part of the contract.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{debug, warn};

use wear_core::{Transaction, TransactionId, Value};

/// Timing configuration for the simulated channel.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Delay between a `send` call and its ack / outbound delivery.
    pub response_delay: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(50),
        }
    }
}

/// Delivered to the `on_ack` callback once the device has "received" the
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckEvent {
    pub transaction_id: TransactionId,
    /// Wall-clock send time, milliseconds since the Unix epoch.
    pub sent_at_ms: u64,
}

/// Would be delivered to `on_nack` – never constructed by this subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NackEvent {
    pub transaction_id: TransactionId,
    pub reason: String,
}

/// Completion callback for a successful send.
pub type AckCallback = Box<dyn FnOnce(AckEvent) + Send + 'static>;
/// Failure callback. Wired through the API but never invoked.
pub type NackCallback = Box<dyn FnOnce(NackEvent) + Send + 'static>;

/// Events emitted on the transport's event channel.
#[derive(Debug)]
pub enum TransportEvent {
    /// An outbound message has left the channel (ack already fired).
    Sent {
        payload: Vec<Value>,
        transaction_id: TransactionId,
    },
}

/// One queued send awaiting its delivery deadline.
struct PendingSend {
    payload: Vec<Value>,
    transaction: Transaction,
    deadline: Instant,
    on_ack: AckCallback,
    // Held so the callback's resources live as long as the delivery, even
    // though nothing fires it.
    _on_nack: Option<NackCallback>,
}

/// The simulated host↔device channel.
pub struct Transport {
    config: TransportConfig,
    queue_tx: mpsc::UnboundedSender<PendingSend>,
}

impl Transport {
    /// Creates the transport and returns it together with the receiving end
    /// of its event channel. Spawns the delivery worker; must be called
    /// within a tokio runtime.
    pub fn new(config: TransportConfig) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        tokio::spawn(delivery_worker(queue_rx, event_tx));

        let transport = Self { config, queue_tx };
        (transport, event_rx)
    }

    /// Queues a payload for delivery and returns its transaction id.
    ///
    /// `on_ack` runs exactly once, no earlier than the configured response
    /// delay after this call. `on_nack` is never invoked.
    pub fn send(
        &self,
        payload: Vec<Value>,
        on_ack: AckCallback,
        on_nack: Option<NackCallback>,
    ) -> TransactionId {
        let transaction = Transaction::open(now_ms());
        let id = transaction.id;
        debug!(transaction = %id, len = payload.len(), "queueing outbound message");

        let entry = PendingSend {
            payload,
            transaction,
            deadline: Instant::now() + self.config.response_delay,
            on_ack,
            _on_nack: on_nack,
        };
        if self.queue_tx.send(entry).is_err() {
            // Only possible after runtime shutdown has killed the worker.
            warn!(transaction = %id, "transport worker gone; message dropped");
        }
        id
    }

    /// The configured response delay.
    pub fn response_delay(&self) -> Duration {
        self.config.response_delay
    }
}

/// Drains the send queue in FIFO order, honoring each entry's deadline.
async fn delivery_worker(
    mut queue: mpsc::UnboundedReceiver<PendingSend>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    while let Some(entry) = queue.recv().await {
        tokio::time::sleep_until(entry.deadline).await;

        (entry.on_ack)(AckEvent {
            transaction_id: entry.transaction.id,
            sent_at_ms: entry.transaction.created_at_ms,
        });

        // One-shot fan-out to the event stream; no retry.
        if events
            .send(TransportEvent::Sent {
                payload: entry.payload,
                transaction_id: entry.transaction.id,
            })
            .is_err()
        {
            // Receiver dropped: nobody is observing the channel anymore.
            return;
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
