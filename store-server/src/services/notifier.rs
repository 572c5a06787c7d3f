//! Notification Queue
//!
//! The checkout engine publishes events here after a successful commit;
//! a background worker drains the queue through a [`NotificationSink`]
//! (email/QR side effects live behind that trait, outside this crate).
//! Delivery is fire-and-forget: failures are logged, never retried, and
//! never surfaced to the HTTP caller.

use async_trait::async_trait;
use shared::models::ProofDecision;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Queue depth before publishers start dropping (logged) instead of
/// blocking the request path
const QUEUE_CAPACITY: usize = 256;

/// One order line as rendered into the confirmation summary
#[derive(Debug, Clone)]
pub struct LineSummary {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Outbound notification events
#[derive(Debug, Clone)]
pub enum Notification {
    /// Order committed: confirmation to the customer, summary to the
    /// operators, scannable code for the order number
    OrderPlaced {
        order_id: i64,
        order_number: String,
        customer_name: String,
        customer_email: String,
        customer_phone: Option<String>,
        shipping_address: String,
        lines: Vec<LineSummary>,
        subtotal: f64,
        shipping_cost: f64,
        grand_total: f64,
    },
    /// Admin decided on a payment proof
    ProofDecided {
        order_id: i64,
        order_number: String,
        customer_email: String,
        decision: ProofDecision,
        admin_notes: Option<String>,
    },
}

impl Notification {
    fn kind(&self) -> &'static str {
        match self {
            Self::OrderPlaced { .. } => "order_placed",
            Self::ProofDecided { .. } => "proof_decided",
        }
    }
}

/// Delivery backend for notifications (mailer + QR generator wrapper)
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Default sink: structured log lines only. The production mailer/QR
/// wrapper replaces this at state construction.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, notification: &Notification) -> anyhow::Result<()> {
        match notification {
            Notification::OrderPlaced {
                order_number,
                customer_email,
                grand_total,
                lines,
                ..
            } => {
                tracing::info!(
                    order_number,
                    customer_email,
                    grand_total,
                    line_count = lines.len(),
                    "Order confirmation dispatched"
                );
            }
            Notification::ProofDecided {
                order_number,
                customer_email,
                decision,
                ..
            } => {
                tracing::info!(
                    order_number,
                    customer_email,
                    ?decision,
                    "Payment proof decision dispatched"
                );
            }
        }
        Ok(())
    }
}

/// Cloneable publisher handle held by the server state
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Notification>,
}

impl Notifier {
    /// Enqueue a notification without blocking the request path.
    ///
    /// A full queue drops the event with a warning; notifications are
    /// best-effort by contract.
    pub fn publish(&self, notification: Notification) {
        let kind = notification.kind();
        if let Err(e) = self.tx.try_send(notification) {
            tracing::warn!(kind, error = %e, "Notification dropped");
        }
    }
}

/// Owns the worker task draining the queue
pub struct NotifierService {
    notifier: Notifier,
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

impl NotifierService {
    /// Spawn the worker draining into `sink`
    pub fn start(sink: Arc<dyn NotificationSink>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(run_worker(rx, sink, cancel.clone()));
        Self {
            notifier: Notifier { tx },
            cancel,
            worker,
        }
    }

    /// Publisher handle for the server state
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Stop the worker after draining whatever is already queued
    pub async fn shutdown(self) {
        self.cancel.cancel();
        drop(self.notifier);
        if let Err(e) = self.worker.await {
            tracing::warn!(error = %e, "Notification worker did not shut down cleanly");
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<Notification>,
    sink: Arc<dyn NotificationSink>,
    cancel: CancellationToken,
) {
    tracing::debug!("Notification worker started");
    loop {
        tokio::select! {
            maybe = rx.recv() => {
                match maybe {
                    Some(notification) => deliver_one(&*sink, &notification).await,
                    None => break,
                }
            }
            _ = cancel.cancelled() => {
                // Drain what is already queued, then stop
                while let Ok(notification) = rx.try_recv() {
                    deliver_one(&*sink, &notification).await;
                }
                break;
            }
        }
    }
    tracing::debug!("Notification worker stopped");
}

async fn deliver_one(sink: &dyn NotificationSink, notification: &Notification) {
    if let Err(e) = sink.deliver(notification).await {
        // Swallowed by contract: never retried, never surfaced
        tracing::warn!(kind = notification.kind(), error = %e, "Notification delivery failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Sink recording everything it receives
    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn deliver(&self, notification: &Notification) -> anyhow::Result<()> {
            self.seen.lock().push(notification.kind().to_string());
            Ok(())
        }
    }

    /// Sink that always fails
    struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn deliver(&self, _notification: &Notification) -> anyhow::Result<()> {
            anyhow::bail!("smtp unreachable")
        }
    }

    fn proof_event() -> Notification {
        Notification::ProofDecided {
            order_id: 1,
            order_number: "GSM-20250101-AB12C".into(),
            customer_email: "budi@example.com".into(),
            decision: ProofDecision::Verified,
            admin_notes: None,
        }
    }

    #[tokio::test]
    async fn test_events_reach_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let service = NotifierService::start(sink.clone());
        let notifier = service.notifier();

        notifier.publish(proof_event());
        notifier.publish(proof_event());
        service.shutdown().await;

        assert_eq!(sink.seen.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let service = NotifierService::start(Arc::new(FailingSink));
        let notifier = service.notifier();

        // Publishing never errors even when delivery always fails
        notifier.publish(proof_event());
        service.shutdown().await;
    }
}
