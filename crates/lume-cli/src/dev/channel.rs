//! Live update channel: the set of connected browsers.
//!
//! Connections register a bounded queue; [`LiveChannel::broadcast`] pushes
//! the encoded message into every queue without waiting. A queue that is
//! closed or full belongs to a client that is gone or not reading, and the
//! client is dropped from the set.

use lume_runtime::ChannelMessage;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, error::TrySendError};

/// Per-client queue depth.
pub const CLIENT_QUEUE: usize = 32;

pub type ClientId = u64;

/// Outcome of one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub dropped: Vec<ClientId>,
}

pub struct LiveChannel {
    clients: RwLock<HashMap<ClientId, mpsc::Sender<String>>>,
    next_id: AtomicU64,
    queue: usize,
}

impl LiveChannel {
    pub fn new() -> Self {
        Self::with_queue(CLIENT_QUEUE)
    }

    pub fn with_queue(queue: usize) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            queue: queue.max(1),
        }
    }

    /// Register a connection; frames for it arrive on the returned receiver.
    pub fn register(&self) -> (ClientId, mpsc::Receiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.queue);
        self.clients.write().insert(id, tx);
        (id, rx)
    }

    pub fn unregister(&self, id: ClientId) {
        self.clients.write().remove(&id);
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }

    /// Send `message` to every client registered right now.
    pub fn broadcast(&self, message: &ChannelMessage) -> BroadcastReport {
        let frame = match message.to_json() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!(error = %err, "cannot encode channel message");
                return BroadcastReport::default();
            }
        };
        let clients: Vec<(ClientId, mpsc::Sender<String>)> = self
            .clients
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut report = BroadcastReport::default();
        for (id, tx) in clients {
            match tx.try_send(frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(client = id, "client not keeping up, dropping");
                    report.dropped.push(id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(client = id, "client gone, dropping");
                    report.dropped.push(id);
                }
            }
        }

        if !report.dropped.is_empty() {
            let mut clients = self.clients.write();
            for id in &report.dropped {
                clients.remove(id);
            }
        }
        report
    }
}

impl Default for LiveChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPDATE: &str = r#"{"type":"update"}"#;

    #[tokio::test]
    async fn test_broadcast_reaches_registered_clients() {
        let channel = LiveChannel::new();
        let (_a, mut rx_a) = channel.register();
        let (_b, mut rx_b) = channel.register();

        let report = channel.broadcast(&ChannelMessage::Update);
        assert_eq!(report.delivered, 2);
        assert_eq!(rx_a.recv().await.as_deref(), Some(UPDATE));
        assert_eq!(rx_b.recv().await.as_deref(), Some(UPDATE));
    }

    #[tokio::test]
    async fn test_late_client_sees_only_later_messages() {
        let channel = LiveChannel::new();
        let (_a, mut rx_a) = channel.register();
        channel.broadcast(&ChannelMessage::error("first"));

        let (_c, mut rx_c) = channel.register();
        channel.broadcast(&ChannelMessage::Update);

        assert_eq!(
            rx_a.recv().await.as_deref(),
            Some(r#"{"type":"error","payload":"first"}"#)
        );
        assert_eq!(rx_a.recv().await.as_deref(), Some(UPDATE));
        assert_eq!(rx_c.recv().await.as_deref(), Some(UPDATE));
        assert!(rx_c.try_recv().is_err());
    }

    #[test]
    fn test_closed_client_is_removed() {
        let channel = LiveChannel::new();
        let (gone, rx_gone) = channel.register();
        let (_live, _rx_live) = channel.register();
        drop(rx_gone);

        let report = channel.broadcast(&ChannelMessage::Update);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.dropped, vec![gone]);
        assert_eq!(channel.client_count(), 1);
    }

    #[test]
    fn test_saturated_client_is_removed() {
        let channel = LiveChannel::with_queue(1);
        let (slow, _rx_slow) = channel.register();

        assert_eq!(channel.broadcast(&ChannelMessage::Update).delivered, 1);
        let report = channel.broadcast(&ChannelMessage::Update);
        assert_eq!(report.dropped, vec![slow]);
        assert_eq!(channel.client_count(), 0);
    }

    #[tokio::test]
    async fn test_saturated_client_does_not_block_others() {
        let channel = LiveChannel::with_queue(1);
        let (slow, _rx_slow) = channel.register();
        let (_healthy, mut rx_healthy) = channel.register();

        assert_eq!(channel.broadcast(&ChannelMessage::Update).delivered, 2);
        assert_eq!(rx_healthy.recv().await.as_deref(), Some(UPDATE));

        let report = channel.broadcast(&ChannelMessage::error("next"));
        assert_eq!(report.delivered, 1);
        assert_eq!(report.dropped, vec![slow]);
        assert_eq!(
            rx_healthy.recv().await.as_deref(),
            Some(r#"{"type":"error","payload":"next"}"#)
        );
        assert_eq!(channel.client_count(), 1);
    }

    #[tokio::test]
    async fn test_per_client_order_is_broadcast_order() {
        let channel = LiveChannel::new();
        let (_id, mut rx) = channel.register();
        for n in 0..5 {
            channel.broadcast(&ChannelMessage::error(n.to_string()));
        }
        for n in 0..5 {
            let frame = rx.recv().await.unwrap();
            assert_eq!(
                ChannelMessage::from_json(&frame).unwrap(),
                ChannelMessage::error(n.to_string())
            );
        }
    }

    #[test]
    fn test_unregister_and_empty_broadcast() {
        let channel = LiveChannel::new();
        let (id, _rx) = channel.register();
        channel.unregister(id);
        channel.unregister(id);
        assert_eq!(channel.broadcast(&ChannelMessage::Update), BroadcastReport::default());
    }
}
