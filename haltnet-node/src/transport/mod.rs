//! Point-to-point messaging between nodes.
//!
//! A transport delivers opaque JSON payloads to peer addresses and invokes
//! registered per-topic handlers for inbound messages. Delivery is
//! fire-and-forget; ordering between peers is not guaranteed.

pub mod memory;
pub mod udp;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, error};

use haltnet_shared::peer::PeerAddress;

pub use memory::{InMemoryNetwork, InMemoryTransport};
pub use udp::UdpTransport;

/// Callback invoked once per inbound message on a topic.
pub type MessageHandler = Arc<dyn Fn(Value) -> Result<()> + Send + Sync>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `payload` on `topic` to a single peer. No acknowledgement is
    /// expected or awaited; an `Err` only reports a local hand-off failure.
    async fn send(&self, topic: &str, address: &PeerAddress, payload: Value) -> Result<()>;

    /// Install `handler` for inbound messages on `topic`, replacing any
    /// previous handler for that topic.
    fn register_handler(&self, topic: &str, handler: MessageHandler);
}

/// Per-topic handler table shared by the transport implementations.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    handlers: DashMap<String, MessageHandler>,
}

impl HandlerRegistry {
    pub(crate) fn new() -> Self {
        HandlerRegistry::default()
    }

    pub(crate) fn register(&self, topic: &str, handler: MessageHandler) {
        self.handlers.insert(topic.to_string(), handler);
    }

    /// Route one inbound message to its topic handler.
    ///
    /// A handler error is fatal for that message and is logged here; the
    /// transport keeps receiving.
    pub(crate) fn dispatch(&self, topic: &str, payload: Value) {
        let handler = self.handlers.get(topic).map(|h| h.value().clone());
        match handler {
            Some(handler) => {
                if let Err(e) = handler(payload) {
                    error!("handler for topic {} failed: {:#}", topic, e);
                }
            }
            None => debug!("no handler registered for topic {}", topic),
        }
    }
}
