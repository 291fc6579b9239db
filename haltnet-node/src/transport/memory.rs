//! In-process message mesh for tests and single-process demos.
//!
//! Endpoints are keyed by name and addressed as [`PeerAddress::Local`].
//! Delivery runs the receiving handler synchronously on the sender's task,
//! which keeps multi-node tests deterministic.

use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use haltnet_shared::peer::PeerAddress;

use super::{HandlerRegistry, MessageHandler, Transport};

/// Shared hub connecting every [`InMemoryTransport`] endpoint created
/// from it.
#[derive(Default, Clone)]
pub struct InMemoryNetwork {
    endpoints: Arc<DashMap<String, Arc<HandlerRegistry>>>,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        InMemoryNetwork::default()
    }

    /// Create (or re-attach to) the named endpoint on this mesh.
    pub fn endpoint(&self, name: &str) -> InMemoryTransport {
        let handlers = self
            .endpoints
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(HandlerRegistry::new()))
            .clone();
        InMemoryTransport {
            endpoints: self.endpoints.clone(),
            handlers,
        }
    }

    /// The address peers use to reach the named endpoint.
    pub fn address_of(name: &str) -> PeerAddress {
        PeerAddress::Local(name.to_string())
    }
}

pub struct InMemoryTransport {
    endpoints: Arc<DashMap<String, Arc<HandlerRegistry>>>,
    handlers: Arc<HandlerRegistry>,
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, topic: &str, address: &PeerAddress, payload: Value) -> Result<()> {
        let PeerAddress::Local(name) = address else {
            bail!("peer address {} is not on the local mesh", address);
        };
        let Some(target) = self.endpoints.get(name).map(|e| e.value().clone()) else {
            bail!("no endpoint named {} on the local mesh", name);
        };
        target.dispatch(topic, payload);
        Ok(())
    }

    fn register_handler(&self, topic: &str, handler: MessageHandler) {
        self.handlers.register(topic, handler);
    }
}
