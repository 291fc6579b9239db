//! Datagram transport.
//!
//! One UDP socket per node: envelopes go out with `send_to`, a background
//! task receives and dispatches inbound datagrams. UDP's lack of
//! acknowledgement matches the fire-and-forget contract of the protocol.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use tokio::net::UdpSocket;
use tracing::{info, warn};

use haltnet_shared::peer::PeerAddress;
use haltnet_shared::wire::Envelope;

use super::{HandlerRegistry, MessageHandler, Transport};

// Envelopes are a topic string plus a small JSON payload; anything close
// to this limit indicates a protocol mismatch.
const MAX_DATAGRAM: usize = 64 * 1024;

pub struct UdpTransport {
    socket: Arc<UdpSocket>,
    handlers: Arc<HandlerRegistry>,
}

impl UdpTransport {
    /// Bind the node's datagram endpoint and start the receive loop.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = Arc::new(
            UdpSocket::bind(addr)
                .await
                .with_context(|| format!("failed to bind udp endpoint {}", addr))?,
        );
        let handlers = Arc::new(HandlerRegistry::new());
        info!("udp transport listening on {}", socket.local_addr()?);

        let recv_socket = socket.clone();
        let recv_handlers = handlers.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; MAX_DATAGRAM];
            loop {
                match recv_socket.recv_from(&mut buf).await {
                    Ok((len, from)) => match Envelope::from_bytes(&buf[..len]) {
                        Ok(envelope) => recv_handlers.dispatch(&envelope.topic, envelope.payload),
                        Err(e) => warn!("dropping malformed datagram from {}: {}", from, e),
                    },
                    Err(e) => {
                        warn!("udp receive failed: {}", e);
                    }
                }
            }
        });

        Ok(UdpTransport { socket, handlers })
    }

    /// The bound address, with the OS-assigned port when bound to port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, topic: &str, address: &PeerAddress, payload: Value) -> Result<()> {
        let PeerAddress::Udp(addr) = address else {
            bail!("peer address {} is not a udp endpoint", address);
        };
        let datagram = Envelope::new(topic, payload).to_bytes()?;
        self.socket
            .send_to(&datagram, *addr)
            .await
            .with_context(|| format!("failed to send datagram to {}", addr))?;
        Ok(())
    }

    fn register_handler(&self, topic: &str, handler: MessageHandler) {
        self.handlers.register(topic, handler);
    }
}
