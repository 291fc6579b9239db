//! Node wiring and run loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::directory::{NetworkDirectory, StaticDirectory};
use crate::exit::{ArmingGate, ExitBroadcaster, register_exit_handler};
use crate::process::{OsExit, ProcessExit};
use crate::transport::UdpTransport;
use crate::util::shutdown::SHUTDOWN;

/// A running haltnet node: bound transport, peer directory, and the
/// (possibly armed) shutdown mechanism.
pub struct Node {
    config: Config,
    transport: Arc<UdpTransport>,
    directory: Arc<dyn NetworkDirectory>,
    gate: ArmingGate,
    process: Arc<dyn ProcessExit>,
    grace_period: Duration,
}

impl Node {
    /// Bind the transport and wire up the node from its config.
    ///
    /// One arming gate is created here and handed to both the exit handler
    /// and the broadcaster. When `shutdown.armed` is set the handler is
    /// installed immediately, which arms the gate; otherwise the node
    /// never arms and every shutdown operation stays a no-op.
    pub async fn start(config: Config) -> Result<Self> {
        let transport = Arc::new(UdpTransport::bind(config.listen_addr).await?);
        let directory: Arc<dyn NetworkDirectory> =
            Arc::new(StaticDirectory::new(config.peers.clone()));
        let gate = ArmingGate::new();
        let process: Arc<dyn ProcessExit> = Arc::new(OsExit);
        let grace_period = config.shutdown.grace_period();

        if config.shutdown.armed {
            register_exit_handler(transport.as_ref(), &gate, process.clone());
            info!("node {} armed for coordinated shutdown", config.node_id);
        }

        Ok(Node {
            config,
            transport,
            directory,
            gate,
            process,
            grace_period,
        })
    }

    pub fn id(&self) -> &str {
        &self.config.node_id
    }

    /// Broadcaster bound to this node's directory, transport, and gate.
    pub fn broadcaster(&self) -> ExitBroadcaster {
        ExitBroadcaster::new(
            self.config.node_id.clone(),
            self.directory.clone(),
            self.transport.clone(),
            self.gate.clone(),
            self.grace_period,
            self.process.clone(),
        )
    }

    /// Serve until Ctrl+C. Inbound exit commands terminate the process
    /// from the transport's receive task and never return here.
    pub async fn run(&self) -> Result<()> {
        info!(
            "node {} serving on {}, {} known peers",
            self.config.node_id,
            self.transport.local_addr()?,
            self.config.peers.len()
        );
        SHUTDOWN.cancelled().await;
        info!("node {} stopping", self.config.node_id);
        Ok(())
    }
}
