//! Coordinated shutdown broadcast.
//!
//! One node sends an [`ExitCommand`] to every known peer and then
//! terminates itself after a grace delay; armed peers terminate on
//! receipt. Fire-and-forget: no acks, no retries, no draining.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use haltnet_shared::wire::ExitCommand;

use crate::directory::NetworkDirectory;
use crate::process::ProcessExit;
use crate::transport::{MessageHandler, Transport};

/// Well-known topic of the exit channel. The `.0` suffix is the fixed
/// session sub-address; send and receive sides must use the same string.
pub const EXIT_TOPIC: &str = "exit.0";

/// Write-once switch shared by the exit handler and broadcaster.
///
/// Starts disarmed; [`ArmingGate::arm`] flips it exactly once and nothing
/// ever flips it back. Both sides must hold clones of the same gate so
/// they observe identical state.
#[derive(Debug, Clone, Default)]
pub struct ArmingGate(Arc<AtomicBool>);

impl ArmingGate {
    pub fn new() -> Self {
        ArmingGate::default()
    }

    /// Arm the shutdown mechanism. Calling this again is a no-op.
    pub fn arm(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_armed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builds the inbound handler for [`EXIT_TOPIC`].
///
/// Messages arriving before the gate is armed are ignored. Once armed, a
/// decoded command terminates the process with the carried exit code; a
/// payload that fails to decode is an error for that invocation and is
/// surfaced by the transport's dispatch, not swallowed here.
///
/// Normally installed via [`register_exit_handler`]; exposed on its own so
/// a harness can drive the unarmed path directly.
pub fn exit_handler(gate: ArmingGate, process: Arc<dyn ProcessExit>) -> MessageHandler {
    Arc::new(move |payload| {
        if !gate.is_armed() {
            debug!("ignoring exit command, shutdown mechanism not armed");
            return Ok(());
        }
        let command: ExitCommand = serde_json::from_value(payload)?;
        info!(
            "received exit command, terminating with code {}",
            command.exit_code
        );
        process.exit(command.exit_code);
        Ok(())
    })
}

/// Install the exit handler on the transport, then arm the gate.
///
/// Registration is what arms the mechanism; there is no separate arming
/// step. A node that never registers stays disarmed and both sending and
/// receiving remain no-ops.
pub fn register_exit_handler(
    transport: &dyn Transport,
    gate: &ArmingGate,
    process: Arc<dyn ProcessExit>,
) {
    transport.register_handler(EXIT_TOPIC, exit_handler(gate.clone(), process));
    gate.arm();
}

/// Sends the exit command to every eligible peer, then terminates the
/// local process.
pub struct ExitBroadcaster {
    local_identity: String,
    directory: Arc<dyn NetworkDirectory>,
    transport: Arc<dyn Transport>,
    gate: ArmingGate,
    grace_period: Duration,
    process: Arc<dyn ProcessExit>,
}

impl ExitBroadcaster {
    pub fn new(
        local_identity: impl Into<String>,
        directory: Arc<dyn NetworkDirectory>,
        transport: Arc<dyn Transport>,
        gate: ArmingGate,
        grace_period: Duration,
        process: Arc<dyn ProcessExit>,
    ) -> Self {
        ExitBroadcaster {
            local_identity: local_identity.into(),
            directory,
            transport,
            gate,
            grace_period,
            process,
        }
    }

    /// Broadcast an exit command to all known peers, wait out the grace
    /// period, then terminate this process with `exit_code`.
    ///
    /// Returns `Ok(false)` without side effects when the mechanism is not
    /// armed. When armed the return value is only observable if process
    /// termination is intercepted, e.g. by a test harness.
    pub async fn broadcast(&self, exit_code: i32) -> Result<bool> {
        if !self.gate.is_armed() {
            return Ok(false);
        }

        let payload = serde_json::to_value(ExitCommand { exit_code })?;
        let peers = self.directory.list_peers().await?;
        info!(
            "broadcasting exit command (code {}) to {} known peers",
            exit_code,
            peers.len()
        );

        for peer in peers {
            if !peer.is_routable() {
                debug!("skipping non-routable peer {}", peer.identity);
                continue;
            }
            // Never send to ourselves: a self-addressed command loops back
            // through the inbound path and re-triggers delivery. The local
            // process exits below instead.
            if peer.identity == self.local_identity {
                continue;
            }
            if let Err(e) = self
                .transport
                .send(EXIT_TOPIC, &peer.address, payload.clone())
                .await
            {
                // Fire-and-forget: an unreachable peer does not affect the
                // remaining sends.
                warn!("failed to send exit command to {}: {:#}", peer.identity, e);
            }
        }

        // Give async delivery to the other nodes a chance to complete
        // before this process goes away.
        sleep(self.grace_period).await;

        info!("terminating local process with exit code {}", exit_code);
        self.process.exit(exit_code);
        Ok(true)
    }
}
