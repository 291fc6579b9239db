//! Global shutdown signal for Ctrl+C handling.
//!
//! This stops the local run loop only; the coordinated network-wide
//! shutdown lives in [`crate::exit`].

use once_cell::sync::Lazy;
use tokio_util::sync::CancellationToken;

/// Cancelled when the process is asked to stop.
pub static SHUTDOWN: Lazy<CancellationToken> = Lazy::new(CancellationToken::new);

/// Cancel [`SHUTDOWN`] on Ctrl+C. Called once from the binary entrypoint.
pub fn install_ctrl_c_handler() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            SHUTDOWN.cancel();
        }
    });
}
