pub mod config;
pub mod peer;
pub mod wire;

pub use config::ShutdownConfig;
pub use peer::{PeerAddress, PeerRecord};
pub use wire::{Envelope, ExitCommand};
