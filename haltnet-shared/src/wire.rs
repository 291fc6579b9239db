use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The shutdown command payload. One instance is created per send and
/// discarded after transport hand-off; it carries no sender, id, or
/// timestamp.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ExitCommand {
    pub exit_code: i32,
}

/// Framing put on the wire by every transport so a single inbound channel
/// can dispatch to per-topic handlers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Envelope {
    pub topic: String,
    pub payload: Value,
}

impl Envelope {
    pub fn new(topic: &str, payload: Value) -> Self {
        Envelope {
            topic: topic.to_string(),
            payload,
        }
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
