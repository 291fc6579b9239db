use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opt-in policy for the coordinated shutdown mechanism.
///
/// `armed` defaults to off: a deployment must deliberately enable the
/// mechanism (test harnesses, demo networks) before exit commands have any
/// effect, sent or received.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShutdownConfig {
    #[serde(default)]
    pub armed: bool,
    /// Delay between issuing the last exit command and terminating the
    /// broadcasting node itself, giving async delivery a chance to finish.
    #[serde(default)]
    pub grace_period_ms: Option<u64>,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        ShutdownConfig {
            armed: false,
            grace_period_ms: Some(1000),
        }
    }
}

impl ShutdownConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms.unwrap_or(1000))
    }
}
