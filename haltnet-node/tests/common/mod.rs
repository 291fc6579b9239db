#![allow(dead_code)]

//! Recording fakes and polling helpers shared by the integration tests.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use haltnet_node::process::ProcessExit;
use haltnet_node::transport::{MessageHandler, Transport};
use haltnet_shared::peer::PeerAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEvent {
    Registered { topic: String },
    Sent { topic: String, address: String },
    Exited { code: i32 },
}

/// Ordered record of everything the fakes observed. Cloned freely; all
/// clones share the same underlying log.
#[derive(Default, Clone)]
pub struct EventLog(Arc<Mutex<Vec<TestEvent>>>);

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn push(&self, event: TestEvent) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<TestEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn exit_codes(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TestEvent::Exited { code } => Some(code),
                _ => None,
            })
            .collect()
    }

    pub fn sent_addresses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TestEvent::Sent { address, .. } => Some(address),
                _ => None,
            })
            .collect()
    }
}

/// Intercepts process termination so tests can assert on it.
pub struct RecordingExit {
    log: EventLog,
}

impl RecordingExit {
    pub fn new(log: EventLog) -> Arc<Self> {
        Arc::new(RecordingExit { log })
    }
}

impl ProcessExit for RecordingExit {
    fn exit(&self, code: i32) {
        self.log.push(TestEvent::Exited { code });
    }
}

/// Transport double that records sends and registrations instead of
/// delivering anything. Payloads are kept for per-send assertions, and
/// individual addresses can be made unreachable.
pub struct RecordingTransport {
    log: EventLog,
    payloads: Mutex<Vec<Value>>,
    unreachable: Vec<String>,
}

impl RecordingTransport {
    pub fn new(log: EventLog) -> Arc<Self> {
        Arc::new(RecordingTransport {
            log,
            payloads: Mutex::new(Vec::new()),
            unreachable: Vec::new(),
        })
    }

    /// Like [`RecordingTransport::new`], but sends to the given addresses
    /// (in `Display` form) fail instead of being recorded.
    pub fn with_unreachable(log: EventLog, addresses: &[&str]) -> Arc<Self> {
        Arc::new(RecordingTransport {
            log,
            payloads: Mutex::new(Vec::new()),
            unreachable: addresses.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, topic: &str, address: &PeerAddress, payload: Value) -> Result<()> {
        if self.unreachable.contains(&address.to_string()) {
            anyhow::bail!("peer {} unreachable", address);
        }
        self.log.push(TestEvent::Sent {
            topic: topic.to_string(),
            address: address.to_string(),
        });
        self.payloads.lock().unwrap().push(payload);
        Ok(())
    }

    fn register_handler(&self, topic: &str, _handler: MessageHandler) {
        self.log.push(TestEvent::Registered {
            topic: topic.to_string(),
        });
    }
}

/// Poll an async condition until it holds, panicking after ~1s.
pub async fn wait_for<F, Fut>(description: &str, condition: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {description}");
}
