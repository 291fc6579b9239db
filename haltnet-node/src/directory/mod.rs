//! Peer membership directory.

use anyhow::Result;
use async_trait::async_trait;

use haltnet_shared::peer::PeerRecord;

/// Read access to the set of known peers.
#[async_trait]
pub trait NetworkDirectory: Send + Sync {
    /// A snapshot of the current peer set. Later membership changes are
    /// not reflected in an already-returned list.
    async fn list_peers(&self) -> Result<Vec<PeerRecord>>;
}

/// Directory backed by the fixed peer list from the node's config file.
pub struct StaticDirectory {
    peers: Vec<PeerRecord>,
}

impl StaticDirectory {
    pub fn new(peers: Vec<PeerRecord>) -> Self {
        StaticDirectory { peers }
    }
}

#[async_trait]
impl NetworkDirectory for StaticDirectory {
    async fn list_peers(&self) -> Result<Vec<PeerRecord>> {
        Ok(self.peers.clone())
    }
}
