use std::fmt;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Routing target for a peer, as reported by the membership directory.
///
/// `Placeholder` is the reserved non-address: the peer exists in the
/// directory but is not a real network participant and must never receive
/// protocol traffic.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PeerAddress {
    /// A datagram endpoint reachable over the network.
    Udp(SocketAddr),
    /// A named in-process endpoint on the local message mesh.
    Local(String),
    /// Directory entry only; not routable.
    Placeholder,
}

impl PeerAddress {
    pub fn is_routable(&self) -> bool {
        !matches!(self, PeerAddress::Placeholder)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerAddress::Udp(addr) => write!(f, "udp://{}", addr),
            PeerAddress::Local(name) => write!(f, "local://{}", name),
            PeerAddress::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// A known peer as listed by the membership directory. The directory owns
/// these records; the shutdown mechanism only reads them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PeerRecord {
    /// Stable identifier, comparable against the local node's own id.
    pub identity: String,
    pub address: PeerAddress,
}

impl PeerRecord {
    pub fn new(identity: impl Into<String>, address: PeerAddress) -> Self {
        PeerRecord {
            identity: identity.into(),
            address,
        }
    }

    pub fn is_routable(&self) -> bool {
        self.address.is_routable()
    }
}
