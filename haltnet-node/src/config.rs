use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use haltnet_shared::config::ShutdownConfig;
use haltnet_shared::peer::PeerRecord;

const CONFIG_ENV: &str = "HALTNET_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "haltnet.yaml";

fn default_node_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Stable identity of this node in the network. Generated fresh when
    /// the config file does not pin one.
    #[serde(default = "default_node_id")]
    pub node_id: String,
    pub listen_addr: SocketAddr,
    #[serde(default)]
    pub peers: Vec<PeerRecord>,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl Config {
    /// Load the node config, resolving the file as: explicit `--config`
    /// path, then `HALTNET_CONFIG`, then `./haltnet.yaml`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) => PathBuf::from(p),
                Err(_) => PathBuf::from(DEFAULT_CONFIG_FILE),
            },
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
