//! Cluster configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::membership::ServerNode;

// Default values for cluster configuration
const DEFAULT_DELIVERY_TIMEOUT_MS: u64 = 5000;

/// Cluster configuration, typically deserialized from the hosting
/// application's settings file.
///
/// With `enabled = false` or an empty server list the dispatcher runs in
/// local-only mode: every operation still applies to the local cache, and
/// nothing is ever broadcast.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Enable cluster broadcast.
    pub enabled: bool,
    /// Identity of this node, matched against `ServerNode::host` to exclude
    /// the local server from fan-out.
    pub local_host: String,
    /// Known members of the farm, including (optionally) this node.
    pub servers: Vec<ServerNode>,
    /// Per-node delivery timeout in milliseconds, owned by the transport.
    pub delivery_timeout_ms: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            local_host: String::new(),
            servers: Vec::new(),
            delivery_timeout_ms: DEFAULT_DELIVERY_TIMEOUT_MS,
        }
    }
}

impl ClusterConfig {
    /// Returns true if broadcast should happen at all.
    pub fn is_clustered(&self) -> bool {
        self.enabled && !self.servers.is_empty()
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }
}
