//! Cluster membership collaborator.
//!
//! The dispatcher re-queries the membership on every broadcast; the list is
//! a point-in-time snapshot, never cached across calls, so dynamic scale-out
//! is picked up without restarts.

use async_trait::async_trait;
use serde::Deserialize;

/// One member of the server farm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ServerNode {
    /// Stable identity, used to exclude the local node from fan-out.
    pub host: String,
    /// Where this node receives invalidation messages.
    pub base_url: String,
}

impl ServerNode {
    pub fn new(host: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            base_url: base_url.into(),
        }
    }
}

/// Supplies the current list of cluster servers.
///
/// May be static configuration or a dynamic registration service backed by
/// a database; the dispatcher does not care.
#[async_trait]
pub trait ServerMembership: Send + Sync {
    async fn current_servers(&self) -> Vec<ServerNode>;
}

/// Fixed membership from configuration.
pub struct StaticMembership {
    servers: Vec<ServerNode>,
}

impl StaticMembership {
    pub fn new(servers: Vec<ServerNode>) -> Self {
        Self { servers }
    }

    /// An empty membership: the server is not part of a cluster.
    pub fn standalone() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ServerMembership for StaticMembership {
    async fn current_servers(&self) -> Vec<ServerNode> {
        self.servers.clone()
    }
}
