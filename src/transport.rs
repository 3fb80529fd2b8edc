//! Delivery transport collaborator.
//!
//! Owns per-node timeout and (if desired) retry policy. The dispatcher
//! treats any failure, timeouts included, as an ordinary per-node
//! [`DeliveryError`]: recovered, logged, never retried by the dispatcher
//! itself.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ClusterConfig;
use crate::error::{DeliveryError, DistributedCacheError};
use crate::membership::ServerNode;
use crate::message::InvalidationMessage;

#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(
        &self,
        node: &ServerNode,
        message: &InvalidationMessage,
    ) -> Result<(), DeliveryError>;
}

/// HTTP transport posting messages as JSON to each node's invalidation
/// endpoint. The receiving server feeds the decoded message to
/// [`DistributedCache::apply_remote`](crate::DistributedCache::apply_remote).
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Path the hosting application is expected to serve on every node.
    pub const ENDPOINT_PATH: &'static str = "/internal/cache/invalidate";

    pub fn new(timeout: Duration) -> Result<Self, DistributedCacheError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DistributedCacheError::Transport(err.to_string()))?;
        Ok(Self { client })
    }

    /// A transport using the cluster's configured per-node delivery timeout.
    pub fn from_config(config: &ClusterConfig) -> Result<Self, DistributedCacheError> {
        Self::new(config.delivery_timeout())
    }

    fn endpoint(node: &ServerNode) -> String {
        format!(
            "{}{}",
            node.base_url.trim_end_matches('/'),
            Self::ENDPOINT_PATH
        )
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn send(
        &self,
        node: &ServerNode,
        message: &InvalidationMessage,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(Self::endpoint(node))
            .json(message)
            .send()
            .await
            .map_err(|err| DeliveryError::new(&node.host, err.to_string()))?;

        response
            .error_for_status()
            .map_err(|err| DeliveryError::new(&node.host, err.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let node = ServerNode::new("web1", "http://web1:8080/");
        assert_eq!(
            HttpTransport::endpoint(&node),
            "http://web1:8080/internal/cache/invalidate"
        );
    }

    #[test]
    fn from_config_wires_the_delivery_timeout() {
        let config = ClusterConfig {
            delivery_timeout_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.delivery_timeout(), Duration::from_millis(250));
        HttpTransport::from_config(&config).expect("client");
    }

    #[tokio::test]
    async fn unreachable_node_is_a_delivery_error() {
        use crate::message::MessageOp;
        use crate::refresher::PAGE_REFRESHER;

        let config = ClusterConfig {
            delivery_timeout_ms: 200,
            ..Default::default()
        };
        let transport = HttpTransport::from_config(&config).expect("client");
        // Reserved TEST-NET-1 address; nothing listens there.
        let node = ServerNode::new("ghost", "http://192.0.2.1:1");
        let message =
            InvalidationMessage::new(PAGE_REFRESHER, MessageOp::RefreshIds(vec![1]));

        let result = transport.send(&node, &message).await;
        let err = result.expect_err("delivery should fail");
        assert_eq!(err.host, "ghost");
    }
}
