//! Distributed cache dispatcher.
//!
//! Applies every invalidation to the local store synchronously, then fans
//! the same instruction out to the rest of the farm in the background.
//! Local correctness never depends on cluster availability: by the time an
//! operation returns, the caller's own cache reads observe the new state,
//! while remote servers converge eventually.
//!
//! Fan-out runs on the ambient tokio runtime. Dispatching from synchronous
//! code outside a runtime still applies locally; the broadcast is skipped,
//! logged, and counted as a delivery failure.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use metrics::{counter, histogram};
use tracing::{debug, info, warn};

use crate::config::ClusterConfig;
use crate::error::{DeliveryError, DistributedCacheError};
use crate::membership::{ServerMembership, ServerNode, StaticMembership};
use crate::message::{InvalidationMessage, MessageOp};
use crate::refresher::RefresherId;
use crate::registry::RefresherRegistry;
use crate::store::CacheStore;
use crate::telemetry::{METRIC_BROADCAST_FAILURE_TOTAL, METRIC_BROADCAST_MS};
use crate::transport::MessageTransport;

pub struct DistributedCache {
    registry: RefresherRegistry,
    store: Arc<dyn CacheStore>,
    membership: Arc<dyn ServerMembership>,
    transport: Arc<dyn MessageTransport>,
    config: ClusterConfig,
}

impl DistributedCache {
    pub fn new(
        registry: RefresherRegistry,
        store: Arc<dyn CacheStore>,
        membership: Arc<dyn ServerMembership>,
        transport: Arc<dyn MessageTransport>,
        config: ClusterConfig,
    ) -> Self {
        Self {
            registry,
            store,
            membership,
            transport,
            config,
        }
    }

    /// A dispatcher with no cluster: every operation applies locally and
    /// nothing is ever broadcast.
    pub fn local_only(registry: RefresherRegistry, store: Arc<dyn CacheStore>) -> Self {
        Self::new(
            registry,
            store,
            Arc::new(StaticMembership::standalone()),
            Arc::new(NullTransport),
            ClusterConfig::default(),
        )
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Refresh the cached items keyed by `ids`. Empty input is a no-op.
    pub fn refresh(
        &self,
        refresher: RefresherId,
        ids: &[i32],
    ) -> Result<(), DistributedCacheError> {
        if ids.is_empty() {
            debug!(%refresher, "Refresh skipped: nothing to invalidate");
            return Ok(());
        }
        self.dispatch(
            InvalidationMessage::new(refresher, MessageOp::RefreshIds(ids.to_vec())),
            true,
        )
    }

    /// Remove the cached items keyed by `ids`. Empty input is a no-op.
    pub fn remove(
        &self,
        refresher: RefresherId,
        ids: &[i32],
    ) -> Result<(), DistributedCacheError> {
        if ids.is_empty() {
            debug!(%refresher, "Remove skipped: nothing to invalidate");
            return Ok(());
        }
        self.dispatch(
            InvalidationMessage::new(refresher, MessageOp::RemoveIds(ids.to_vec())),
            true,
        )
    }

    /// Refresh by domain objects: extracts each item's id through the key
    /// selector and degenerates to a by-ids refresh.
    pub fn refresh_by_object<T>(
        &self,
        refresher: RefresherId,
        items: &[T],
        key: impl Fn(&T) -> i32,
    ) -> Result<(), DistributedCacheError> {
        let ids: Vec<i32> = items.iter().map(key).collect();
        self.refresh(refresher, &ids)
    }

    /// Remove by domain objects; see [`Self::refresh_by_object`].
    pub fn remove_by_object<T>(
        &self,
        refresher: RefresherId,
        items: &[T],
        key: impl Fn(&T) -> i32,
    ) -> Result<(), DistributedCacheError> {
        let ids: Vec<i32> = items.iter().map(key).collect();
        self.remove(refresher, &ids)
    }

    /// Refresh from a pre-encoded structured payload.
    pub fn refresh_by_payload(
        &self,
        refresher: RefresherId,
        payload: &str,
    ) -> Result<(), DistributedCacheError> {
        self.dispatch(
            InvalidationMessage::new(refresher, MessageOp::RefreshPayload(payload.to_string())),
            true,
        )
    }

    /// Remove from a pre-encoded structured payload.
    pub fn remove_by_payload(
        &self,
        refresher: RefresherId,
        payload: &str,
    ) -> Result<(), DistributedCacheError> {
        self.dispatch(
            InvalidationMessage::new(refresher, MessageOp::RemovePayload(payload.to_string())),
            true,
        )
    }

    /// Evict the strategy's entire cache class. `broadcast = false` confines
    /// the eviction to the current server.
    pub fn refresh_all(
        &self,
        refresher: RefresherId,
        broadcast: bool,
    ) -> Result<(), DistributedCacheError> {
        self.dispatch(
            InvalidationMessage::new(refresher, MessageOp::RefreshAll),
            broadcast,
        )
    }

    /// Apply a message received from another server. Applies locally and
    /// never rebroadcasts, otherwise the farm would echo forever.
    pub fn apply_remote(
        &self,
        message: &InvalidationMessage,
    ) -> Result<(), DistributedCacheError> {
        self.apply_local(message)?;
        info!(
            refresher = %message.refresher,
            op = message.op.describe(),
            "Remote cache invalidation applied"
        );
        Ok(())
    }

    fn dispatch(
        &self,
        message: InvalidationMessage,
        broadcast: bool,
    ) -> Result<(), DistributedCacheError> {
        // Resolve-and-apply first: an unknown refresher or a failing local
        // apply must surface to the caller before anything leaves this
        // server.
        self.apply_local(&message)?;

        info!(
            refresher = %message.refresher,
            op = message.op.describe(),
            broadcast,
            clustered = self.config.is_clustered(),
            "Cache invalidation applied locally"
        );

        if broadcast && self.config.is_clustered() {
            self.spawn_broadcast(message);
        }

        Ok(())
    }

    fn apply_local(&self, message: &InvalidationMessage) -> Result<(), DistributedCacheError> {
        let refresher = self.registry.resolve(message.refresher)?;
        let store = self.store.as_ref();

        match &message.op {
            MessageOp::RefreshIds(ids) | MessageOp::RemoveIds(ids) => {
                refresher.apply_ids(store, ids)
            }
            MessageOp::RefreshPayload(payload) => refresher.apply_payload(store, payload, false),
            MessageOp::RemovePayload(payload) => refresher.apply_payload(store, payload, true),
            MessageOp::RefreshAll => refresher.apply_all(store),
        }
    }

    /// Fan the message out to every other server, off the caller's path.
    ///
    /// Membership is snapshotted inside the task, per broadcast. One
    /// unreachable node never prevents delivery to the others, and nothing
    /// here can roll back the already-committed local apply. Broadcast needs
    /// a tokio runtime; without one the fan-out is skipped and reported like
    /// any other delivery failure, since the local apply has already
    /// committed and must not be unwound.
    fn spawn_broadcast(&self, message: InvalidationMessage) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    refresher = %message.refresher,
                    op = message.op.describe(),
                    "Broadcast skipped: no async runtime available"
                );
                counter!(METRIC_BROADCAST_FAILURE_TOTAL).increment(1);
                return;
            }
        };

        let membership = Arc::clone(&self.membership);
        let transport = Arc::clone(&self.transport);
        let local_host = self.config.local_host.clone();

        runtime.spawn(async move {
            let started_at = Instant::now();

            let peers: Vec<ServerNode> = membership
                .current_servers()
                .await
                .into_iter()
                .filter(|node| node.host != local_host)
                .collect();

            if peers.is_empty() {
                debug!(
                    refresher = %message.refresher,
                    "Broadcast skipped: no peers in membership snapshot"
                );
                return;
            }

            let deliveries = peers.iter().map(|node| {
                let transport = &transport;
                let message = &message;
                async move { (node, transport.send(node, message).await) }
            });

            let mut delivered = 0usize;
            for (node, result) in join_all(deliveries).await {
                match result {
                    Ok(()) => delivered += 1,
                    Err(DeliveryError { host, reason }) => {
                        warn!(
                            %host,
                            %reason,
                            refresher = %message.refresher,
                            op = message.op.describe(),
                            "Cache invalidation delivery failed"
                        );
                        counter!(METRIC_BROADCAST_FAILURE_TOTAL).increment(1);
                    }
                }
            }

            info!(
                refresher = %message.refresher,
                op = message.op.describe(),
                peer_count = peers.len(),
                delivered,
                "Cache invalidation broadcast complete"
            );

            histogram!(METRIC_BROADCAST_MS).record(started_at.elapsed().as_secs_f64() * 1000.0);
        });
    }
}

/// Transport for local-only deployments; never invoked because the default
/// configuration is not clustered.
struct NullTransport;

#[async_trait::async_trait]
impl MessageTransport for NullTransport {
    async fn send(
        &self,
        node: &ServerNode,
        _message: &InvalidationMessage,
    ) -> Result<(), DeliveryError> {
        Err(DeliveryError::new(
            &node.host,
            "no transport configured for local-only dispatcher",
        ))
    }
}
