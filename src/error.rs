use thiserror::Error;

use crate::refresher::RefresherId;

/// Errors surfaced synchronously by registry and dispatcher operations.
#[derive(Debug, Error)]
pub enum DistributedCacheError {
    /// No strategy is registered under the requested id. A misconfiguration
    /// must never masquerade as a successful invalidation.
    #[error("no cache refresher registered for {0}")]
    UnknownRefresher(RefresherId),

    /// Two strategies registered under the same id. Fatal at startup.
    #[error("cache refresher {id} already registered as `{existing}`")]
    DuplicateRefresher {
        id: RefresherId,
        existing: &'static str,
    },

    /// The resolved strategy does not support the requested operation.
    #[error("cache refresher `{refresher}` does not support {operation}")]
    Unsupported {
        refresher: &'static str,
        operation: &'static str,
    },

    /// A structured payload could not be encoded or decoded.
    #[error("invalid invalidation payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The delivery transport could not be constructed. Fatal at startup,
    /// distinct from a per-node [`DeliveryError`] at broadcast time.
    #[error("failed to build delivery transport: {0}")]
    Transport(String),
}

impl DistributedCacheError {
    pub fn unsupported(refresher: &'static str, operation: &'static str) -> Self {
        Self::Unsupported {
            refresher,
            operation,
        }
    }
}

/// A failed delivery to one remote node.
///
/// Recovered by the dispatcher: logged and counted, never raised to the
/// caller and never allowed to abort delivery to the remaining nodes.
#[derive(Debug, Error)]
#[error("delivery to {host} failed: {reason}")]
pub struct DeliveryError {
    pub host: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            reason: reason.into(),
        }
    }
}
