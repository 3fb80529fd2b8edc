//! The invalidation message sent between servers.

use serde::{Deserialize, Serialize};

use crate::refresher::RefresherId;

/// The operation half of a message. Exactly one operation per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOp {
    /// Refresh the cached items keyed by these ids.
    RefreshIds(Vec<i32>),
    /// Remove the cached items keyed by these ids.
    RemoveIds(Vec<i32>),
    /// Refresh from a pre-encoded structured payload.
    RefreshPayload(String),
    /// Remove from a pre-encoded structured payload.
    RemovePayload(String),
    /// Evict the strategy's entire cache class.
    RefreshAll,
}

impl MessageOp {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::RefreshIds(_) => "refresh_ids",
            Self::RemoveIds(_) => "remove_ids",
            Self::RefreshPayload(_) => "refresh_payload",
            Self::RemovePayload(_) => "remove_payload",
            Self::RefreshAll => "refresh_all",
        }
    }
}

/// One self-contained invalidation instruction.
///
/// Messages are full evictions, not deltas, so out-of-order delivery across
/// the cluster converges to the same final cache state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationMessage {
    pub refresher: RefresherId,
    pub op: MessageOp,
}

impl InvalidationMessage {
    pub fn new(refresher: RefresherId, op: MessageOp) -> Self {
        Self { refresher, op }
    }
}
