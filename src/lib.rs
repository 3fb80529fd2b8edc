//! Sirocco distributed cache invalidation
//!
//! Propagates cache "refresh" and "remove" notifications for content,
//! media, members, templates, macros, content types, and back-office users
//! across a server farm:
//!
//! - every invalidation is applied to the **local** process-wide cache
//!   synchronously, before the call returns;
//! - if the server is part of a configured cluster, the same instruction is
//!   broadcast to every other node in the background, best effort, with
//!   per-node failure isolation;
//! - without cluster configuration the dispatcher degrades to local-only
//!   operation.
//!
//! ## Configuration
//!
//! Cluster behavior is controlled by [`ClusterConfig`], typically embedded
//! in the hosting application's settings file:
//!
//! ```toml
//! [cluster]
//! enabled = true
//! local_host = "web1"
//! delivery_timeout_ms = 5000
//!
//! [[cluster.servers]]
//! host = "web2"
//! base_url = "http://web2:8080"
//! ```

mod api;
mod config;
mod dispatcher;
mod error;
mod membership;
mod message;
mod projection;
pub mod refresher;
mod registry;
mod store;
mod telemetry;
mod transport;

pub use api::CacheIdentified;
pub use config::ClusterConfig;
pub use dispatcher::DistributedCache;
pub use error::{DeliveryError, DistributedCacheError};
pub use membership::{ServerMembership, ServerNode, StaticMembership};
pub use message::{InvalidationMessage, MessageOp};
pub use projection::{MemberContent, MemberProfile, PropertyValue};
pub use registry::RefresherRegistry;
pub use store::{CacheClass, CacheEntry, CacheKey, CacheStore, InMemoryStore};
pub use telemetry::describe_metrics;
pub use transport::{HttpTransport, MessageTransport};
