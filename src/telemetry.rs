//! Metric descriptions for the dispatcher.
//!
//! The hosting application installs its own tracing subscriber and metrics
//! recorder; this module only registers descriptions for the metrics the
//! crate emits. Safe to call more than once.

use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};

pub(crate) const METRIC_BROADCAST_FAILURE_TOTAL: &str = "sirocco_broadcast_failure_total";
pub(crate) const METRIC_BROADCAST_MS: &str = "sirocco_broadcast_ms";

static METRIC_DESCRIPTIONS: Once = Once::new();

pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_BROADCAST_FAILURE_TOTAL,
            Unit::Count,
            "Total number of per-node invalidation deliveries that failed."
        );
        describe_histogram!(
            METRIC_BROADCAST_MS,
            Unit::Milliseconds,
            "Broadcast fan-out latency in milliseconds."
        );
    });
}
