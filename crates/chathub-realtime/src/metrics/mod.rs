//! Hub metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Engine-level metrics counters.
///
/// Written by the hub control loop, read from anywhere.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Total connections ever registered
    pub connections_total: AtomicU64,
    /// Connections currently registered
    pub connections_active: AtomicU64,
    /// Chat messages fanned out
    pub messages_broadcast: AtomicU64,
    /// Presence snapshots fanned out
    pub presence_published: AtomicU64,
    /// Payloads placed on outbound queues
    pub payloads_delivered: AtomicU64,
    /// Connections evicted because their queue was full
    pub evictions: AtomicU64,
}

impl EngineMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a registration
    pub fn record_register(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a removal, whether requested or forced
    pub fn record_deregister(&self) {
        self.connections_active.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record a slow receiver being dropped
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one chat fan-out reaching `delivered` queues
    pub fn record_broadcast(&self, delivered: u64) {
        self.messages_broadcast.fetch_add(1, Ordering::Relaxed);
        self.payloads_delivered.fetch_add(delivered, Ordering::Relaxed);
    }

    /// Record one presence fan-out reaching `delivered` queues
    pub fn record_presence(&self, delivered: u64) {
        self.presence_published.fetch_add(1, Ordering::Relaxed);
        self.payloads_delivered.fetch_add(delivered, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            messages_broadcast: self.messages_broadcast.load(Ordering::Relaxed),
            presence_published: self.presence_published.load(Ordering::Relaxed),
            payloads_delivered: self.payloads_delivered.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total connections ever registered
    pub connections_total: u64,
    /// Connections currently registered
    pub connections_active: u64,
    /// Chat messages fanned out
    pub messages_broadcast: u64,
    /// Presence snapshots fanned out
    pub presence_published: u64,
    /// Payloads placed on outbound queues
    pub payloads_delivered: u64,
    /// Connections evicted because their queue was full
    pub evictions: u64,
}
