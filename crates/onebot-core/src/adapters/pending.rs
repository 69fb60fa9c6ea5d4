//! Correlation broker: the pending-call registry and its wait/resolve
//! protocol.
//!
//! Flow:
//! 1. Caller calls `register()` and gets a [`PendingReply`] holding a fresh
//!    correlation ID and the receiving half of a oneshot slot
//! 2. Caller sends the request with that ID in its `echo` field
//! 3. The dispatcher calls `resolve()` when the matching response arrives
//! 4. Caller awaits the reply with `await_reply()` until the wait bound
//!
//! `resolve` and the timeout path both finish by removing the entry from
//! the map. Whichever removes it first decides the outcome; the other is
//! a no-op. Later frames with the same ID find nothing and are dropped.

use crate::domain::config::BrokerConfig;
use crate::domain::correlation::CorrelationId;
use crate::domain::error::{CallError, CallResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// A call waiting for its response
struct PendingCall {
    /// Single-slot completion handle
    sender: oneshot::Sender<Value>,
    /// When the call was registered
    registered_at: Instant,
    /// Action tag (for logging)
    action: String,
}

type PendingMap = DashMap<CorrelationId, PendingCall>;

/// Deadline used when `registered_at + timeout` is not representable
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Lifetime counters for the broker
#[derive(Debug, Default)]
pub struct BrokerStats {
    /// Calls registered
    pub total_registered: AtomicU64,
    /// Calls that received their response
    pub total_resolved: AtomicU64,
    /// Calls that hit the wait bound or were swept
    pub total_timeouts: AtomicU64,
    /// Calls whose waiter went away before an outcome
    pub total_abandoned: AtomicU64,
    /// Responses with no matching pending call
    pub total_unmatched: AtomicU64,
}

/// Point-in-time copy of the broker statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub pending: usize,
    pub registered: u64,
    pub resolved: u64,
    pub timeouts: u64,
    pub abandoned: u64,
    pub unmatched: u64,
}

/// Receiving side of one registered call.
///
/// Dropping it without awaiting removes the registry entry.
pub struct PendingReply {
    id: CorrelationId,
    action: String,
    registered_at: Instant,
    receiver: oneshot::Receiver<Value>,
    pending: Arc<PendingMap>,
    stats: Arc<BrokerStats>,
}

impl PendingReply {
    pub fn correlation_id(&self) -> CorrelationId {
        self.id
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn registered_at(&self) -> Instant {
        self.registered_at
    }

    /// Wait until `registered_at + timeout` for the payload.
    async fn wait(mut self, timeout: Duration) -> CallResult<Value> {
        let deadline = self
            .registered_at
            .checked_add(timeout)
            .unwrap_or_else(|| self.registered_at + FAR_FUTURE);

        match tokio::time::timeout_at(deadline, &mut self.receiver).await {
            Ok(Ok(payload)) => Ok(payload),
            // Sender dropped: the sweeper expired this entry
            Ok(Err(_)) => Err(self.timeout_error(timeout)),
            Err(_) => {
                if self.pending.remove(&self.id).is_some() {
                    self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        correlation_id = %self.id,
                        action = %self.action,
                        timeout_ms = timeout.as_millis() as u64,
                        "API call timed out"
                    );
                    Err(self.timeout_error(timeout))
                } else {
                    // A resolver removed the entry first; its send is in flight
                    (&mut self.receiver)
                        .await
                        .map_err(|_| self.timeout_error(timeout))
                }
            }
        }
    }

    fn timeout_error(&self, timeout: Duration) -> CallError {
        CallError::Timeout {
            correlation_id: self.id,
            action: self.action.clone(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        if self.pending.remove(&self.id).is_some() {
            self.stats.total_abandoned.fetch_add(1, Ordering::Relaxed);
            debug!(
                correlation_id = %self.id,
                action = %self.action,
                "Pending reply dropped before an outcome"
            );
        }
    }
}

/// Pending-call registry shared by every caller of one client.
pub struct CorrelationBroker {
    /// Map of correlation ID to pending call
    pending: Arc<PendingMap>,
    /// Wait bound used by callers that do not pass their own
    default_timeout: Duration,
    /// Statistics
    stats: Arc<BrokerStats>,
}

impl CorrelationBroker {
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            default_timeout,
            stats: Arc::new(BrokerStats::default()),
        }
    }

    pub fn from_config(config: &BrokerConfig) -> Self {
        Self::new(config.api_timeout())
    }

    /// Mint a correlation ID and register a pending call under it.
    pub fn register(&self, action: &str) -> PendingReply {
        let (tx, rx) = oneshot::channel();
        let registered_at = Instant::now();

        let id = loop {
            let candidate = CorrelationId::new();
            match self.pending.entry(candidate) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(PendingCall {
                        sender: tx,
                        registered_at,
                        action: action.to_string(),
                    });
                    break candidate;
                }
            }
        };
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);

        debug!(correlation_id = %id, action = action, "Registered pending call");

        PendingReply {
            id,
            action: action.to_string(),
            registered_at,
            receiver: rx,
            pending: Arc::clone(&self.pending),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Deliver `payload` to the call registered under `id`.
    ///
    /// Returns false, and does nothing else, when no such call is pending.
    pub fn resolve(&self, id: CorrelationId, payload: Value) -> bool {
        let Some((_, call)) = self.pending.remove(&id) else {
            self.stats.total_unmatched.fetch_add(1, Ordering::Relaxed);
            debug!(
                correlation_id = %id,
                "Response for unknown, resolved or expired correlation ID"
            );
            return false;
        };

        let elapsed = call.registered_at.elapsed();
        match call.sender.send(payload) {
            Ok(()) => {
                self.stats.total_resolved.fetch_add(1, Ordering::Relaxed);
                debug!(
                    correlation_id = %id,
                    action = %call.action,
                    response_time_ms = elapsed.as_millis() as u64,
                    "Resolved pending call"
                );
                true
            }
            Err(_) => {
                self.stats.total_abandoned.fetch_add(1, Ordering::Relaxed);
                debug!(
                    correlation_id = %id,
                    action = %call.action,
                    "Pending call waiter already gone"
                );
                false
            }
        }
    }

    /// Suspend until the reply arrives or `timeout` (counted from
    /// registration) elapses. Exactly one of the two outcomes is produced.
    pub async fn await_reply(&self, reply: PendingReply, timeout: Duration) -> CallResult<Value> {
        reply.wait(timeout).await
    }

    /// Remove registrations older than `max_age`.
    ///
    /// Their waiters, if any, observe a timeout. Returns the number removed.
    pub fn remove_expired(&self, max_age: Duration) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.pending.retain(|id, call| {
            let elapsed = now.saturating_duration_since(call.registered_at);
            if elapsed > max_age {
                warn!(
                    correlation_id = %id,
                    action = %call.action,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Removing expired pending call"
                );
                self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
                removed += 1;
                false
            } else {
                true
            }
        });

        removed
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Number of calls currently waiting
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: &CorrelationId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn stats(&self) -> &BrokerStats {
        &self.stats
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pending: self.pending_count(),
            registered: self.stats.total_registered.load(Ordering::Relaxed),
            resolved: self.stats.total_resolved.load(Ordering::Relaxed),
            timeouts: self.stats.total_timeouts.load(Ordering::Relaxed),
            abandoned: self.stats.total_abandoned.load(Ordering::Relaxed),
            unmatched: self.stats.total_unmatched.load(Ordering::Relaxed),
        }
    }
}

/// Background task sweeping registrations nobody is awaiting
pub async fn sweep_task(broker: Arc<CorrelationBroker>, interval: Duration, max_age: Duration) {
    let mut sweep_interval = tokio::time::interval(interval);
    sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        sweep_interval.tick().await;
        let removed = broker.remove_expired(max_age);
        if removed > 0 {
            debug!(removed = removed, "Swept expired pending calls");
        }
    }
}
