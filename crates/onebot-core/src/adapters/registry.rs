//! In-memory connection registry.

use crate::domain::connection::ConnectionId;
use crate::ports::outbound::{ConnectionRegistry, TransportHandle};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Connection registry backed by a concurrent map.
///
/// The transport layer inserts and removes entries as connections come
/// and go; callers only see it through [`ConnectionRegistry::lookup`].
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: DashMap<ConnectionId, Arc<dyn TransportHandle>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transport under a fresh connection ID
    pub fn connect(&self, handle: Arc<dyn TransportHandle>) -> ConnectionId {
        let id = ConnectionId::new();
        self.insert(id, handle);
        id
    }

    /// Register or replace the transport for `id`
    pub fn insert(&self, id: ConnectionId, handle: Arc<dyn TransportHandle>) {
        if self.connections.insert(id, handle).is_some() {
            debug!(connection = %id, "Replaced transport for connection");
        } else {
            debug!(connection = %id, "Connection registered");
        }
    }

    /// Forget a connection. Returns true if it was registered.
    pub fn remove(&self, id: &ConnectionId) -> bool {
        let removed = self.connections.remove(id).is_some();
        if removed {
            debug!(connection = %id, "Connection removed");
        }
        removed
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl ConnectionRegistry for InMemoryConnectionRegistry {
    fn lookup(&self, connection: &ConnectionId) -> Option<Arc<dyn TransportHandle>> {
        self.connections
            .get(connection)
            .map(|entry| Arc::clone(entry.value()))
    }
}
