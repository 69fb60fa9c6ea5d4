//! Outbound ports: the transport and the connection registry.
//!
//! Both are owned by the transport layer. The core only looks connections
//! up and pushes text frames through them; it never mutates the registry.

use crate::domain::connection::ConnectionId;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
}

/// A live, message-oriented connection to the OneBot host
#[async_trait]
pub trait TransportHandle: Send + Sync {
    /// Send one text frame
    async fn send(&self, frame: String) -> Result<(), TransportError>;
}

/// Read-only view of the live connections
pub trait ConnectionRegistry: Send + Sync {
    /// Find the transport for a connection, if it is still live
    fn lookup(&self, connection: &ConnectionId) -> Option<Arc<dyn TransportHandle>>;
}
