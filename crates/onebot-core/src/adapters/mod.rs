//! Adapters for the correlation core.
//!
//! The broker itself plus in-memory implementations of the outbound ports.

pub mod channel;
pub mod pending;
pub mod registry;

pub use channel::{channel_transport, spawn_reference_peer, ChannelTransport, PeerReply};
pub use pending::{sweep_task, BrokerStats, CorrelationBroker, PendingReply, StatsSnapshot};
pub use registry::InMemoryConnectionRegistry;
