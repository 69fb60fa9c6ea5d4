#![allow(missing_docs)]

//! OneBot Core - shares one persistent connection across many concurrent API calls.
//!
//! Every call-mode request carries a fresh correlation ID in its `echo`
//! field. The host copies it back onto the response, and the broker wakes
//! exactly the caller that is waiting on it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          ONEBOT CORE                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   caller A   caller B   caller C        (typed API operations)   │
//! │      │          │          │                                     │
//! │  ┌───┴──────────┴──────────┴───┐                                 │
//! │  │          ApiCaller          │  register → send → await        │
//! │  └───────┬──────────────┬──────┘                                 │
//! │          │              │                                        │
//! │  ┌───────┴───────┐  ┌───┴──────────────────┐                     │
//! │  │ Connection    │  │  CorrelationBroker   │                     │
//! │  │ Registry      │  │  id → oneshot sender │                     │
//! │  └───────┬───────┘  └───┬──────────────────┘                     │
//! │          │              │ resolve                                │
//! │          │        ┌─────┴──────────────┐                         │
//! │          │        │ ResponseDispatcher │                         │
//! │          │        └─────┬──────────────┘                         │
//! └──────────┼──────────────┼────────────────────────────────────────┘
//!            ▼              │
//!        transport ─────────┘  (one connection, frames in both directions)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use onebot_core::{ApiCaller, CorrelationBroker, InMemoryConnectionRegistry, RequestEnvelope};
//!
//! let broker = Arc::new(CorrelationBroker::new(Duration::from_secs(5)));
//! let registry = Arc::new(InMemoryConnectionRegistry::new());
//! let connection = registry.connect(transport);
//! let caller = ApiCaller::new(broker, registry);
//!
//! let response = caller.call(connection, RequestEnvelope::bare("get_status")).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::{
    channel_transport, spawn_reference_peer, sweep_task, BrokerStats, ChannelTransport,
    CorrelationBroker, InMemoryConnectionRegistry, PeerReply, PendingReply, StatsSnapshot,
};
pub use domain::{
    codes, extract_echo, BaseResult, BrokerConfig, CallError, CallResult, ConfigError,
    ConnectionId, CorrelationId, PermissiveFields, RequestEnvelope, ResponseEnvelope, ECHO_FIELD,
};
pub use ipc::{classify, ApiCaller, FrameKind, ResponseDispatcher, ResponseListener};
pub use ports::{ConnectionRegistry, TransportError, TransportHandle};
