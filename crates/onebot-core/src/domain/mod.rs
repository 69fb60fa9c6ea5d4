//! Domain types for the correlation core.
//!
//! Identifiers, wire envelopes, field decoding policy, configuration and
//! errors. Nothing in here performs I/O or holds shared state.

pub mod config;
pub mod connection;
pub mod correlation;
pub mod envelope;
pub mod error;
pub mod fields;

pub use config::BrokerConfig;
pub use connection::ConnectionId;
pub use correlation::CorrelationId;
pub use envelope::{extract_echo, BaseResult, RequestEnvelope, ResponseEnvelope, ECHO_FIELD};
pub use error::{codes, CallError, CallResult, ConfigError};
pub use fields::PermissiveFields;
