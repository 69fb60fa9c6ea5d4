//! Ports consumed by the correlation core.

pub mod outbound;

pub use outbound::{ConnectionRegistry, TransportError, TransportHandle};
