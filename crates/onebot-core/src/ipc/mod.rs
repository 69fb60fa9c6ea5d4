//! Request/response plumbing between callers, the broker and the transport.

pub mod dispatcher;
pub mod handler;

pub use dispatcher::{classify, FrameKind, ResponseDispatcher, ResponseListener};
pub use handler::ApiCaller;
