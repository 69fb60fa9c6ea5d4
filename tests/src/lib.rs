//! # OneBot Link Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Loopback harness shared by the flows
//! └── integration/      # Cross-crate flows over a shared connection
//!     ├── broker_flows.rs
//!     └── api_flows.rs
//! tests/benches/
//! └── broker_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p onebot-tests
//! cargo test -p onebot-tests integration::broker_flows
//! cargo bench -p onebot-tests
//! ```

pub mod fixtures;
pub mod integration;
