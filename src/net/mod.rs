//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Starting port
//!     → port.rs (bind probe start_port, start_port+1, ...)
//!     → first free port, or PortError::Exhausted
//!     → handed to lifecycle::startup for the real bind
//! ```
//!
//! # Design Decisions
//! - Loopback only; targets are never reachable from other hosts
//! - Bounded probing: no retries beyond max_attempts

pub mod port;

pub use port::{PortAllocator, PortError};
