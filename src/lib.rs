//! Self-identifying HTTP echo target for reverse-proxy integration tests.
//!
//! Each process picks a free loopback port, derives a stable identity from
//! it, and answers every request with a JSON description of what it saw.

pub mod config;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::TargetConfig;
pub use http::{EchoResponse, EchoServer};
pub use identity::ServerIdentity;
pub use lifecycle::{Shutdown, StartupError, Target};
