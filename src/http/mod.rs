//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (tokio listener on loopback)
//!     → server.rs (Axum router, middleware, catch-all handler)
//!     → request.rs (session header, endpoint, POST payload)
//!     → observability::diagnostics (human-readable block)
//!     → response.rs (JSON description of the request)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{IncomingRequest, BODY_READ_ERROR, USER_ID_NOT_SET, X_USER_ID};
pub use response::EchoResponse;
pub use server::{AppState, EchoServer};
