//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! CLI starting port
//!     → schema.rs (TargetConfig with defaults for everything else)
//!     → validation.rs (semantic checks)
//!     → TargetConfig (validated, immutable)
//!     → read by startup and copied into request state
//! ```
//!
//! # Design Decisions
//! - Only the starting port is externally supplied; the rest are fixed defaults
//! - Config is immutable once startup begins
//! - Validation reports every problem at once

pub mod schema;
pub mod validation;

pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, TargetConfig, TimeoutConfig,
    DEFAULT_START_PORT,
};
pub use validation::{validate_config, ValidationError};
