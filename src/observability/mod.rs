//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup and every request produce:
//!     → logging.rs (structured tracing events, stderr)
//!     → diagnostics.rs (human-readable blocks, stdout)
//!
//! Consumers:
//!     → Developers reading the terminal
//!     → Test harnesses scraping stdout of a spawned target
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so stdout holds only the diagnostic stream
//! - Diagnostic emission is best-effort and never fails a request
//! - Sinks are pluggable so in-process harnesses can capture output

pub mod diagnostics;
pub mod logging;

pub use diagnostics::{DiagnosticSink, MemorySink, RequestRecord, StartupBanner, StdoutSink};
