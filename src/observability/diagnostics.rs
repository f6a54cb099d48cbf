//! Human-readable diagnostic output.
//!
//! # Responsibilities
//! - Render the per-request block (server, method, endpoint, user id, payload)
//! - Render the startup banner
//! - Deliver rendered blocks to a sink without ever failing the caller

use std::fmt;
use std::io::{self, Write};
use std::net::SocketAddrV4;
use std::sync::{Mutex, PoisonError};

use axum::http::Method;

use crate::identity::ServerIdentity;

const SEPARATOR: &str = "============================================================";

/// Destination for diagnostic blocks.
pub trait DiagnosticSink: Send + Sync {
    /// Deliver one rendered block. Must not panic or block indefinitely.
    fn emit(&self, block: &str);
}

/// Writes blocks to the process's standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn emit(&self, block: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", block).and_then(|_| out.flush()) {
            tracing::trace!(error = %e, "Diagnostic output unavailable");
        }
    }
}

/// Keeps blocks in memory, for in-process harnesses and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All blocks emitted so far, oldest first.
    pub fn blocks(&self) -> Vec<String> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Everything emitted so far as one string.
    pub fn contents(&self) -> String {
        self.blocks().join("\n")
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, block: &str) {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(block.to_string());
    }
}

/// What one target observed about one request.
#[derive(Debug)]
pub struct RequestRecord<'a> {
    pub identity: &'a ServerIdentity,
    pub port: u16,
    pub method: &'a Method,
    pub endpoint: &'a str,
    pub user_id: &'a str,
    pub payload: Option<&'a str>,
}

impl fmt::Display for RequestRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Server: {} (listening on port {})", self.identity, self.port)?;
        writeln!(f, "Method: {}", self.method)?;
        writeln!(f, "Endpoint: {}", self.endpoint)?;
        writeln!(f, "X-User-Id: {}", self.user_id)?;
        if let Some(payload) = self.payload.filter(|p| !p.is_empty()) {
            writeln!(f, "Payload: {}", payload)?;
        }
        writeln!(f, "{}", SEPARATOR)
    }
}

/// Announcement printed once the listener is bound.
///
/// Harnesses spawning the binary wait for the `Listening on` line.
#[derive(Debug)]
pub struct StartupBanner<'a> {
    pub identity: &'a ServerIdentity,
    pub addr: SocketAddrV4,
}

impl fmt::Display for StartupBanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Starting {} server on port {}", self.identity, self.addr.port())?;
        writeln!(f, "Listening on http://{}", self.addr)?;
        writeln!(f, "{}", SEPARATOR)
    }
}
