//! Server identity derived from the bound port.
//!
//! The first two default targets get mnemonic names so harness assertions
//! read naturally (`api-a`, `api-b`); every other port falls back to
//! `api-<port>`.

use std::fmt;
use std::sync::Arc;

/// Ports with a fixed mnemonic identity.
const WELL_KNOWN_TARGETS: [(u16, &str); 2] = [(9001, "api-a"), (9002, "api-b")];

/// Identity reported by a target in every response.
///
/// Resolved once at startup and shared read-only by all handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerIdentity(Arc<str>);

impl ServerIdentity {
    /// Map a bound port to its identity. Pure and deterministic.
    pub fn resolve(port: u16) -> Self {
        let name = WELL_KNOWN_TARGETS
            .iter()
            .find(|(known, _)| *known == port)
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| format!("api-{}", port));
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
