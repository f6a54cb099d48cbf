//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Allocate a port and resolve the target identity
//! - Bind the long-lived listener on the allocated port
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and maps to an exit code
//! - Identity is resolved exactly once, after the port is known

use std::net::SocketAddrV4;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{validate_config, TargetConfig, ValidationError};
use crate::identity::ServerIdentity;
use crate::net::{PortAllocator, PortError};

/// Exit status for invalid input (bad port argument or config).
pub const EXIT_USAGE: u8 = 2;

/// Exit status when no port in the probed range was free.
pub const EXIT_NO_PORT: u8 = 3;

/// Exit status for listener bind or serve failures.
pub const EXIT_SERVE: u8 = 1;

/// Fatal errors raised before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", join(.0))]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddrV4,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl StartupError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Config(_) => EXIT_USAGE,
            StartupError::Port(_) => EXIT_NO_PORT,
            StartupError::Bind { .. } | StartupError::Serve(_) => EXIT_SERVE,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The port and identity one process serves under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub identity: ServerIdentity,
    pub port: u16,
}

impl Target {
    pub fn new(port: u16) -> Self {
        Self {
            identity: ServerIdentity::resolve(port),
            port,
        }
    }
}

/// Validate `config`, then allocate a port and resolve its identity.
pub fn prepare(config: &TargetConfig) -> Result<Target, StartupError> {
    validate_config(config).map_err(StartupError::Config)?;

    let listener = &config.listener;
    let allocator = PortAllocator::new(listener.host, listener.max_attempts);
    let port = allocator.allocate(listener.start_port)?;
    let target = Target::new(port);

    tracing::info!(
        start_port = listener.start_port,
        port = target.port,
        server = %target.identity,
        "Port allocated"
    );

    Ok(target)
}

/// Bind the serving listener for `target` on the configured host.
pub async fn bind(config: &TargetConfig, target: &Target) -> Result<TcpListener, StartupError> {
    let addr = SocketAddrV4::new(config.listener.host, target.port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(address = %addr, "Listening for connections");
    Ok(listener)
}
