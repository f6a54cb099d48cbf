//! Echo target binary.
//!
//! ```text
//! echo-target [PORT]
//!     → probe PORT, PORT+1, ... on 127.0.0.1
//!     → identity from the first free port (9001 → api-a, 9002 → api-b)
//!     → serve until SIGINT/SIGTERM
//! ```

use std::net::SocketAddrV4;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};

use echo_target::config::{TargetConfig, DEFAULT_START_PORT};
use echo_target::lifecycle::startup::{self, EXIT_USAGE};
use echo_target::lifecycle::{signals, Shutdown, StartupError};
use echo_target::observability::{logging, DiagnosticSink, StartupBanner, StdoutSink};
use echo_target::EchoServer;

#[derive(Parser)]
#[command(name = "echo-target", version)]
#[command(about = "Self-identifying HTTP echo backend for reverse-proxy tests", long_about = None)]
struct Cli {
    /// First port to try; later ports are probed if it is taken
    #[arg(value_parser = clap::value_parser!(u16).range(1..), default_value_t = DEFAULT_START_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            if !err.use_stderr() {
                return ExitCode::SUCCESS;
            }
            // Value errors omit the usage line; callers rely on seeing it.
            if !err.render().to_string().contains("Usage:") {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let config = TargetConfig::with_start_port(cli.port);
    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        start_port = config.listener.start_port,
        max_attempts = config.listener.max_attempts,
        "echo-target starting"
    );

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Startup failed");
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(config: TargetConfig) -> Result<(), StartupError> {
    let target = startup::prepare(&config)?;
    let listener = startup::bind(&config, &target).await?;

    let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(StdoutSink);
    let banner = StartupBanner {
        identity: &target.identity,
        addr: SocketAddrV4::new(config.listener.host, target.port),
    };
    diagnostics.emit(&banner.to_string());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    EchoServer::with_diagnostics(&config, &target, diagnostics)
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
