//! HTTP server setup and the echo handler.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown is signalled
//! - Describe every request back to the caller and to the diagnostic sink

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Uri},
    routing::any,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TargetConfig;
use crate::http::request::{path_segment, IncomingRequest};
use crate::http::response::EchoResponse;
use crate::identity::ServerIdentity;
use crate::lifecycle::startup::Target;
use crate::observability::diagnostics::{DiagnosticSink, RequestRecord};

/// Process-level values injected into every handler invocation.
///
/// Fixed at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub identity: ServerIdentity,
    pub port: u16,
    pub body_limit: usize,
    pub diagnostics: Arc<dyn DiagnosticSink>,
}

/// HTTP server for one echo target.
pub struct EchoServer {
    router: Router,
    identity: ServerIdentity,
}

impl EchoServer {
    /// Create a server that writes diagnostics to `diagnostics`.
    pub fn with_diagnostics(
        config: &TargetConfig,
        target: &Target,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let state = AppState {
            identity: target.identity.clone(),
            port: target.port,
            body_limit: config.limits.body_limit_bytes,
            diagnostics,
        };

        Self {
            router: Self::build_router(config, state),
            identity: target.identity.clone(),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &TargetConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            server = %self.identity,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(server = %self.identity, "HTTP server stopped");
        Ok(())
    }
}

/// Echo handler registered for every method on every path.
async fn echo_handler(
    State(state): State<AppState>,
    uri: Uri,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Json<EchoResponse> {
    let path = path_segment(uri.path());
    let request = IncomingRequest::extract(method, path, &headers, body, state.body_limit).await;
    let endpoint = request.endpoint();

    tracing::debug!(
        server = %state.identity,
        method = %request.method,
        endpoint = %endpoint,
        x_user_id = %request.user_id_or_sentinel(),
        has_payload = request.payload.is_some(),
        "Echoing request"
    );

    let record = RequestRecord {
        identity: &state.identity,
        port: state.port,
        method: &request.method,
        endpoint: &endpoint,
        user_id: request.user_id_or_sentinel(),
        payload: request.payload.as_deref(),
    };
    state.diagnostics.emit(&record.to_string());

    Json(EchoResponse::describe(&state.identity, state.port, &request))
}
