//! Request inspection.
//!
//! # Responsibilities
//! - Extract the session header, substituting a sentinel when absent
//! - Normalize the captured path into an endpoint
//! - Read POST bodies as text, substituting a placeholder on any failure
//!
//! # Design Decisions
//! - Nothing here returns an error; malformed input degrades to placeholders
//! - Non-POST bodies are never read

use axum::body::{self, Body};
use axum::http::{HeaderMap, Method};
use percent_encoding::percent_decode_str;

/// Session header consulted on every request (matched case-insensitively).
pub const X_USER_ID: &str = "x-user-id";

/// Reported user id when [`X_USER_ID`] is missing.
pub const USER_ID_NOT_SET: &str = "NOT_SET";

/// Payload reported when a POST body cannot be read or decoded.
pub const BODY_READ_ERROR: &str = "<error reading body>";

/// Transient view of one request, built at the start of handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    pub method: Method,
    /// Path segment after the leading `/`, empty for the root.
    pub path: String,
    pub user_id: Option<String>,
    /// Decoded POST body; `None` for other methods and empty bodies.
    pub payload: Option<String>,
}

impl IncomingRequest {
    /// Build the view, reading at most `body_limit` bytes of a POST body.
    pub async fn extract(
        method: Method,
        path: String,
        headers: &HeaderMap,
        body: Body,
        body_limit: usize,
    ) -> Self {
        let payload = if method == Method::POST {
            read_payload(body, body_limit).await
        } else {
            None
        };

        Self {
            user_id: user_id(headers),
            method,
            path,
            payload,
        }
    }

    pub fn endpoint(&self) -> String {
        endpoint_for(&self.path)
    }

    pub fn user_id_or_sentinel(&self) -> &str {
        self.user_id.as_deref().unwrap_or(USER_ID_NOT_SET)
    }
}

/// Value of the session header, decoded lossily if it is not valid UTF-8.
pub fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_USER_ID)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// Segment after the leading `/` of a request path, percent-decoded.
///
/// Bytes that do not decode to UTF-8 become U+FFFD instead of rejecting
/// the request.
pub fn path_segment(uri_path: &str) -> String {
    let raw = uri_path.strip_prefix('/').unwrap_or(uri_path);
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// `"/"` for the root, otherwise the segment with a leading slash.
pub fn endpoint_for(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", path)
    }
}

/// Read a body as UTF-8 text. Empty bodies yield `None`.
pub async fn read_payload(body: Body, limit: usize) -> Option<String> {
    let bytes = match body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read request body");
            return Some(BODY_READ_ERROR.to_string());
        }
    };

    if bytes.is_empty() {
        return None;
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(error = %e, "Request body is not valid UTF-8");
            Some(BODY_READ_ERROR.to_string())
        }
    }
}
