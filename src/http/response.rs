//! Response payload returned for every echoed request.

use serde::{Deserialize, Serialize};

use crate::http::request::IncomingRequest;
use crate::identity::ServerIdentity;

/// JSON body describing what a target observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    pub server: String,
    pub port: u16,
    /// Normalized path, always starting with `/`.
    pub endpoint: String,
    pub x_user_id: String,
    /// Raw path segment as captured, empty for the root.
    pub path: String,
}

impl EchoResponse {
    /// Describe `request` as seen by the target `identity` on `port`.
    pub fn describe(identity: &ServerIdentity, port: u16, request: &IncomingRequest) -> Self {
        Self {
            server: identity.to_string(),
            port,
            endpoint: request.endpoint(),
            x_user_id: request.user_id_or_sentinel().to_string(),
            path: request.path.clone(),
        }
    }
}
