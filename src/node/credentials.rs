// src/node/credentials.rs

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// What is needed to open a session with a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// TLS certificate; optional for nodes with a publicly trusted cert.
    #[serde(default)]
    pub cert: Option<String>,
    pub macaroon: String,
    pub socket: String,
}

/// Resolves credentials for a node, by name or for the default node.
pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self, node: Option<&str>) -> Result<Credentials>;
}

impl CredentialsProvider for Credentials {
    /// A fixed set of credentials serves any node name.
    fn credentials(&self, _node: Option<&str>) -> Result<Credentials> {
        Ok(self.clone())
    }
}
