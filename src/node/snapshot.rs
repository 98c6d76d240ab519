// src/node/snapshot.rs

//! A [`NodeClient`] backed by a JSON snapshot of node responses.
//!
//! The credentials' `socket` is interpreted as the path of the snapshot
//! file. The file is only read when a fetch runs, so connecting stays free
//! of IO.
//!
//! ```json
//! {
//!   "chain_balance": 1000,
//!   "channel_balance": 500,
//!   "pending_balance": 0,
//!   "pending_chain_balance": 0,
//!   "channels": [ { "is_active": true, "is_partner_initiated": false, ... } ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use crate::errors::{BalanceError, Result};
use crate::node::client::{Connector, FetchFuture, NodeClient, Session};
use crate::node::credentials::Credentials;
use crate::node::types::{ChainBalance, ChannelBalance, Channels, NodeSnapshot, PendingChainBalance};

#[derive(Debug, Clone, Default)]
pub struct SnapshotConnector;

impl Connector for SnapshotConnector {
    fn connect(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.socket.trim().is_empty() {
            return Err(BalanceError::Configuration(
                "snapshot socket must name a file".to_string(),
            ));
        }
        Ok(Arc::new(SnapshotClient::new(&credentials.socket)))
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotClient {
    path: PathBuf,
}

impl SnapshotClient {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> anyhow::Result<NodeSnapshot> {
        debug!(path = %self.path.display(), "reading node snapshot");
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading node snapshot {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&contents)
            .with_context(|| format!("parsing node snapshot {}", self.path.display()))?;
        Ok(snapshot)
    }
}

impl NodeClient for SnapshotClient {
    fn chain_balance(&self) -> FetchFuture<'_, ChainBalance> {
        Box::pin(async move { Ok(self.load().await?.chain) })
    }

    fn channel_balance(&self) -> FetchFuture<'_, ChannelBalance> {
        Box::pin(async move { Ok(self.load().await?.channel) })
    }

    fn channels(&self) -> FetchFuture<'_, Channels> {
        Box::pin(async move {
            Ok(Channels {
                channels: self.load().await?.channels,
            })
        })
    }

    fn pending_chain_balance(&self) -> FetchFuture<'_, PendingChainBalance> {
        Box::pin(async move { Ok(self.load().await?.pending) })
    }
}
