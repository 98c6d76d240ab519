// src/node/client.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::Result;
use crate::node::credentials::{Credentials, CredentialsProvider};
use crate::node::types::{ChainBalance, ChannelBalance, Channels, PendingChainBalance};

/// Boxed future returned by the fetch operations.
pub type FetchFuture<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'a>>;

/// The remote data operations a balance calculation needs.
///
/// Each fetch may fail with a transport-level error; when run inside a task
/// graph that failure is reported against the fetch task's name.
pub trait NodeClient: Send + Sync {
    fn chain_balance(&self) -> FetchFuture<'_, ChainBalance>;

    fn channel_balance(&self) -> FetchFuture<'_, ChannelBalance>;

    fn channels(&self) -> FetchFuture<'_, Channels>;

    fn pending_chain_balance(&self) -> FetchFuture<'_, PendingChainBalance>;
}

/// Shared handle to a connected node.
pub type Session = Arc<dyn NodeClient>;

/// Builds a [`Session`] from credentials.
///
/// Connecting is lazy: implementations must not perform network IO here.
pub trait Connector: Send + Sync {
    fn connect(&self, credentials: &Credentials) -> Result<Session>;
}

/// The pair of collaborators the public entry points need.
#[derive(Clone)]
pub struct NodeAccess {
    pub credentials: Arc<dyn CredentialsProvider>,
    pub connector: Arc<dyn Connector>,
}

impl NodeAccess {
    pub fn new(
        credentials: impl CredentialsProvider + 'static,
        connector: impl Connector + 'static,
    ) -> Self {
        Self {
            credentials: Arc::new(credentials),
            connector: Arc::new(connector),
        }
    }
}
