use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use balancedag::errors::Result;
use balancedag::node::{
    ChainBalance, ChannelBalance, Channels, Connector, Credentials, FetchFuture, NodeAccess,
    NodeClient, NodeSnapshot, PendingChainBalance, Session,
};

/// Which fetch a [`FakeNode`] call was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fetch {
    ChainBalance,
    ChannelBalance,
    Channels,
    PendingChainBalance,
}

/// A node client that:
/// - answers from an in-memory snapshot
/// - records which fetches were made
/// - can fail or delay individual fetches.
#[derive(Clone, Default)]
pub struct FakeNode {
    snapshot: NodeSnapshot,
    failures: HashMap<Fetch, String>,
    delays: HashMap<Fetch, Duration>,
    calls: Arc<Mutex<Vec<Fetch>>>,
}

impl FakeNode {
    pub fn new(snapshot: NodeSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    /// Make `fetch` fail with a transport-style error.
    pub fn failing(mut self, fetch: Fetch, message: &str) -> Self {
        self.failures.insert(fetch, message.to_string());
        self
    }

    /// Make `fetch` take `delay` before answering.
    pub fn delayed(mut self, fetch: Fetch, delay: Duration) -> Self {
        self.delays.insert(fetch, delay);
        self
    }

    /// Fetches made so far, in call order.
    pub fn calls(&self) -> Vec<Fetch> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, fetch: Fetch) -> usize {
        self.calls().iter().filter(|f| **f == fetch).count()
    }

    async fn answer<T>(&self, fetch: Fetch, value: T) -> anyhow::Result<T> {
        self.calls.lock().unwrap().push(fetch);

        if let Some(delay) = self.delays.get(&fetch) {
            tokio::time::sleep(*delay).await;
        }

        match self.failures.get(&fetch) {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(value),
        }
    }
}

impl NodeClient for FakeNode {
    fn chain_balance(&self) -> FetchFuture<'_, ChainBalance> {
        Box::pin(self.answer(Fetch::ChainBalance, self.snapshot.chain))
    }

    fn channel_balance(&self) -> FetchFuture<'_, ChannelBalance> {
        Box::pin(self.answer(Fetch::ChannelBalance, self.snapshot.channel))
    }

    fn channels(&self) -> FetchFuture<'_, Channels> {
        let channels = Channels {
            channels: self.snapshot.channels.clone(),
        };
        Box::pin(self.answer(Fetch::Channels, channels))
    }

    fn pending_chain_balance(&self) -> FetchFuture<'_, PendingChainBalance> {
        Box::pin(self.answer(Fetch::PendingChainBalance, self.snapshot.pending))
    }
}

/// Connector handing out a shared [`FakeNode`] and counting connections.
#[derive(Clone)]
pub struct FakeConnector {
    node: FakeNode,
    connects: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn new(node: FakeNode) -> Self {
        Self {
            node,
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for FakeConnector {
    fn connect(&self, _credentials: &Credentials) -> Result<Session> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.node.clone()))
    }
}

/// Credentials that never matter to a fake node.
pub fn fake_credentials() -> Credentials {
    Credentials {
        cert: None,
        macaroon: "00".to_string(),
        socket: "fake:10009".to_string(),
    }
}

/// [`NodeAccess`] wired to `node`.
pub fn fake_access(node: FakeNode) -> NodeAccess {
    NodeAccess::new(fake_credentials(), FakeConnector::new(node))
}
