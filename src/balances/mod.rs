// src/balances/mod.rs

//! Public entry points, each built as a task graph.
//!
//! Both graphs start the same way: `credentials` resolves the node's
//! credentials and `session` connects to it. The fetches that only need the
//! session then run concurrently, and the derived tasks run once their
//! inputs are ready. The graph's output task is named explicitly when it is
//! executed.

pub mod data;
pub mod get_balance;
pub mod get_liquidity;

pub use data::NodeData;
pub use get_balance::{BalanceOptions, BalanceReport, balance_graph, get_balance};
pub use get_liquidity::{LiquidityOptions, LiquidityReport, get_liquidity, liquidity_graph};

use anyhow::Context;

use crate::dag::TaskGraph;
use crate::node::NodeAccess;

pub(crate) const CREDENTIALS: &str = "credentials";
pub(crate) const SESSION: &str = "session";

/// Add the `credentials` and `session` tasks shared by every graph.
pub(crate) fn add_session_tasks(graph: &mut TaskGraph<NodeData>, access: &NodeAccess, node: Option<String>) {
    let provider = access.credentials.clone();
    graph.add_task(CREDENTIALS, move |_| {
        let provider = provider.clone();
        let node = node.clone();
        async move {
            let credentials = provider
                .credentials(node.as_deref())
                .with_context(|| match node.as_deref() {
                    Some(name) => format!("resolving credentials for node '{name}'"),
                    None => "resolving credentials for the default node".to_string(),
                })?;
            Ok(NodeData::Credentials(credentials))
        }
    });

    let connector = access.connector.clone();
    graph.add_task_after(SESSION, &[CREDENTIALS], move |inputs| {
        let connector = connector.clone();
        async move {
            let credentials = inputs.get(CREDENTIALS)?.as_credentials()?;
            let session = connector.connect(credentials)?;
            Ok(NodeData::Session(session))
        }
    });
}
