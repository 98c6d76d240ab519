// src/balances/get_liquidity.rs

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::balances::{NodeData, SESSION, add_session_tasks};
use crate::calc::{LiquidityQuery, compute_balance, liquidity_tokens};
use crate::dag::TaskGraph;
use crate::errors::{BalanceError, Result};
use crate::exec::execute;
use crate::node::NodeAccess;

const GET_CHANNELS: &str = "get_channels";
const TOKENS: &str = "tokens";
const TOTAL: &str = "total";
const LIQUIDITY: &str = "liquidity";

/// Options for [`get_liquidity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LiquidityOptions {
    #[serde(default)]
    pub above: Option<i64>,
    #[serde(default)]
    pub below: Option<i64>,
    /// Outbound (local) instead of inbound (remote) liquidity.
    #[serde(default)]
    pub is_outbound: bool,
    /// Only the top (90th percentile) channel liquidity.
    #[serde(default)]
    pub is_top: bool,
    /// Only liquidity with this peer public key.
    #[serde(default, rename = "with")]
    pub with_peer: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
}

impl LiquidityOptions {
    pub fn query(&self) -> LiquidityQuery {
        LiquidityQuery {
            is_outbound: self.is_outbound,
            is_top: self.is_top,
            with_peer: self.with_peer.clone(),
            above: self.above,
            below: self.below,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityReport {
    pub balance: i64,
}

/// Get the node's available channel liquidity.
pub async fn get_liquidity(
    options: &LiquidityOptions,
    access: &NodeAccess,
) -> Result<LiquidityReport> {
    info!(
        node = options.node.as_deref(),
        outbound = options.is_outbound,
        top = options.is_top,
        with = options.with_peer.as_deref(),
        "computing liquidity"
    );

    execute(liquidity_graph(options, access), LIQUIDITY)
        .await?
        .into_liquidity()
        .map_err(|e| BalanceError::Calculation(e.to_string()))
}

/// Task graph behind [`get_liquidity`]; its output task is `liquidity`.
pub fn liquidity_graph(options: &LiquidityOptions, access: &NodeAccess) -> TaskGraph<NodeData> {
    let mut graph: TaskGraph<NodeData> = TaskGraph::new();
    add_session_tasks(&mut graph, access, options.node.clone());

    graph.add_task_after(GET_CHANNELS, &[SESSION], |inputs| async move {
        let session = inputs.get(SESSION)?.as_session()?;
        Ok(NodeData::Channels(session.channels().await?))
    });

    // List of tokens to sum.
    let query = options.query();
    graph.add_task_after(TOKENS, &[GET_CHANNELS], move |inputs| {
        let query = query.clone();
        async move {
            let channels = inputs.get(GET_CHANNELS)?.as_channels()?;
            Ok(NodeData::Tokens(liquidity_tokens(&channels.channels, &query)?))
        }
    });

    let (above, below) = (options.above, options.below);
    graph.add_task_after(TOTAL, &[TOKENS], move |inputs| async move {
        let tokens = inputs.get(TOKENS)?.as_tokens()?;
        let total = compute_balance(tokens, above, below)
            .context("calculating liquidity balance")?;
        Ok(NodeData::Amount(total))
    });

    graph.add_task_after(LIQUIDITY, &[TOTAL], |inputs| async move {
        let balance = inputs.get(TOTAL)?.as_amount()?;
        Ok(NodeData::Liquidity(LiquidityReport { balance }))
    });

    graph
}
