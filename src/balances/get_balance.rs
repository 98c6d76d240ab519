// src/balances/get_balance.rs

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::balances::{NodeData, SESSION, add_session_tasks};
use crate::calc::{compute_balance, future_commit_fees};
use crate::dag::TaskGraph;
use crate::errors::{BalanceError, Result};
use crate::exec::execute;
use crate::node::{ChainBalance, ChannelBalance, NodeAccess, PendingChainBalance};

const GET_CHAIN_BALANCE: &str = "get_chain_balance";
const GET_CHANNEL_BALANCE: &str = "get_channel_balance";
const GET_CHANNELS: &str = "get_channels";
const GET_PENDING: &str = "get_pending";
const FUTURE_COMMIT_FEES: &str = "future_commit_fees";
const BALANCE: &str = "balance";

/// Options for [`get_balance`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BalanceOptions {
    /// The total must be strictly above this.
    #[serde(default)]
    pub above: Option<i64>,
    /// The total must be strictly below this.
    #[serde(default)]
    pub below: Option<i64>,
    /// Count only off-chain (channel) funds.
    #[serde(default)]
    pub is_offchain_only: bool,
    /// Count only on-chain funds.
    #[serde(default)]
    pub is_onchain_only: bool,
    /// Node to query; `None` selects the default node.
    #[serde(default)]
    pub node: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Total of the selected figures, after the bounds check.
    pub balance: i64,
    /// Channel balance minus future commit fees.
    pub channel_balance: i64,
}

/// Get the node's total balance.
pub async fn get_balance(options: &BalanceOptions, access: &NodeAccess) -> Result<BalanceReport> {
    info!(
        node = options.node.as_deref(),
        offchain_only = options.is_offchain_only,
        onchain_only = options.is_onchain_only,
        "computing balance"
    );

    execute(balance_graph(options, access), BALANCE)
        .await?
        .into_balance()
        .map_err(|e| BalanceError::Calculation(e.to_string()))
}

/// Task graph behind [`get_balance`]; its output task is `balance`.
pub fn balance_graph(options: &BalanceOptions, access: &NodeAccess) -> TaskGraph<NodeData> {
    let mut graph: TaskGraph<NodeData> = TaskGraph::new();
    add_session_tasks(&mut graph, access, options.node.clone());

    graph.add_task_after(GET_CHAIN_BALANCE, &[SESSION], |inputs| async move {
        let session = inputs.get(SESSION)?.as_session()?;
        Ok(NodeData::ChainBalance(session.chain_balance().await?))
    });

    graph.add_task_after(GET_CHANNEL_BALANCE, &[SESSION], |inputs| async move {
        let session = inputs.get(SESSION)?.as_session()?;
        Ok(NodeData::ChannelBalance(session.channel_balance().await?))
    });

    // Channels carry the initiator burden (commit fees).
    graph.add_task_after(GET_CHANNELS, &[SESSION], |inputs| async move {
        let session = inputs.get(SESSION)?.as_session()?;
        Ok(NodeData::Channels(session.channels().await?))
    });

    graph.add_task_after(GET_PENDING, &[SESSION], |inputs| async move {
        let session = inputs.get(SESSION)?.as_session()?;
        Ok(NodeData::PendingChainBalance(
            session.pending_chain_balance().await?,
        ))
    });

    graph.add_task_after(FUTURE_COMMIT_FEES, &[GET_CHANNELS], |inputs| async move {
        let channels = inputs.get(GET_CHANNELS)?.as_channels()?;
        Ok(NodeData::Amount(future_commit_fees(&channels.channels)?))
    });

    let opts = options.clone();
    graph.add_task_after(
        BALANCE,
        &[
            GET_CHAIN_BALANCE,
            GET_CHANNEL_BALANCE,
            GET_PENDING,
            FUTURE_COMMIT_FEES,
        ],
        move |inputs| {
            let opts = opts.clone();
            async move {
                let chain = inputs.get(GET_CHAIN_BALANCE)?.as_chain_balance()?;
                let channel = inputs.get(GET_CHANNEL_BALANCE)?.as_channel_balance()?;
                let pending = inputs.get(GET_PENDING)?.as_pending_chain_balance()?;
                let fees = inputs.get(FUTURE_COMMIT_FEES)?.as_amount()?;

                let report = balance_report(&opts, chain, channel, pending, fees)
                    .context("calculating balance total")?;
                Ok(NodeData::Balance(report))
            }
        },
    );

    graph
}

/// The figures summed into the total, zeroed per the on/off-chain filters.
///
/// Order: chain, channel, pending channel, pending chain, negated commit fees.
pub fn balance_candidates(
    options: &BalanceOptions,
    chain: &ChainBalance,
    channel: &ChannelBalance,
    pending: &PendingChainBalance,
    future_commit_fees: i64,
) -> [i64; 5] {
    let onchain = |v: i64| if options.is_offchain_only { 0 } else { v };
    let offchain = |v: i64| if options.is_onchain_only { 0 } else { v };

    [
        onchain(chain.chain_balance),
        offchain(channel.channel_balance),
        offchain(channel.pending_balance),
        onchain(pending.pending_chain_balance),
        offchain(-future_commit_fees),
    ]
}

/// Combine fetched figures into a [`BalanceReport`].
///
/// `channel_balance` is always net of future commit fees, whichever
/// filters are set.
pub fn balance_report(
    options: &BalanceOptions,
    chain: &ChainBalance,
    channel: &ChannelBalance,
    pending: &PendingChainBalance,
    future_commit_fees: i64,
) -> Result<BalanceReport> {
    let candidates = balance_candidates(options, chain, channel, pending, future_commit_fees);
    let balance = compute_balance(&candidates, options.above, options.below)?;

    let channel_balance = channel
        .channel_balance
        .checked_sub(future_commit_fees)
        .ok_or_else(|| BalanceError::Calculation("channel balance overflowed".to_string()))?;

    Ok(BalanceReport {
        balance,
        channel_balance,
    })
}
