// src/calc/liquidity.rs

use tracing::debug;

use crate::calc::balance::compute_balance;
use crate::calc::percentile::{percentile, round_half_up};
use crate::errors::Result;
use crate::node::Channel;

/// Fraction used when only the top liquidity is requested.
pub const TOP_PERCENTILE: f64 = 0.9;

/// Which liquidity to measure, and the bounds to check it against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityQuery {
    /// Measure local (outbound) balances instead of remote (inbound) ones.
    pub is_outbound: bool,
    /// Reduce the balances to their rounded 90th percentile.
    pub is_top: bool,
    /// Only count channels with this peer public key.
    pub with_peer: Option<String>,
    pub above: Option<i64>,
    pub below: Option<i64>,
}

/// Per-channel token amounts that make up the liquidity figure.
///
/// Only active channels count, optionally only those with `with_peer`. With
/// `is_top` the amounts collapse into a single percentile value; an empty
/// selection stays empty.
pub fn liquidity_tokens(channels: &[Channel], query: &LiquidityQuery) -> Result<Vec<i64>> {
    let tokens: Vec<i64> = channels
        .iter()
        .filter(|c| c.is_active)
        .filter(|c| {
            query
                .with_peer
                .as_deref()
                .is_none_or(|peer| c.partner_public_key == peer)
        })
        .map(|c| {
            if query.is_outbound {
                c.local_balance
            } else {
                c.remote_balance
            }
        })
        .collect();

    debug!(
        channels = tokens.len(),
        outbound = query.is_outbound,
        top = query.is_top,
        "selected channel balances"
    );

    if !query.is_top || tokens.is_empty() {
        return Ok(tokens);
    }

    let values: Vec<f64> = tokens.iter().map(|t| *t as f64).collect();
    let top = round_half_up(percentile(&values, TOP_PERCENTILE)?)?;
    Ok(vec![top])
}

/// Liquidity available in `channels`, gated on the query's bounds.
pub fn compute_liquidity(channels: &[Channel], query: &LiquidityQuery) -> Result<i64> {
    let tokens = liquidity_tokens(channels, query)?;
    compute_balance(&tokens, query.above, query.below)
}
