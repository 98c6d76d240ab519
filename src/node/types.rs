// src/node/types.rs

//! Responses returned by a node, as consumed by the balance calculations.

use serde::{Deserialize, Serialize};

/// Confirmed on-chain wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainBalance {
    pub chain_balance: i64,
}

/// Sum of local channel balances, plus balance in channels still opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelBalance {
    pub channel_balance: i64,
    #[serde(default)]
    pub pending_balance: i64,
}

/// Unconfirmed on-chain wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PendingChainBalance {
    pub pending_chain_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub is_active: bool,
    pub is_partner_initiated: bool,
    pub partner_public_key: String,
    pub local_balance: i64,
    pub remote_balance: i64,
    pub commit_transaction_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channels {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Everything a node snapshot file holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeSnapshot {
    #[serde(flatten)]
    pub chain: ChainBalance,
    #[serde(flatten)]
    pub channel: ChannelBalance,
    #[serde(flatten)]
    pub pending: PendingChainBalance,
    #[serde(default)]
    pub channels: Vec<Channel>,
}
