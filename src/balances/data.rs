// src/balances/data.rs

use std::fmt;

use anyhow::anyhow;

use crate::balances::get_balance::BalanceReport;
use crate::balances::get_liquidity::LiquidityReport;
use crate::node::{
    ChainBalance, ChannelBalance, Channels, Credentials, PendingChainBalance, Session,
};

/// Value produced by a task in the balance graphs.
#[derive(Clone)]
pub enum NodeData {
    Credentials(Credentials),
    Session(Session),
    ChainBalance(ChainBalance),
    ChannelBalance(ChannelBalance),
    Channels(Channels),
    PendingChainBalance(PendingChainBalance),
    /// A list of token amounts to be summed.
    Tokens(Vec<i64>),
    /// A single derived token amount.
    Amount(i64),
    Balance(BalanceReport),
    Liquidity(LiquidityReport),
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeData::Credentials(c) => f
                .debug_struct("Credentials")
                .field("socket", &c.socket)
                .finish_non_exhaustive(),
            NodeData::Session(_) => f.write_str("Session"),
            NodeData::ChainBalance(v) => fmt::Debug::fmt(v, f),
            NodeData::ChannelBalance(v) => fmt::Debug::fmt(v, f),
            NodeData::Channels(v) => fmt::Debug::fmt(v, f),
            NodeData::PendingChainBalance(v) => fmt::Debug::fmt(v, f),
            NodeData::Tokens(v) => f.debug_tuple("Tokens").field(v).finish(),
            NodeData::Amount(v) => f.debug_tuple("Amount").field(v).finish(),
            NodeData::Balance(v) => fmt::Debug::fmt(v, f),
            NodeData::Liquidity(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl NodeData {
    fn kind(&self) -> &'static str {
        match self {
            NodeData::Credentials(_) => "credentials",
            NodeData::Session(_) => "session",
            NodeData::ChainBalance(_) => "chain balance",
            NodeData::ChannelBalance(_) => "channel balance",
            NodeData::Channels(_) => "channels",
            NodeData::PendingChainBalance(_) => "pending chain balance",
            NodeData::Tokens(_) => "tokens",
            NodeData::Amount(_) => "amount",
            NodeData::Balance(_) => "balance report",
            NodeData::Liquidity(_) => "liquidity report",
        }
    }

    fn mismatch(&self, expected: &str) -> anyhow::Error {
        anyhow!("expected {expected}, got {}", self.kind())
    }

    pub fn as_credentials(&self) -> anyhow::Result<&Credentials> {
        match self {
            NodeData::Credentials(v) => Ok(v),
            other => Err(other.mismatch("credentials")),
        }
    }

    pub fn as_session(&self) -> anyhow::Result<&Session> {
        match self {
            NodeData::Session(v) => Ok(v),
            other => Err(other.mismatch("session")),
        }
    }

    pub fn as_chain_balance(&self) -> anyhow::Result<&ChainBalance> {
        match self {
            NodeData::ChainBalance(v) => Ok(v),
            other => Err(other.mismatch("chain balance")),
        }
    }

    pub fn as_channel_balance(&self) -> anyhow::Result<&ChannelBalance> {
        match self {
            NodeData::ChannelBalance(v) => Ok(v),
            other => Err(other.mismatch("channel balance")),
        }
    }

    pub fn as_channels(&self) -> anyhow::Result<&Channels> {
        match self {
            NodeData::Channels(v) => Ok(v),
            other => Err(other.mismatch("channels")),
        }
    }

    pub fn as_pending_chain_balance(&self) -> anyhow::Result<&PendingChainBalance> {
        match self {
            NodeData::PendingChainBalance(v) => Ok(v),
            other => Err(other.mismatch("pending chain balance")),
        }
    }

    pub fn as_tokens(&self) -> anyhow::Result<&[i64]> {
        match self {
            NodeData::Tokens(v) => Ok(v),
            other => Err(other.mismatch("tokens")),
        }
    }

    pub fn as_amount(&self) -> anyhow::Result<i64> {
        match self {
            NodeData::Amount(v) => Ok(*v),
            other => Err(other.mismatch("amount")),
        }
    }

    pub fn into_balance(self) -> anyhow::Result<BalanceReport> {
        match self {
            NodeData::Balance(v) => Ok(v),
            other => Err(other.mismatch("balance report")),
        }
    }

    pub fn into_liquidity(self) -> anyhow::Result<LiquidityReport> {
        match self {
            NodeData::Liquidity(v) => Ok(v),
            other => Err(other.mismatch("liquidity report")),
        }
    }
}
