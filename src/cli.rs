// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::balances::{BalanceOptions, LiquidityOptions};

/// Command-line arguments for `balancedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "balancedag",
    version,
    about = "Compute node balance and channel liquidity from concurrent fetches.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the node config file (TOML).
    ///
    /// Default: `BALANCEDAG_CONFIG`, else `Balancedag.toml` in the current
    /// working directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BALANCEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print the task graph without contacting the node.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Total balance (on-chain, channels, pending), net of future commit fees.
    Balance(BalanceArgs),
    /// Available channel liquidity.
    Liquidity(LiquidityArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BalanceArgs {
    /// Fail unless the total is above this many tokens.
    #[arg(long, value_name = "TOKENS", allow_hyphen_values = true)]
    pub above: Option<i64>,

    /// Fail unless the total is below this many tokens.
    #[arg(long, value_name = "TOKENS", allow_hyphen_values = true)]
    pub below: Option<i64>,

    /// Only count off-chain (channel) funds.
    #[arg(long, conflicts_with = "onchain_only")]
    pub offchain_only: bool,

    /// Only count on-chain funds.
    #[arg(long)]
    pub onchain_only: bool,

    /// Node name from the config file.
    #[arg(long, value_name = "NAME")]
    pub node: Option<String>,
}

impl From<BalanceArgs> for BalanceOptions {
    fn from(args: BalanceArgs) -> Self {
        BalanceOptions {
            above: args.above,
            below: args.below,
            is_offchain_only: args.offchain_only,
            is_onchain_only: args.onchain_only,
            node: args.node,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LiquidityArgs {
    /// Fail unless the liquidity is above this many tokens.
    #[arg(long, value_name = "TOKENS", allow_hyphen_values = true)]
    pub above: Option<i64>,

    /// Fail unless the liquidity is below this many tokens.
    #[arg(long, value_name = "TOKENS", allow_hyphen_values = true)]
    pub below: Option<i64>,

    /// Outbound (local) liquidity instead of inbound.
    #[arg(long)]
    pub outbound: bool,

    /// Only the top (90th percentile) channel liquidity.
    #[arg(long)]
    pub top: bool,

    /// Only liquidity with this peer public key.
    #[arg(long = "with", value_name = "PUBKEY")]
    pub with_peer: Option<String>,

    /// Node name from the config file.
    #[arg(long, value_name = "NAME")]
    pub node: Option<String>,
}

impl From<LiquidityArgs> for LiquidityOptions {
    fn from(args: LiquidityArgs) -> Self {
        LiquidityOptions {
            above: args.above,
            below: args.below,
            is_outbound: args.outbound,
            is_top: args.top,
            with_peer: args.with_peer,
            node: args.node,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
