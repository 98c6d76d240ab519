// src/calc/mod.rs

//! Pure aggregation rules applied to fetched node data.
//!
//! Nothing in here does IO or touches the task graph; the balance tasks in
//! [`crate::balances`] call these and let their errors flow into the
//! executor's task error.

pub mod balance;
pub mod fees;
pub mod liquidity;
pub mod percentile;

pub use balance::compute_balance;
pub use fees::future_commit_fees;
pub use liquidity::{LiquidityQuery, TOP_PERCENTILE, compute_liquidity, liquidity_tokens};
pub use percentile::{percentile, round_half_up};
