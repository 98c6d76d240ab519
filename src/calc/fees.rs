// src/calc/fees.rs

use crate::errors::{BalanceError, Result};
use crate::node::Channel;

/// Commit transaction fees the local side will pay when its channels close:
/// the sum of `commit_transaction_fee` over channels we initiated.
pub fn future_commit_fees(channels: &[Channel]) -> Result<i64> {
    channels
        .iter()
        .filter(|c| !c.is_partner_initiated)
        .try_fold(0i64, |sum, c| sum.checked_add(c.commit_transaction_fee))
        .ok_or_else(|| BalanceError::Calculation("commit fee total overflowed".to_string()))
}
