// src/calc/balance.rs

use crate::errors::{BalanceError, BoundViolation, Result};

/// Sum `amounts` and gate the total on the optional bounds.
///
/// - empty input sums to zero
/// - with `above`, the total must be strictly greater than it
/// - with `below`, the total must be strictly less than it
///
/// The bounds apply to the total only, never to individual amounts.
pub fn compute_balance(amounts: &[i64], above: Option<i64>, below: Option<i64>) -> Result<i64> {
    let total = amounts
        .iter()
        .try_fold(0i64, |sum, amount| sum.checked_add(*amount))
        .ok_or_else(|| BalanceError::Calculation("token total overflowed".to_string()))?;

    if let Some(above) = above {
        if total <= above {
            return Err(BalanceError::OutOfBounds(BoundViolation::BelowMinimum {
                total,
                above,
            }));
        }
    }

    if let Some(below) = below {
        if total >= below {
            return Err(BalanceError::OutOfBounds(BoundViolation::AboveMaximum {
                total,
                below,
            }));
        }
    }

    Ok(total)
}
