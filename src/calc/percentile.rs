// src/calc/percentile.rs

use crate::errors::{BalanceError, Result};

/// Value at `fraction` (0..=1) of `values`, interpolated.
///
/// The values are sorted and the rank is `n * fraction - 0.5`, clamped to
/// the valid index range. An integral rank picks that element; otherwise the
/// result interpolates linearly between the two neighbouring order
/// statistics. So the 90th percentile of `10, 20, ..., 100` is `95`.
pub fn percentile(values: &[f64], fraction: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(BalanceError::Calculation(
            "percentile of an empty sequence".to_string(),
        ));
    }
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(BalanceError::Calculation(format!(
            "percentile fraction {fraction} is outside 0..=1"
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(BalanceError::Calculation(
            "percentile input contains a non-finite value".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let last = (sorted.len() - 1) as f64;
    let rank = (sorted.len() as f64 * fraction - 0.5).clamp(0.0, last);
    let lower = rank.floor();
    let weight = rank - lower;
    let lower = lower as usize;

    if weight == 0.0 {
        return Ok(sorted[lower]);
    }

    let upper = (lower + 1).min(sorted.len() - 1);
    Ok((1.0 - weight) * sorted[lower] + weight * sorted[upper])
}

/// Round to the nearest integer, halves going up (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> Result<i64> {
    let rounded = (value + 0.5).floor();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return Err(BalanceError::Calculation(format!(
            "cannot round {value} to a token amount"
        )));
    }
    Ok(rounded as i64)
}
