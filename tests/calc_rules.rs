use balancedag::calc::{
    LiquidityQuery, compute_balance, compute_liquidity, future_commit_fees, liquidity_tokens,
    percentile, round_half_up,
};
use balancedag::errors::{BalanceError, BoundViolation, ErrorKind};
use balancedag_test_utils::builders::ChannelBuilder;
use proptest::prelude::*;

#[test]
fn test_empty_amounts_sum_to_zero() {
    assert_eq!(compute_balance(&[], None, None).unwrap(), 0);
}

#[test]
fn test_bounds_apply_to_total_only() {
    // -30 on its own is below 50; only the total matters.
    assert_eq!(compute_balance(&[100, -30, 5], Some(50), Some(200)).unwrap(), 75);
}

#[test]
fn test_total_not_above_minimum_is_rejected() {
    let err = compute_balance(&[10], Some(50), None).unwrap_err();
    match err {
        BalanceError::OutOfBounds(BoundViolation::BelowMinimum { total, above }) => {
            assert_eq!(total, 10);
            assert_eq!(above, 50);
        }
        other => panic!("Expected BelowMinimum, got: {:?}", other),
    }
}

#[test]
fn test_total_not_below_maximum_is_rejected() {
    let err = compute_balance(&[60, 40], None, Some(100)).unwrap_err();
    assert!(matches!(
        err,
        BalanceError::OutOfBounds(BoundViolation::AboveMaximum { total: 100, below: 100 })
    ));
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert!(err.to_string().contains("above maximum"));
}

#[test]
fn test_bounds_are_exclusive() {
    assert!(compute_balance(&[50], Some(50), None).is_err());
    assert!(compute_balance(&[51], Some(50), None).is_ok());
    assert!(compute_balance(&[99], None, Some(100)).is_ok());
}

#[test]
fn test_empty_amounts_still_checked_against_bounds() {
    let err = compute_balance(&[], Some(0), None).unwrap_err();
    assert!(err.to_string().contains("below minimum"));
}

#[test]
fn test_overflow_is_a_calculation_error() {
    let err = compute_balance(&[i64::MAX, 1], None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Calculation);
}

#[test]
fn test_future_commit_fees_only_count_local_initiator() {
    let channels = vec![
        ChannelBuilder::new().commit_fee(10).build(),
        ChannelBuilder::new().commit_fee(7).partner_initiated(true).build(),
        ChannelBuilder::new().commit_fee(3).active(false).build(),
    ];
    assert_eq!(future_commit_fees(&channels).unwrap(), 13);
    assert_eq!(future_commit_fees(&[]).unwrap(), 0);
}

#[test]
fn test_percentile_interpolates_between_order_statistics() {
    let values: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
    assert_eq!(percentile(&values, 0.9).unwrap(), 95.0);
    assert_eq!(percentile(&values, 0.5).unwrap(), 55.0);
    assert_eq!(percentile(&[7.0], 0.9).unwrap(), 7.0);

    // Unsorted input is sorted first.
    assert_eq!(percentile(&[30.0, 10.0, 20.0], 1.0).unwrap(), 30.0);
    assert_eq!(percentile(&[30.0, 10.0, 20.0], 0.0).unwrap(), 10.0);
}

#[test]
fn test_percentile_rejects_bad_input() {
    assert!(percentile(&[], 0.9).is_err());
    assert!(percentile(&[1.0], 1.5).is_err());
    assert!(percentile(&[1.0, f64::NAN], 0.5).is_err());
}

#[test]
fn test_round_half_up() {
    assert_eq!(round_half_up(2.5).unwrap(), 3);
    assert_eq!(round_half_up(2.49).unwrap(), 2);
    assert_eq!(round_half_up(-2.5).unwrap(), -2);
    assert!(round_half_up(f64::INFINITY).is_err());
}

fn remote_ladder() -> Vec<balancedag::node::Channel> {
    (1..=10)
        .map(|i| ChannelBuilder::new().remote(i * 10).local(i).build())
        .collect()
}

#[test]
fn test_top_liquidity_is_rounded_90th_percentile() {
    let query = LiquidityQuery {
        is_top: true,
        ..LiquidityQuery::default()
    };
    assert_eq!(liquidity_tokens(&remote_ladder(), &query).unwrap(), vec![95]);
    assert_eq!(compute_liquidity(&remote_ladder(), &query).unwrap(), 95);
}

#[test]
fn test_liquidity_skips_inactive_channels() {
    let channels = vec![
        ChannelBuilder::new().remote(100).build(),
        ChannelBuilder::new().remote(1_000).active(false).build(),
    ];
    let total = compute_liquidity(&channels, &LiquidityQuery::default()).unwrap();
    assert_eq!(total, 100);
}

#[test]
fn test_liquidity_with_peer_and_outbound() {
    let alice = "03".repeat(33);
    let channels = vec![
        ChannelBuilder::new().peer(&alice).local(40).remote(1).build(),
        ChannelBuilder::new().peer(&alice).local(2).remote(1).build(),
        ChannelBuilder::new().local(500).remote(1).build(),
    ];
    let query = LiquidityQuery {
        is_outbound: true,
        with_peer: Some(alice),
        ..LiquidityQuery::default()
    };
    assert_eq!(liquidity_tokens(&channels, &query).unwrap(), vec![40, 2]);
    assert_eq!(compute_liquidity(&channels, &query).unwrap(), 42);
}

#[test]
fn test_top_liquidity_of_no_channels_is_zero() {
    let query = LiquidityQuery {
        is_top: true,
        with_peer: Some("nobody".to_string()),
        ..LiquidityQuery::default()
    };
    assert!(liquidity_tokens(&remote_ladder(), &query).unwrap().is_empty());
    assert_eq!(compute_liquidity(&remote_ladder(), &query).unwrap(), 0);
}

#[test]
fn test_liquidity_bounds() {
    let query = LiquidityQuery {
        below: Some(100),
        ..LiquidityQuery::default()
    };
    let err = compute_liquidity(&remote_ladder(), &query).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

proptest! {
    #[test]
    fn test_unbounded_total_is_plain_sum(amounts in proptest::collection::vec(-1_000_000i64..1_000_000, 0..32)) {
        let expected: i64 = amounts.iter().sum();
        prop_assert_eq!(compute_balance(&amounts, None, None).unwrap(), expected);
    }

    #[test]
    fn test_percentile_stays_within_range(
        values in proptest::collection::vec(-1e9f64..1e9, 1..40),
        fraction in 0.0f64..=1.0,
    ) {
        let p = percentile(&values, fraction).unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(p >= min - 1e-6 && p <= max + 1e-6);
    }
}
