use balancedag::balances::{LiquidityOptions, get_liquidity};
use balancedag::errors::ErrorKind;
use balancedag::node::NodeSnapshot;
use balancedag_test_utils::builders::{ChannelBuilder, SnapshotBuilder};
use balancedag_test_utils::fake_node::{Fetch, FakeNode, fake_access};
use balancedag_test_utils::{init_tracing, with_timeout};

const CAROL: &str = "03aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Ten active channels with remote balances 10..=100 and local balances
/// 1..=10, plus one inactive channel that must never count.
fn ladder() -> NodeSnapshot {
    let mut builder = SnapshotBuilder::new();
    for i in 1..=10 {
        builder = builder.channel(ChannelBuilder::new().remote(i * 10).local(i).build());
    }
    builder
        .channel(ChannelBuilder::new().active(false).remote(10_000).local(10_000).build())
        .build()
}

#[tokio::test]
async fn test_inbound_liquidity_sums_remote_balances() {
    init_tracing();
    with_timeout(async {
        let node = FakeNode::new(ladder());
        let report = get_liquidity(&LiquidityOptions::default(), &fake_access(node.clone()))
            .await
            .unwrap();

        assert_eq!(report.balance, 550);
        // Liquidity only needs the channel list.
        assert_eq!(node.calls(), vec![Fetch::Channels]);
    })
    .await;
}

#[tokio::test]
async fn test_outbound_liquidity_sums_local_balances() {
    init_tracing();
    with_timeout(async {
        let options = LiquidityOptions {
            is_outbound: true,
            ..LiquidityOptions::default()
        };
        let report = get_liquidity(&options, &fake_access(FakeNode::new(ladder())))
            .await
            .unwrap();
        assert_eq!(report.balance, 55);
    })
    .await;
}

#[tokio::test]
async fn test_top_liquidity_is_90th_percentile() {
    init_tracing();
    with_timeout(async {
        let options = LiquidityOptions {
            is_top: true,
            ..LiquidityOptions::default()
        };
        let report = get_liquidity(&options, &fake_access(FakeNode::new(ladder())))
            .await
            .unwrap();
        assert_eq!(report.balance, 95);
    })
    .await;
}

#[tokio::test]
async fn test_liquidity_with_single_peer() {
    init_tracing();
    with_timeout(async {
        let snapshot = SnapshotBuilder::new()
            .channel(ChannelBuilder::new().peer(CAROL).remote(300).build())
            .channel(ChannelBuilder::new().peer(CAROL).remote(200).active(false).build())
            .channel(ChannelBuilder::new().remote(1_000).build())
            .build();
        let options = LiquidityOptions {
            with_peer: Some(CAROL.to_string()),
            ..LiquidityOptions::default()
        };
        let report = get_liquidity(&options, &fake_access(FakeNode::new(snapshot)))
            .await
            .unwrap();
        assert_eq!(report.balance, 300);
    })
    .await;
}

#[tokio::test]
async fn test_liquidity_bound_violation_comes_from_total_task() {
    init_tracing();
    with_timeout(async {
        let options = LiquidityOptions {
            above: Some(1_000),
            ..LiquidityOptions::default()
        };
        let err = get_liquidity(&options, &fake_access(FakeNode::new(ladder())))
            .await
            .unwrap_err();

        assert_eq!(err.task_name(), Some("total"));
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert!(err.to_string().contains("calculating liquidity balance"));
    })
    .await;
}

#[tokio::test]
async fn test_channel_fetch_failure_fails_liquidity() {
    init_tracing();
    with_timeout(async {
        let node = FakeNode::new(ladder()).failing(Fetch::Channels, "rpc unavailable");
        let err = get_liquidity(&LiquidityOptions::default(), &fake_access(node))
            .await
            .unwrap_err();

        assert_eq!(err.task_name(), Some("get_channels"));
        assert_eq!(err.kind(), ErrorKind::Task);
    })
    .await;
}

#[test]
fn test_options_accept_with_key() {
    let options: LiquidityOptions =
        serde_json::from_str(&format!(r#"{{"with": "{CAROL}", "is_top": true}}"#)).unwrap();
    assert_eq!(options.with_peer.as_deref(), Some(CAROL));
    assert!(options.is_top);
    assert!(!options.is_outbound);
}
