use balancedag::node::{ChainBalance, Channel, ChannelBalance, NodeSnapshot, PendingChainBalance};

/// Builder for `Channel` to simplify test setup.
///
/// Defaults: active, locally initiated, zero balances and fee.
pub struct ChannelBuilder {
    channel: Channel,
}

impl ChannelBuilder {
    pub fn new() -> Self {
        Self {
            channel: Channel {
                is_active: true,
                is_partner_initiated: false,
                partner_public_key: "02".repeat(33),
                local_balance: 0,
                remote_balance: 0,
                commit_transaction_fee: 0,
            },
        }
    }

    pub fn active(mut self, val: bool) -> Self {
        self.channel.is_active = val;
        self
    }

    pub fn partner_initiated(mut self, val: bool) -> Self {
        self.channel.is_partner_initiated = val;
        self
    }

    pub fn peer(mut self, public_key: &str) -> Self {
        self.channel.partner_public_key = public_key.to_string();
        self
    }

    pub fn local(mut self, tokens: i64) -> Self {
        self.channel.local_balance = tokens;
        self
    }

    pub fn remote(mut self, tokens: i64) -> Self {
        self.channel.remote_balance = tokens;
        self
    }

    pub fn commit_fee(mut self, tokens: i64) -> Self {
        self.channel.commit_transaction_fee = tokens;
        self
    }

    pub fn build(self) -> Channel {
        self.channel
    }
}

impl Default for ChannelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeSnapshot`.
#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: NodeSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_balance(mut self, tokens: i64) -> Self {
        self.snapshot.chain = ChainBalance {
            chain_balance: tokens,
        };
        self
    }

    pub fn channel_balance(mut self, tokens: i64, pending: i64) -> Self {
        self.snapshot.channel = ChannelBalance {
            channel_balance: tokens,
            pending_balance: pending,
        };
        self
    }

    pub fn pending_chain_balance(mut self, tokens: i64) -> Self {
        self.snapshot.pending = PendingChainBalance {
            pending_chain_balance: tokens,
        };
        self
    }

    pub fn channel(mut self, channel: Channel) -> Self {
        self.snapshot.channels.push(channel);
        self
    }

    pub fn build(self) -> NodeSnapshot {
        self.snapshot
    }
}
