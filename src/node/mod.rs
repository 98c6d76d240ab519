// src/node/mod.rs

//! Collaborators that talk to a node.
//!
//! The balance calculations only see these through traits:
//! - [`CredentialsProvider`] resolves `{cert, macaroon, socket}` for a node
//!   name (the config file implements it).
//! - [`Connector`] turns credentials into a [`Session`] without any IO.
//! - [`NodeClient`] performs the four fetches.
//!
//! [`snapshot`] ships a client that reads a JSON snapshot instead of
//! speaking the node's wire protocol.

pub mod client;
pub mod credentials;
pub mod snapshot;
pub mod types;

pub use client::{Connector, FetchFuture, NodeAccess, NodeClient, Session};
pub use credentials::{Credentials, CredentialsProvider};
pub use snapshot::{SnapshotClient, SnapshotConnector};
pub use types::{ChainBalance, Channel, ChannelBalance, Channels, NodeSnapshot, PendingChainBalance};
