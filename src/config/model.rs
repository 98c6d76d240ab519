// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{BalanceError, Result};
use crate::node::{Credentials, CredentialsProvider};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// default_node = "alice"
///
/// [node.alice]
/// cert = "LS0tLS1CRUdJTi..."
/// macaroon = "0201036c6e64..."
/// socket = "snapshots/alice.json"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// All nodes from `[node.<name>]`, keyed by node name.
    #[serde(default)]
    pub node: BTreeMap<String, NodeConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// Node used when no `--node` is given.
    #[serde(default)]
    pub default_node: Option<String>,
}

/// `[node.<name>]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
    #[serde(default)]
    pub cert: Option<String>,
    pub macaroon: String,
    /// Where to reach the node. For the snapshot client this is a file path,
    /// resolved relative to the config file.
    pub socket: String,
}

/// Validated configuration. Build it with `ConfigFile::try_from`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub node: BTreeMap<String, NodeConfig>,
    /// Directory relative sockets are resolved against.
    base_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, node: BTreeMap<String, NodeConfig>) -> Self {
        Self {
            config,
            node,
            base_dir: None,
        }
    }

    /// Resolve relative sockets against `dir` (normally the config file's directory).
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Name of the node selected by `node`, the configured default, or the
    /// only node if there is exactly one.
    pub fn resolve_node_name<'a>(&'a self, node: Option<&'a str>) -> Result<&'a str> {
        if let Some(name) = node.or(self.config.default_node.as_deref()) {
            return if self.node.contains_key(name) {
                Ok(name)
            } else {
                Err(BalanceError::Configuration(format!("unknown node '{name}'")))
            };
        }

        let mut names = self.node.keys();
        match (names.next(), names.next()) {
            (Some(only), None) => Ok(only.as_str()),
            _ => Err(BalanceError::Configuration(
                "several nodes configured; select one with --node or [config].default_node"
                    .to_string(),
            )),
        }
    }

    fn resolve_socket(&self, socket: &str) -> String {
        match &self.base_dir {
            Some(dir) if Path::new(socket).is_relative() => {
                dir.join(socket).to_string_lossy().into_owned()
            }
            _ => socket.to_string(),
        }
    }
}

impl CredentialsProvider for ConfigFile {
    fn credentials(&self, node: Option<&str>) -> Result<Credentials> {
        let name = self.resolve_node_name(node)?;
        let cfg = self
            .node
            .get(name)
            .ok_or_else(|| BalanceError::Configuration(format!("unknown node '{name}'")))?;

        Ok(Credentials {
            cert: cfg.cert.clone(),
            macaroon: cfg.macaroon.clone(),
            socket: self.resolve_socket(&cfg.socket),
        })
    }
}
