// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BalanceError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BalanceError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.node))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_nodes(cfg)?;
    validate_default_node(cfg)?;
    validate_nodes(cfg)?;
    Ok(())
}

fn ensure_has_nodes(cfg: &RawConfigFile) -> Result<()> {
    if cfg.node.is_empty() {
        return Err(BalanceError::Configuration(
            "config must contain at least one [node.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_default_node(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref name) = cfg.config.default_node {
        if !cfg.node.contains_key(name) {
            return Err(BalanceError::Configuration(format!(
                "[config].default_node '{}' has no [node.{}] section",
                name, name
            )));
        }
    }
    Ok(())
}

fn validate_nodes(cfg: &RawConfigFile) -> Result<()> {
    for (name, node) in cfg.node.iter() {
        if node.socket.trim().is_empty() {
            return Err(BalanceError::Configuration(format!(
                "node '{}' has an empty socket",
                name
            )));
        }
        if node.macaroon.trim().is_empty() {
            return Err(BalanceError::Configuration(format!(
                "node '{}' has an empty macaroon",
                name
            )));
        }
    }
    Ok(())
}
