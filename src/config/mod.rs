// src/config/mod.rs

//! Node configuration file (`Balancedag.toml`).
//!
//! - [`model`] holds the serde types.
//! - [`loader`] reads and parses the file.
//! - [`validate`] turns a [`RawConfigFile`] into a checked [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, NodeConfig, RawConfigFile};
