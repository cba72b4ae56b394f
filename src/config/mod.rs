// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs`: TOML-backed data model.
//! - `loader.rs`: read a config file from disk.
//! - `validate.rs`: structural checks and adjacency flattening.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, GraphSection, LabelSection, RawConfigFile};
pub use validate::validate_config;
