//! Shared types, error model, and configuration for guidegen.
//!
//! This crate is the foundation depended on by all other guidegen crates.
//! It provides:
//! - [`GuidegenError`] — the unified error type
//! - Domain types ([`DocConfig`], [`TopicEntry`], [`AuditRecord`], [`BuildContext`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{GuidegenError, Result};
pub use types::{
    AuditRecord, BuildContext, DocConfig, GuideEntry, GuideTree, TopicConfig, TopicEntry,
};
