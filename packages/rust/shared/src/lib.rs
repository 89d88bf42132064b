//! Shared types, error model, and configuration for termsync.
//!
//! This crate is the foundation depended on by all other termsync crates.
//! It provides:
//! - [`TermSyncError`] — the unified error type
//! - Domain types ([`ValidatedRecord`], [`Category`])
//! - Configuration ([`AppConfig`], [`StoreConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, StoreConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from, validate_store_token,
};
pub use error::{
    BatchValidationError, CollisionError, CollisionGroup, FieldError, RecordErrors, Result,
    TermSyncError,
};
pub use types::{Category, ValidatedRecord};
