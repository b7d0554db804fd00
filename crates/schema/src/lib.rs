//! Codebook schema management.
//!
//! [`SchemaService`] orchestrates codebook and feature CRUD over a
//! [`CodebookStore`] and drives feature generation into a type-system
//! descriptor through the shared [`FeatureSupportRegistry`].
//!
//! [`FeatureSupportRegistry`]: codebook_feature_registry::FeatureSupportRegistry

pub mod config;
mod error;
mod service;
pub mod store;

pub use config::{ConfigError, SchemaConfig, load_config, parse_config};
pub use error::{Result, SchemaError};
pub use service::SchemaService;
pub use store::{CodebookFilter, CodebookStore, MemoryStore, StoreError, StoreTx};
