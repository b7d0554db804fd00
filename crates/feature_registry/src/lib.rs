//! Feature-support registry.
//!
//! A [`FeatureSupport`] knows how to classify and generate one or more
//! declared feature types. The host application constructs its supports and
//! hands them to [`FeatureSupportRegistry::initialize`], which orders them and
//! publishes an immutable [`SupportSet`]. The registry then answers two
//! queries:
//!
//! - [`FeatureSupportRegistry::classify`]: what is the [`FeatureType`] of a feature?
//! - [`FeatureSupportRegistry::resolve`]: which support owns a feature? (cached per persisted identity)
//!
//! [`FeatureType`]: codebook_model::FeatureType

mod error;
mod policy;
pub mod primitive;
mod registry;
mod support;

pub use error::RegistryError;
pub use policy::{RegistryConfig, ResolutionPolicy};
pub use primitive::PrimitiveFeatureSupport;
pub use registry::{FeatureSupportRegistry, SupportSet};
pub use support::FeatureSupport;
