//! Codebook domain model.
//!
//! - [`Project`]: owner of codebooks, supplied by the host application
//! - [`Codebook`]: an ordered coding scheme within a project
//! - [`CodebookFeature`]: a typed attribute attached to one codebook
//! - [`FeatureType`]: classification answer returned by a feature support
//! - [`TypeSystemDescription`]: the annotation type system features are generated into

mod codebook;
mod feature;
mod id;
pub mod typesystem;

pub use codebook::{Codebook, Project};
pub use feature::{CodebookFeature, FeatureType};
pub use id::{CodebookId, FeatureId, ProjectId};
pub use typesystem::{FeatureDescription, TypeDescription, TypeSystemDescription};
