//! Annotation type-system descriptor.
//!
//! Mirrors the shape of a UIMA type system: a set of named types, each with a
//! supertype and a list of feature declarations. Feature supports only ever
//! append to these values.

use serde::{Deserialize, Serialize};

/// Supertype used for codebook annotation types.
pub const ANNOTATION_TYPE: &str = "uima.tcas.Annotation";

/// A single feature declared on a [`TypeDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescription {
	pub name: String,
	pub description: Option<String>,
	/// Range type of the feature value.
	pub range_type: String,
	/// Element type for array-valued ranges.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub element_type: Option<String>,
}

/// A named annotation type and its declared features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescription {
	pub name: String,
	pub description: Option<String>,
	pub supertype: String,
	#[serde(default)]
	pub features: Vec<FeatureDescription>,
}

impl TypeDescription {
	pub fn new(name: impl Into<String>, description: Option<String>, supertype: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description,
			supertype: supertype.into(),
			features: Vec::new(),
		}
	}

	/// Appends a feature declaration and returns a handle to it.
	pub fn add_feature(&mut self, name: impl Into<String>, description: Option<String>, range_type: impl Into<String>) -> &mut FeatureDescription {
		self.features.push(FeatureDescription {
			name: name.into(),
			description,
			range_type: range_type.into(),
			element_type: None,
		});
		let last = self.features.len() - 1;
		&mut self.features[last]
	}

	pub fn feature(&self, name: &str) -> Option<&FeatureDescription> {
		self.features.iter().find(|f| f.name == name)
	}
}

/// Ordered collection of [`TypeDescription`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSystemDescription {
	#[serde(default)]
	pub types: Vec<TypeDescription>,
}

impl TypeSystemDescription {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a type. Types are kept in insertion order.
	pub fn add_type(&mut self, td: TypeDescription) {
		self.types.push(td);
	}

	pub fn get_type(&self, name: &str) -> Option<&TypeDescription> {
		self.types.iter().find(|t| t.name == name)
	}
}
