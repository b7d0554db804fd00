//! Support for the UIMA primitive range types.

use codebook_model::{CodebookFeature, FeatureType, TypeDescription, TypeSystemDescription};

use crate::FeatureSupport;

pub const CAS_TYPE_STRING: &str = "uima.cas.String";
pub const CAS_TYPE_INTEGER: &str = "uima.cas.Integer";
pub const CAS_TYPE_FLOAT: &str = "uima.cas.Float";
pub const CAS_TYPE_BOOLEAN: &str = "uima.cas.Boolean";

const PRIMITIVE_TYPES: &[(&str, &str)] = &[
	(CAS_TYPE_STRING, "Primitive: String"),
	(CAS_TYPE_INTEGER, "Primitive: Integer"),
	(CAS_TYPE_FLOAT, "Primitive: Float"),
	(CAS_TYPE_BOOLEAN, "Primitive: Boolean"),
];

/// Classifies and generates string, integer, float and boolean features.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveFeatureSupport;

impl PrimitiveFeatureSupport {
	pub const ID: &'static str = "primitive";

	/// All primitive types this support can classify, with their display names.
	pub fn supported_types(&self) -> Vec<FeatureType> {
		PRIMITIVE_TYPES
			.iter()
			.map(|&(name, ui_name)| FeatureType::new(name, ui_name, Self::ID))
			.collect()
	}
}

impl FeatureSupport for PrimitiveFeatureSupport {
	fn id(&self) -> &str {
		Self::ID
	}

	fn order(&self) -> Option<i32> {
		Some(0)
	}

	fn feature_type(&self, feature: &CodebookFeature) -> Option<FeatureType> {
		let declared = feature.type_name.as_deref()?;
		PRIMITIVE_TYPES
			.iter()
			.find(|&&(name, _)| name == declared)
			.map(|&(name, ui_name)| FeatureType::new(name, ui_name, Self::ID))
	}

	fn generate_feature(&self, _tsd: &mut TypeSystemDescription, td: &mut TypeDescription, feature: &CodebookFeature) {
		// Codes are free text unless declared otherwise.
		let range = feature.type_name.as_deref().unwrap_or(CAS_TYPE_STRING);
		td.add_feature(feature.name.as_str(), feature.description.clone(), range);
	}
}
