use serde::Deserialize;

/// How the registry picks the owning support on a resolution cache miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
	/// Take the first active support unconditionally, regardless of whether
	/// it can classify the feature's declared type.
	#[default]
	FirstRegistered,
	/// Take the first active support whose [`feature_type`] claims the feature.
	///
	/// [`feature_type`]: crate::FeatureSupport::feature_type
	ByFeatureType,
}

/// Registry settings, usually read from the `[registry]` table of the schema config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RegistryConfig {
	pub resolution_policy: ResolutionPolicy,
}
