/// Errors surfaced by the feature-support registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// No registered support could be resolved for the feature.
	#[error("Unsupported feature: [{name}]")]
	UnsupportedFeature { name: String },
}
