use codebook_model::{CodebookFeature, FeatureType, TypeDescription, TypeSystemDescription};

/// Capability interface implemented by every feature-type provider.
///
/// The registry holds supports as `Arc<dyn FeatureSupport>` and never inspects
/// the concrete type behind them.
pub trait FeatureSupport: Send + Sync {
	/// Stable identifier, used in logs and in [`FeatureType::support_id`].
	fn id(&self) -> &str;

	/// Ordering hint; lower values are consulted first. Supports without a
	/// hint are consulted after all ordered ones, in registration order.
	fn order(&self) -> Option<i32> {
		None
	}

	/// Classifies the feature's declared type, or `None` if this support has no opinion.
	fn feature_type(&self, feature: &CodebookFeature) -> Option<FeatureType>;

	/// Declares `feature` on `td`. Auxiliary types may be added to `tsd`.
	fn generate_feature(&self, tsd: &mut TypeSystemDescription, td: &mut TypeDescription, feature: &CodebookFeature);
}

impl std::fmt::Debug for dyn FeatureSupport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FeatureSupport")
			.field("id", &self.id())
			.field("order", &self.order())
			.finish()
	}
}
