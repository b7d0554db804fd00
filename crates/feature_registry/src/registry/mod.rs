use std::sync::Arc;

use arc_swap::ArcSwap;
use codebook_model::{CodebookFeature, FeatureId, FeatureType};
use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::policy::{RegistryConfig, ResolutionPolicy};
use crate::support::FeatureSupport;

/// Immutable, ordered set of active feature supports.
///
/// Published as a whole by [`FeatureSupportRegistry::initialize`]; holders of
/// an older set keep seeing it unchanged after a re-initialization.
#[derive(Debug, Default)]
pub struct SupportSet {
	supports: Vec<Arc<dyn FeatureSupport>>,
}

impl SupportSet {
	fn ordered(mut supports: Vec<Arc<dyn FeatureSupport>>) -> Self {
		// Stable: equal keys keep registration order.
		supports.sort_by_key(|s| precedence(s.order()));
		Self { supports }
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.supports.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.supports.is_empty()
	}

	pub fn first(&self) -> Option<&Arc<dyn FeatureSupport>> {
		self.supports.first()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn FeatureSupport>> {
		self.supports.iter()
	}

	/// Support identifiers in priority order.
	pub fn ids(&self) -> Vec<&str> {
		self.supports.iter().map(|s| s.id()).collect()
	}
}

impl<'a> IntoIterator for &'a SupportSet {
	type Item = &'a Arc<dyn FeatureSupport>;
	type IntoIter = std::slice::Iter<'a, Arc<dyn FeatureSupport>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Sort key: ordered supports ascending, unordered ones after all of them.
fn precedence(order: Option<i32>) -> (bool, i32) {
	match order {
		Some(order) => (false, order),
		None => (true, 0),
	}
}

/// Process-wide registry of feature supports.
///
/// Owned by the composition root and shared by `Arc`. The active set is
/// replaced atomically; the resolution cache is append-only and keyed by
/// persisted [`FeatureId`], so unsaved features never enter it.
pub struct FeatureSupportRegistry {
	policy: ResolutionPolicy,
	active: ArcSwap<SupportSet>,
	cache: RwLock<HashMap<FeatureId, Arc<dyn FeatureSupport>>>,
}

impl Default for FeatureSupportRegistry {
	fn default() -> Self {
		Self::new(RegistryConfig::default())
	}
}

impl FeatureSupportRegistry {
	/// Creates a registry with an empty active set.
	pub fn new(config: RegistryConfig) -> Self {
		Self {
			policy: config.resolution_policy,
			active: ArcSwap::from_pointee(SupportSet::default()),
			cache: RwLock::new(HashMap::default()),
		}
	}

	/// Creates a registry and initializes it with `supports`.
	pub fn with_supports<I>(config: RegistryConfig, supports: I) -> Self
	where
		I: IntoIterator<Item = Arc<dyn FeatureSupport>>,
	{
		let registry = Self::new(config);
		registry.initialize(supports);
		registry
	}

	#[inline]
	pub fn policy(&self) -> ResolutionPolicy {
		self.policy
	}

	/// Orders `supports` and publishes them as the active set, replacing any
	/// previous one. Cached resolutions are kept.
	pub fn initialize<I>(&self, supports: I)
	where
		I: IntoIterator<Item = Arc<dyn FeatureSupport>>,
	{
		let set = SupportSet::ordered(supports.into_iter().collect());
		for support in &set {
			info!(support = support.id(), order = ?support.order(), "Found feature support");
		}
		self.active.store(Arc::new(set));
	}

	/// Returns the active set in priority order.
	pub fn providers(&self) -> Arc<SupportSet> {
		self.active.load_full()
	}

	/// Returns the type of `feature` as claimed by the first support with an opinion.
	///
	/// A feature without a declared type yields `None` without consulting any support.
	pub fn classify(&self, feature: &CodebookFeature) -> Option<FeatureType> {
		feature.type_name.as_ref()?;
		let set = self.active.load();
		set.iter().find_map(|s| s.feature_type(feature))
	}

	/// Returns the support responsible for `feature`.
	///
	/// Persisted features are answered from the cache once resolved; the first
	/// resolution for an identity wins and is never replaced.
	pub fn resolve(&self, feature: &CodebookFeature) -> Result<Arc<dyn FeatureSupport>, RegistryError> {
		if let Some(id) = feature.id {
			if let Some(support) = self.cache.read().get(&id) {
				return Ok(Arc::clone(support));
			}
		}

		let support = self.select(feature).ok_or_else(|| RegistryError::UnsupportedFeature {
			name: feature.name.clone(),
		})?;

		let Some(id) = feature.id else {
			return Ok(support);
		};

		let mut cache = self.cache.write();
		let cached = cache.entry(id).or_insert_with(|| {
			debug!(feature = %id, support = support.id(), "Cached feature support");
			support
		});
		Ok(Arc::clone(cached))
	}

	/// Number of identities with a cached resolution.
	pub fn cached_len(&self) -> usize {
		self.cache.read().len()
	}

	fn select(&self, feature: &CodebookFeature) -> Option<Arc<dyn FeatureSupport>> {
		let set = self.active.load();
		match self.policy {
			ResolutionPolicy::FirstRegistered => set.first().cloned(),
			ResolutionPolicy::ByFeatureType => set.iter().find(|s| s.feature_type(feature).is_some()).cloned(),
		}
	}
}

impl std::fmt::Debug for FeatureSupportRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FeatureSupportRegistry")
			.field("policy", &self.policy)
			.field("active", &self.active.load().ids())
			.field("cached", &self.cached_len())
			.finish()
	}
}

#[cfg(test)]
mod tests;
