use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use codebook_model::{Codebook, CodebookFeature, CodebookId, FeatureType, Project, ProjectId, TypeDescription, TypeSystemDescription};
use pretty_assertions::assert_eq;

use super::*;
use crate::PrimitiveFeatureSupport;

/// Test support that claims a single declared type and counts how often it is asked.
struct CountingSupport {
	id: &'static str,
	order: Option<i32>,
	claims: &'static str,
	asked: AtomicUsize,
}

impl CountingSupport {
	fn new(id: &'static str, order: Option<i32>, claims: &'static str) -> Arc<Self> {
		Arc::new(Self {
			id,
			order,
			claims,
			asked: AtomicUsize::new(0),
		})
	}

	fn asked(&self) -> usize {
		self.asked.load(Ordering::SeqCst)
	}
}

impl FeatureSupport for CountingSupport {
	fn id(&self) -> &str {
		self.id
	}

	fn order(&self) -> Option<i32> {
		self.order
	}

	fn feature_type(&self, feature: &CodebookFeature) -> Option<FeatureType> {
		self.asked.fetch_add(1, Ordering::SeqCst);
		(feature.type_name.as_deref() == Some(self.claims)).then(|| FeatureType::new(self.claims, self.claims, self.id))
	}

	fn generate_feature(&self, _tsd: &mut TypeSystemDescription, td: &mut TypeDescription, feature: &CodebookFeature) {
		td.add_feature(feature.name.as_str(), None, self.claims);
	}
}

fn as_dyn(support: &Arc<CountingSupport>) -> Arc<dyn FeatureSupport> {
	support.clone()
}

fn feature(id: Option<u64>, type_name: Option<&str>) -> CodebookFeature {
	let mut codebook = Codebook::new(Project::new(ProjectId(1), "p"), "Topic", 1);
	codebook.id = Some(CodebookId(1));
	let mut feature = CodebookFeature::new(&codebook, "sentiment", "string").expect("persisted codebook");
	feature.id = id.map(FeatureId);
	feature.type_name = type_name.map(str::to_owned);
	feature
}

fn by_type() -> RegistryConfig {
	RegistryConfig {
		resolution_policy: ResolutionPolicy::ByFeatureType,
	}
}

#[test]
fn providers_sorted_by_order_then_unordered_in_discovery_order() {
	let registry = FeatureSupportRegistry::default();
	registry.initialize([
		as_dyn(&CountingSupport::new("late", None, "a")),
		as_dyn(&CountingSupport::new("ten", Some(10), "b")),
		as_dyn(&CountingSupport::new("later", None, "c")),
		as_dyn(&CountingSupport::new("minus", Some(-5), "d")),
		as_dyn(&CountingSupport::new("ten-again", Some(10), "e")),
	]);

	assert_eq!(registry.providers().ids(), ["minus", "ten", "ten-again", "late", "later"]);
}

#[test]
fn empty_initialization_is_not_an_error() {
	let registry = FeatureSupportRegistry::default();
	registry.initialize(Vec::new());
	assert!(registry.providers().is_empty());

	let err = registry.resolve(&feature(Some(1), Some("string"))).unwrap_err();
	assert_eq!(err, RegistryError::UnsupportedFeature { name: "sentiment".into() });
	assert_eq!(err.to_string(), "Unsupported feature: [sentiment]");
	assert_eq!(registry.cached_len(), 0);
}

#[test]
fn classify_unset_type_never_consults_supports() {
	let support = CountingSupport::new("s", None, "string");
	let registry = FeatureSupportRegistry::with_supports(RegistryConfig::default(), [as_dyn(&support)]);

	assert_eq!(registry.classify(&feature(Some(1), None)), None);
	assert_eq!(support.asked(), 0);
}

#[test]
fn classify_returns_first_claiming_support() {
	let first = CountingSupport::new("first", Some(1), "number");
	let second = CountingSupport::new("second", Some(2), "string");
	let third = CountingSupport::new("third", Some(3), "string");
	let registry = FeatureSupportRegistry::with_supports(RegistryConfig::default(), [as_dyn(&third), as_dyn(&first), as_dyn(&second)]);

	let ft = registry.classify(&feature(None, Some("string"))).expect("claimed");
	assert_eq!(ft.support_id, "second");
	assert_eq!((first.asked(), second.asked(), third.asked()), (1, 1, 0));

	assert_eq!(registry.classify(&feature(None, Some("unknown"))), None);
}

#[test]
fn first_registered_policy_takes_head_regardless_of_type() {
	let registry = FeatureSupportRegistry::with_supports(
		RegistryConfig::default(),
		[Arc::new(PrimitiveFeatureSupport) as Arc<dyn FeatureSupport>, as_dyn(&CountingSupport::new("custom", Some(5), "custom"))],
	);

	let support = registry.resolve(&feature(None, Some("custom"))).expect("resolvable");
	assert_eq!(support.id(), "primitive");
}

#[test]
fn cached_resolution_survives_reinitialization() {
	let old = CountingSupport::new("old", None, "string");
	let registry = FeatureSupportRegistry::with_supports(RegistryConfig::default(), [as_dyn(&old)]);

	let persisted = feature(Some(42), Some("string"));
	let first = registry.resolve(&persisted).expect("resolvable");
	assert_eq!(registry.cached_len(), 1);

	let new = CountingSupport::new("new", None, "string");
	registry.initialize([as_dyn(&new)]);

	let again = registry.resolve(&persisted).expect("cached");
	assert!(Arc::ptr_eq(&first, &again));
	assert_eq!(again.id(), "old");

	// Unsaved features are resolved against the new set and never cached.
	let fresh = registry.resolve(&feature(None, Some("string"))).expect("resolvable");
	assert_eq!(fresh.id(), "new");
	assert_eq!(registry.cached_len(), 1);
}

#[test]
fn reinitializing_with_same_supports_keeps_order() {
	let a = as_dyn(&CountingSupport::new("a", Some(2), "a"));
	let b = as_dyn(&CountingSupport::new("b", Some(1), "b"));
	let registry = FeatureSupportRegistry::with_supports(RegistryConfig::default(), [a.clone(), b.clone()]);
	let before = registry.providers().ids().join(",");

	registry.initialize([a, b]);
	assert_eq!(registry.providers().ids().join(","), before);
}

#[test]
fn readers_keep_stale_set_across_reinitialization() {
	let registry = FeatureSupportRegistry::with_supports(RegistryConfig::default(), [as_dyn(&CountingSupport::new("old", None, "x"))]);
	let held = registry.providers();

	registry.initialize([as_dyn(&CountingSupport::new("new-1", None, "x")), as_dyn(&CountingSupport::new("new-2", None, "x"))]);

	assert_eq!(held.ids(), ["old"]);
	assert_eq!(registry.providers().ids(), ["new-1", "new-2"]);
}

#[test]
fn cache_hit_skips_provider_iteration() {
	let other = CountingSupport::new("other", Some(1), "number");
	let owner = CountingSupport::new("owner", Some(2), "string");
	let registry = FeatureSupportRegistry::with_supports(by_type(), [as_dyn(&owner), as_dyn(&other)]);

	let persisted = feature(Some(7), Some("string"));
	let first = registry.resolve(&persisted).expect("resolvable");
	assert_eq!(first.id(), "owner");
	assert_eq!((other.asked(), owner.asked()), (1, 1));

	for _ in 0..3 {
		let hit = registry.resolve(&persisted).expect("cached");
		assert!(Arc::ptr_eq(&first, &hit));
	}
	assert_eq!((other.asked(), owner.asked()), (1, 1));
}

#[test]
fn unpersisted_feature_is_resolved_every_time() {
	let owner = CountingSupport::new("owner", None, "string");
	let registry = FeatureSupportRegistry::with_supports(by_type(), [as_dyn(&owner)]);

	let unsaved = feature(None, Some("string"));
	registry.resolve(&unsaved).expect("resolvable");
	registry.resolve(&unsaved).expect("resolvable");

	assert_eq!(owner.asked(), 2);
	assert_eq!(registry.cached_len(), 0);
}

#[test]
fn by_feature_type_rejects_unclaimed_features() {
	let registry = FeatureSupportRegistry::with_supports(by_type(), [Arc::new(PrimitiveFeatureSupport) as Arc<dyn FeatureSupport>]);

	let err = registry.resolve(&feature(Some(3), Some("custom"))).unwrap_err();
	assert!(matches!(err, RegistryError::UnsupportedFeature { ref name } if name == "sentiment"));
	assert_eq!(registry.cached_len(), 0);
}

#[test]
fn concurrent_resolution_caches_one_support_per_identity() {
	let registry = Arc::new(FeatureSupportRegistry::with_supports(
		RegistryConfig::default(),
		[as_dyn(&CountingSupport::new("only", None, "string"))],
	));

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let registry = Arc::clone(&registry);
			std::thread::spawn(move || registry.resolve(&feature(Some(9), Some("string"))).map(|s| s.id().to_owned()))
		})
		.collect();

	for handle in handles {
		assert_eq!(handle.join().expect("thread").as_deref(), Ok("only"));
	}
	assert_eq!(registry.cached_len(), 1);
}
