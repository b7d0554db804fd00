//! Persistent-store contract for codebooks and features.
//!
//! A [`CodebookStore`] hands out a [`StoreTx`] for the duration of one
//! transaction. Uniqueness and referential constraints are the store's
//! responsibility; violations come back as [`StoreError::ConstraintViolation`].

mod memory;

use codebook_model::{Codebook, CodebookFeature, CodebookId, FeatureId, ProjectId};

pub use self::memory::MemoryStore;

/// Store-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	/// A uniqueness or referential constraint rejected the write.
	#[error("constraint violation: {0}")]
	ConstraintViolation(String),
	/// An update or delete targeted a row that does not exist.
	#[error("no such row: {0}")]
	NoSuchRow(String),
	/// The backing store could not be reached or failed internally.
	#[error("store unavailable: {0}")]
	Unavailable(String),
}

/// Codebook query within one project. Unset fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodebookFilter<'a> {
	pub name: Option<&'a str>,
	pub order: Option<i32>,
}

impl<'a> CodebookFilter<'a> {
	pub fn by_name(name: &'a str) -> Self {
		Self {
			name: Some(name),
			order: None,
		}
	}

	pub fn by_order(order: i32) -> Self {
		Self {
			name: None,
			order: Some(order),
		}
	}
}

/// Operations available inside one store transaction.
///
/// Query results are ordered as documented per method, with row identity as
/// the final tie-breaker so that repeated queries over unchanged data agree.
pub trait StoreTx {
	/// Inserts an unpersisted codebook and returns its new identity.
	fn insert_codebook(&mut self, codebook: &Codebook) -> Result<CodebookId, StoreError>;

	fn update_codebook(&mut self, codebook: &Codebook) -> Result<(), StoreError>;

	fn delete_codebook(&mut self, id: CodebookId) -> Result<(), StoreError>;

	fn codebook(&self, id: CodebookId) -> Result<Option<Codebook>, StoreError>;

	/// Codebooks of `project` matching `filter`, ascending by display order.
	fn codebooks(&self, project: ProjectId, filter: CodebookFilter<'_>) -> Result<Vec<Codebook>, StoreError>;

	/// Inserts an unpersisted feature and returns its new identity.
	fn insert_feature(&mut self, feature: &CodebookFeature) -> Result<FeatureId, StoreError>;

	fn update_feature(&mut self, feature: &CodebookFeature) -> Result<(), StoreError>;

	fn delete_feature(&mut self, id: FeatureId) -> Result<(), StoreError>;

	/// Features of `codebook`, optionally restricted to `name`, ascending by display name.
	fn codebook_features(&self, codebook: CodebookId, name: Option<&str>) -> Result<Vec<CodebookFeature>, StoreError>;

	/// Features of every codebook in `project`, ordered by codebook display
	/// name, then feature display name.
	fn project_features(&self, project: ProjectId) -> Result<Vec<CodebookFeature>, StoreError>;
}

/// A transactional store of codebooks and features.
pub trait CodebookStore: Send + Sync {
	/// Runs `f` in a transaction. Changes become visible only if `f` returns
	/// `Ok`; on `Err` nothing made through the transaction is kept.
	fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
	where
		F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
		E: From<StoreError>;
}

impl<S: CodebookStore> CodebookStore for std::sync::Arc<S> {
	fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
	where
		F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
		E: From<StoreError>,
	{
		(**self).transaction(f)
	}
}
