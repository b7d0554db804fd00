use codebook_feature_registry::RegistryError;

use crate::store::StoreError;

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;

/// Errors surfaced by [`SchemaService`](crate::SchemaService) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	/// A point lookup matched no row.
	#[error("{entity} not found: {key}")]
	NotFound { entity: &'static str, key: String },

	/// No feature support could be resolved for a feature.
	#[error(transparent)]
	Unsupported(#[from] RegistryError),

	/// The store rejected or failed the operation.
	#[error(transparent)]
	Store(#[from] StoreError),
}

impl SchemaError {
	pub(crate) fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
		Self::NotFound {
			entity,
			key: key.to_string(),
		}
	}

	/// Returns true if the store rejected a write on uniqueness or referential grounds.
	pub fn is_constraint_violation(&self) -> bool {
		matches!(self, Self::Store(StoreError::ConstraintViolation(_)))
	}
}
