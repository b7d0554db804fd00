use serde::{Deserialize, Serialize};

use crate::codebook::Codebook;
use crate::id::{CodebookId, FeatureId, ProjectId};

/// A typed attribute attached to exactly one [`Codebook`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebookFeature {
	pub id: Option<FeatureId>,
	/// Unique within the owning codebook.
	pub name: String,
	pub ui_name: String,
	pub description: Option<String>,
	/// Declared type string, e.g. `uima.cas.String`. Unset means "no opinion".
	#[serde(rename = "type")]
	pub type_name: Option<String>,
	pub codebook: CodebookId,
	pub project: ProjectId,
}

impl CodebookFeature {
	/// Creates an unpersisted feature owned by `codebook`.
	///
	/// Returns `None` when the codebook itself has not been persisted, since a
	/// feature cannot reference a codebook without an identity.
	pub fn new(codebook: &Codebook, name: impl Into<String>, type_name: impl Into<String>) -> Option<Self> {
		let name = name.into();
		Some(Self {
			id: None,
			ui_name: name.clone(),
			name,
			description: None,
			type_name: Some(type_name.into()),
			codebook: codebook.id?,
			project: codebook.project.id,
		})
	}

	pub fn with_ui_name(mut self, ui_name: impl Into<String>) -> Self {
		self.ui_name = ui_name.into();
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Returns true once the feature has been assigned an identity by a store.
	#[inline]
	pub fn is_persisted(&self) -> bool {
		self.id.is_some()
	}
}

/// How a declared type string is interpreted, as answered by a feature support.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureType {
	/// The declared type this answer applies to.
	pub name: String,
	/// Human-readable label for editors.
	pub ui_name: String,
	/// Identifier of the feature support that claimed the type.
	pub support_id: String,
}

impl FeatureType {
	pub fn new(name: impl Into<String>, ui_name: impl Into<String>, support_id: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			ui_name: ui_name.into(),
			support_id: support_id.into(),
		}
	}
}
