use serde::{Deserialize, Serialize};

use crate::id::{CodebookId, ProjectId};

/// Project that owns codebooks. Read-only from this crate's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub name: String,
}

impl Project {
	pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
		Self { id, name: name.into() }
	}
}

/// A named, ordered coding scheme belonging to a [`Project`].
///
/// `name` and `order` are unique within the owning project. The identity is
/// absent until the codebook has been written to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codebook {
	pub id: Option<CodebookId>,
	pub name: String,
	/// Display name, used as the primary sort key for project-wide feature listings.
	pub ui_name: String,
	pub description: Option<String>,
	/// Display order index within the project.
	pub order: i32,
	pub project: Project,
}

impl Codebook {
	/// Creates an unpersisted codebook whose display name equals its name.
	pub fn new(project: Project, name: impl Into<String>, order: i32) -> Self {
		let name = name.into();
		Self {
			id: None,
			ui_name: name.clone(),
			name,
			description: None,
			order,
			project,
		}
	}

	pub fn with_ui_name(mut self, ui_name: impl Into<String>) -> Self {
		self.ui_name = ui_name.into();
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Returns true once the codebook has been assigned an identity by a store.
	#[inline]
	pub fn is_persisted(&self) -> bool {
		self.id.is_some()
	}
}
