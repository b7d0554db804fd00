use std::sync::Arc;

use codebook_feature_registry::FeatureSupportRegistry;
use codebook_model::typesystem::ANNOTATION_TYPE;
use codebook_model::{Codebook, CodebookFeature, CodebookId, Project, TypeDescription, TypeSystemDescription};
use tracing::{debug, info, info_span};

use crate::error::{Result, SchemaError};
use crate::store::{CodebookFilter, CodebookStore};

/// Codebook and feature management over a [`CodebookStore`].
///
/// Each public operation runs in exactly one store transaction.
pub struct SchemaService<S> {
	store: S,
	registry: Arc<FeatureSupportRegistry>,
}

impl<S: CodebookStore> SchemaService<S> {
	pub fn new(store: S, registry: Arc<FeatureSupportRegistry>) -> Self {
		Self { store, registry }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn registry(&self) -> &Arc<FeatureSupportRegistry> {
		&self.registry
	}

	/// Inserts `codebook` if it has no identity yet, otherwise updates it.
	///
	/// On insert the assigned identity is written back into `codebook` after commit.
	pub fn create_codebook(&self, codebook: &mut Codebook) -> Result<()> {
		let row: &Codebook = codebook;
		let assigned = self.store.transaction(|tx| match row.id {
			None => tx.insert_codebook(row).map(Some),
			Some(_) => tx.update_codebook(row).map(|()| None),
		})?;
		if assigned.is_some() {
			codebook.id = assigned;
		}

		let project = &codebook.project;
		let _span = info_span!("project", project_id = project.id.get()).entered();
		info!(
			"Created codebook [{}]({}) in project [{}]({})",
			codebook.name,
			codebook.id.map_or(0, |id| id.get()),
			project.name,
			project.id.get()
		);
		Ok(())
	}

	/// Inserts `feature` if it has no identity yet, otherwise updates it.
	pub fn create_codebook_feature(&self, feature: &mut CodebookFeature) -> Result<()> {
		let row: &CodebookFeature = feature;
		let assigned = self.store.transaction(|tx| match row.id {
			None => tx.insert_feature(row).map(Some),
			Some(_) => tx.update_feature(row).map(|()| None),
		})?;
		if assigned.is_some() {
			feature.id = assigned;
		}
		Ok(())
	}

	pub fn exists_codebook(&self, name: &str, project: &Project) -> Result<bool> {
		let rows = self
			.store
			.transaction(|tx| tx.codebooks(project.id, CodebookFilter::by_name(name)))?;
		Ok(!rows.is_empty())
	}

	pub fn exists_feature(&self, name: &str, codebook: &Codebook) -> Result<bool> {
		let Some(id) = codebook.id else {
			return Ok(false);
		};
		let rows = self.store.transaction(|tx| tx.codebook_features(id, Some(name)))?;
		Ok(!rows.is_empty())
	}

	pub fn get_codebook(&self, id: CodebookId) -> Result<Codebook> {
		self.store
			.transaction(|tx| tx.codebook(id))?
			.ok_or_else(|| SchemaError::not_found("codebook", id))
	}

	/// Looks up the codebook at display position `order` in `project`.
	pub fn get_codebook_by_order(&self, order: i32, project: &Project) -> Result<Codebook> {
		let rows = self
			.store
			.transaction(|tx| tx.codebooks(project.id, CodebookFilter::by_order(order)))?;
		single(rows).ok_or_else(|| SchemaError::not_found("codebook", format_args!("order {order} in project [{}]", project.name)))
	}

	pub fn get_codebook_by_name(&self, name: &str, project: &Project) -> Result<Codebook> {
		let rows = self
			.store
			.transaction(|tx| tx.codebooks(project.id, CodebookFilter::by_name(name)))?;
		single(rows).ok_or_else(|| SchemaError::not_found("codebook", format_args!("[{name}] in project [{}]", project.name)))
	}

	pub fn get_codebook_feature(&self, name: &str, codebook: &Codebook) -> Result<CodebookFeature> {
		let rows = match codebook.id {
			Some(id) => self.store.transaction(|tx| tx.codebook_features(id, Some(name)))?,
			None => Vec::new(),
		};
		single(rows).ok_or_else(|| SchemaError::not_found("feature", format_args!("[{name}] in codebook [{}]", codebook.name)))
	}

	/// Codebooks of `project`, ascending by display order.
	pub fn list_codebooks(&self, project: &Project) -> Result<Vec<Codebook>> {
		Ok(self.store.transaction(|tx| tx.codebooks(project.id, CodebookFilter::default()))?)
	}

	/// Features of `codebook`, ascending by display name.
	///
	/// An absent or unpersisted codebook has no features; this is not an error.
	pub fn list_codebook_features(&self, codebook: Option<&Codebook>) -> Result<Vec<CodebookFeature>> {
		let Some(id) = codebook.and_then(|c| c.id) else {
			return Ok(Vec::new());
		};
		Ok(self.store.transaction(|tx| tx.codebook_features(id, None))?)
	}

	/// Features across all codebooks of `project`, ordered by codebook display
	/// name, then feature display name.
	pub fn list_project_features(&self, project: &Project) -> Result<Vec<CodebookFeature>> {
		Ok(self.store.transaction(|tx| tx.project_features(project.id))?)
	}

	/// Removes every feature of `codebook` in listing order, then the codebook.
	///
	/// Runs as one transaction: if any delete fails, nothing is removed.
	pub fn remove_codebook(&self, codebook: &Codebook) -> Result<()> {
		let Some(id) = codebook.id else {
			debug!(codebook = %codebook.name, "Skipping removal of unpersisted codebook");
			return Ok(());
		};

		self.store.transaction(|tx| {
			for feature in tx.codebook_features(id, None)? {
				if let Some(feature_id) = feature.id {
					tx.delete_feature(feature_id)?;
				}
			}
			tx.delete_codebook(id)
		})?;
		debug!(codebook = %codebook.name, "Removed codebook");
		Ok(())
	}

	pub fn remove_codebook_feature(&self, feature: &CodebookFeature) -> Result<()> {
		let Some(id) = feature.id else {
			return Ok(());
		};
		self.store.transaction(|tx| tx.delete_feature(id))?;
		Ok(())
	}

	/// Declares every feature of `codebook` on `td`, in listing order, through
	/// the support the registry resolves for it.
	pub fn generate_features(&self, tsd: &mut TypeSystemDescription, td: &mut TypeDescription, codebook: &Codebook) -> Result<()> {
		for feature in self.list_codebook_features(Some(codebook))? {
			let support = self.registry.resolve(&feature)?;
			support.generate_feature(tsd, td, &feature);
		}
		Ok(())
	}

	/// Builds the type system for `project`: one annotation type per codebook,
	/// in display order, each carrying its generated features.
	pub fn generate_type_system(&self, project: &Project) -> Result<TypeSystemDescription> {
		let mut tsd = TypeSystemDescription::new();
		for codebook in self.list_codebooks(project)? {
			let mut td = TypeDescription::new(codebook.name.as_str(), codebook.description.clone(), ANNOTATION_TYPE);
			self.generate_features(&mut tsd, &mut td, &codebook)?;
			tsd.add_type(td);
		}
		Ok(tsd)
	}
}

/// First row of a lookup expected to match at most one.
fn single<T>(rows: Vec<T>) -> Option<T> {
	rows.into_iter().next()
}
