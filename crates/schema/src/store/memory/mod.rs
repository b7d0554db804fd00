use std::collections::BTreeMap;

use codebook_model::{Codebook, CodebookFeature, CodebookId, FeatureId, ProjectId};
use parking_lot::Mutex;

use super::{CodebookFilter, CodebookStore, StoreError, StoreTx};

#[derive(Debug, Clone, Default)]
struct Tables {
	next_codebook: u64,
	next_feature: u64,
	codebooks: BTreeMap<CodebookId, Codebook>,
	features: BTreeMap<FeatureId, CodebookFeature>,
}

/// In-process store with the same constraints a relational backend enforces.
///
/// Transactions are serialized and run against a working copy of the tables,
/// which replaces the committed state only when the transaction succeeds.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: Mutex<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of committed (codebook, feature) rows.
	pub fn row_counts(&self) -> (usize, usize) {
		let tables = self.tables.lock();
		(tables.codebooks.len(), tables.features.len())
	}
}

impl CodebookStore for MemoryStore {
	fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
	where
		F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
		E: From<StoreError>,
	{
		let mut committed = self.tables.lock();
		let mut work = committed.clone();
		let out = f(&mut MemoryTx { tables: &mut work })?;
		*committed = work;
		Ok(out)
	}
}

struct MemoryTx<'a> {
	tables: &'a mut Tables,
}

impl MemoryTx<'_> {
	fn check_codebook(&self, codebook: &Codebook) -> Result<(), StoreError> {
		let project = codebook.project.id;
		for other in self.tables.codebooks.values() {
			if other.project.id != project || other.id == codebook.id {
				continue;
			}
			if other.name == codebook.name {
				return Err(StoreError::ConstraintViolation(format!(
					"codebook name [{}] already used in project {}",
					codebook.name, project
				)));
			}
			if other.order == codebook.order {
				return Err(StoreError::ConstraintViolation(format!(
					"codebook order {} already used in project {} by [{}]",
					codebook.order, project, other.name
				)));
			}
		}
		Ok(())
	}

	fn check_feature(&self, feature: &CodebookFeature) -> Result<(), StoreError> {
		if !self.tables.codebooks.contains_key(&feature.codebook) {
			return Err(StoreError::ConstraintViolation(format!(
				"feature [{}] references missing {}",
				feature.name, feature.codebook
			)));
		}
		let duplicate = self
			.tables
			.features
			.values()
			.any(|other| other.codebook == feature.codebook && other.id != feature.id && other.name == feature.name);
		if duplicate {
			return Err(StoreError::ConstraintViolation(format!(
				"feature name [{}] already used in {}",
				feature.name, feature.codebook
			)));
		}
		Ok(())
	}

	fn codebook_ui_name(&self, id: CodebookId) -> &str {
		self.tables.codebooks.get(&id).map_or("", |c| c.ui_name.as_str())
	}
}

impl StoreTx for MemoryTx<'_> {
	fn insert_codebook(&mut self, codebook: &Codebook) -> Result<CodebookId, StoreError> {
		if codebook.is_persisted() {
			return Err(StoreError::ConstraintViolation(format!("codebook [{}] is already persisted", codebook.name)));
		}
		self.check_codebook(codebook)?;
		self.tables.next_codebook += 1;
		let id = CodebookId(self.tables.next_codebook);
		let mut row = codebook.clone();
		row.id = Some(id);
		self.tables.codebooks.insert(id, row);
		Ok(id)
	}

	fn update_codebook(&mut self, codebook: &Codebook) -> Result<(), StoreError> {
		let id = codebook
			.id
			.filter(|id| self.tables.codebooks.contains_key(id))
			.ok_or_else(|| StoreError::NoSuchRow(format!("codebook [{}]", codebook.name)))?;
		self.check_codebook(codebook)?;
		self.tables.codebooks.insert(id, codebook.clone());
		Ok(())
	}

	fn delete_codebook(&mut self, id: CodebookId) -> Result<(), StoreError> {
		if let Some(feature) = self.tables.features.values().find(|f| f.codebook == id) {
			return Err(StoreError::ConstraintViolation(format!(
				"{id} is still referenced by feature [{}]",
				feature.name
			)));
		}
		self.tables
			.codebooks
			.remove(&id)
			.map(drop)
			.ok_or_else(|| StoreError::NoSuchRow(id.to_string()))
	}

	fn codebook(&self, id: CodebookId) -> Result<Option<Codebook>, StoreError> {
		Ok(self.tables.codebooks.get(&id).cloned())
	}

	fn codebooks(&self, project: ProjectId, filter: CodebookFilter<'_>) -> Result<Vec<Codebook>, StoreError> {
		let mut rows: Vec<Codebook> = self
			.tables
			.codebooks
			.values()
			.filter(|c| c.project.id == project)
			.filter(|c| filter.name.is_none_or(|name| c.name == name))
			.filter(|c| filter.order.is_none_or(|order| c.order == order))
			.cloned()
			.collect();
		rows.sort_by_key(|c| (c.order, c.id));
		Ok(rows)
	}

	fn insert_feature(&mut self, feature: &CodebookFeature) -> Result<FeatureId, StoreError> {
		if feature.is_persisted() {
			return Err(StoreError::ConstraintViolation(format!("feature [{}] is already persisted", feature.name)));
		}
		self.check_feature(feature)?;
		self.tables.next_feature += 1;
		let id = FeatureId(self.tables.next_feature);
		let mut row = feature.clone();
		row.id = Some(id);
		self.tables.features.insert(id, row);
		Ok(id)
	}

	fn update_feature(&mut self, feature: &CodebookFeature) -> Result<(), StoreError> {
		let id = feature
			.id
			.filter(|id| self.tables.features.contains_key(id))
			.ok_or_else(|| StoreError::NoSuchRow(format!("feature [{}]", feature.name)))?;
		self.check_feature(feature)?;
		self.tables.features.insert(id, feature.clone());
		Ok(())
	}

	fn delete_feature(&mut self, id: FeatureId) -> Result<(), StoreError> {
		self.tables
			.features
			.remove(&id)
			.map(drop)
			.ok_or_else(|| StoreError::NoSuchRow(id.to_string()))
	}

	fn codebook_features(&self, codebook: CodebookId, name: Option<&str>) -> Result<Vec<CodebookFeature>, StoreError> {
		let mut rows: Vec<CodebookFeature> = self
			.tables
			.features
			.values()
			.filter(|f| f.codebook == codebook && name.is_none_or(|name| f.name == name))
			.cloned()
			.collect();
		rows.sort_by(|a, b| a.ui_name.cmp(&b.ui_name).then(a.id.cmp(&b.id)));
		Ok(rows)
	}

	fn project_features(&self, project: ProjectId) -> Result<Vec<CodebookFeature>, StoreError> {
		let mut rows: Vec<&CodebookFeature> = self.tables.features.values().filter(|f| f.project == project).collect();
		rows.sort_by(|a, b| {
			self.codebook_ui_name(a.codebook)
				.cmp(self.codebook_ui_name(b.codebook))
				.then_with(|| a.ui_name.cmp(&b.ui_name))
				.then(a.id.cmp(&b.id))
		});
		Ok(rows.into_iter().cloned().collect())
	}
}
