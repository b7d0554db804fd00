//! Codebook definition files.
//!
//! ```toml
//! [project]
//! id = 1
//! name = "interviews"
//!
//! [[codebooks]]
//! name = "webanno.codebook.Topic"
//! ui-name = "Topic"
//! order = 1
//!
//! [[codebooks.features]]
//! name = "topic"
//! type = "uima.cas.String"
//! ```

use anyhow::{Context, Result, bail};
use codebook_model::{Codebook, CodebookFeature, Project, ProjectId};
use codebook_schema::{CodebookStore, SchemaService};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
	pub project: ProjectDef,
	#[serde(default)]
	pub codebooks: Vec<CodebookDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDef {
	pub id: u64,
	pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CodebookDef {
	pub name: String,
	pub ui_name: Option<String>,
	pub description: Option<String>,
	pub order: i32,
	#[serde(default)]
	pub features: Vec<FeatureDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FeatureDef {
	pub name: String,
	pub ui_name: Option<String>,
	pub description: Option<String>,
	#[serde(rename = "type")]
	pub type_name: Option<String>,
}

impl Definition {
	pub fn parse(input: &str) -> Result<Self> {
		toml::from_str(input).context("invalid codebook definition")
	}

	pub fn project(&self) -> Project {
		Project::new(ProjectId(self.project.id), self.project.name.as_str())
	}

	/// Writes every codebook and feature through `service`, rejecting names
	/// that are already taken.
	pub fn apply<S: CodebookStore>(&self, service: &SchemaService<S>) -> Result<Project> {
		let project = self.project();
		for def in &self.codebooks {
			if service.exists_codebook(&def.name, &project)? {
				bail!("codebook [{}] is defined twice", def.name);
			}

			let mut codebook = Codebook::new(project.clone(), def.name.as_str(), def.order);
			if let Some(ui_name) = &def.ui_name {
				codebook.ui_name = ui_name.clone();
			}
			codebook.description = def.description.clone();
			service
				.create_codebook(&mut codebook)
				.with_context(|| format!("cannot create codebook [{}]", def.name))?;

			for feature_def in &def.features {
				if service.exists_feature(&feature_def.name, &codebook)? {
					bail!("feature [{}] is defined twice in codebook [{}]", feature_def.name, def.name);
				}
				let Some(mut feature) = CodebookFeature::new(&codebook, feature_def.name.as_str(), "") else {
					bail!("codebook [{}] was not persisted", def.name);
				};
				feature.type_name = feature_def.type_name.clone();
				if let Some(ui_name) = &feature_def.ui_name {
					feature.ui_name = ui_name.clone();
				}
				feature.description = feature_def.description.clone();

				if service.registry().classify(&feature).is_none() {
					debug!(feature = %feature.name, type_name = ?feature.type_name, "No feature support claims declared type");
				}
				service
					.create_codebook_feature(&mut feature)
					.with_context(|| format!("cannot create feature [{}] in codebook [{}]", feature_def.name, def.name))?;
			}
		}
		Ok(project)
	}
}
