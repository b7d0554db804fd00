//! Codebook type-system generator.
//!
//! Loads a codebook definition into an in-memory schema store, generates the
//! annotation type system through the registered feature supports and prints
//! it as JSON.

mod definition;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use codebook_feature_registry::{FeatureSupport, FeatureSupportRegistry, PrimitiveFeatureSupport};
use codebook_schema::{MemoryStore, SchemaConfig, SchemaService, load_config};
use tracing::info;

use crate::definition::Definition;

#[derive(Parser, Debug)]
#[command(name = "codebook-gen")]
#[command(about = "Generate an annotation type system from a codebook definition")]
struct Args {
	/// Codebook definition file (TOML)
	#[arg(value_name = "DEFINITION")]
	definition: PathBuf,

	/// Schema configuration file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// List the active feature supports and exit
	#[arg(long)]
	list_supports: bool,

	/// Pretty-print the generated JSON
	#[arg(short, long)]
	pretty: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = match &args.config {
		Some(path) => load_config(path)?,
		None => SchemaConfig::default(),
	};
	info!(policy = ?config.registry.resolution_policy, "Loaded schema configuration");

	let registry = Arc::new(FeatureSupportRegistry::new(config.registry));
	registry.initialize(builtin_supports());

	if args.list_supports {
		for support in registry.providers().iter() {
			println!("{}\t{}", support.id(), support.order().map_or_else(|| "-".to_owned(), |o| o.to_string()));
		}
		return Ok(());
	}

	let input = std::fs::read_to_string(&args.definition).with_context(|| format!("failed to read {}", args.definition.display()))?;
	let definition = Definition::parse(&input)?;

	let service = SchemaService::new(MemoryStore::new(), registry);
	let project = definition.apply(&service)?;
	let tsd = service.generate_type_system(&project)?;
	info!(types = tsd.types.len(), project = %project.name, "Generated type system");

	let json = if args.pretty { serde_json::to_string_pretty(&tsd)? } else { serde_json::to_string(&tsd)? };
	println!("{json}");
	Ok(())
}

fn builtin_supports() -> Vec<Arc<dyn FeatureSupport>> {
	vec![Arc::new(PrimitiveFeatureSupport) as Arc<dyn FeatureSupport>]
}
