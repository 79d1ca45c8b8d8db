use std::path::PathBuf;

use wrapreg::wrap::{ExtraFields, Result, TypeDescriptor};

use crate::cmd::util::{emit_json, load_registry};

#[derive(clap::Args)]
pub struct Args {
	/// Schema manifest declaring additional types.
	#[arg(long)]
	pub schema: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// List every registered type with its declared fields.
pub fn run(args: Args) -> Result<()> {
	let registry = load_registry(args.schema.as_deref())?;

	if args.json {
		let payload = TypesJson {
			types: registry
				.iter()
				.map(|def| TypeJson {
					descriptor: def.descriptor().clone(),
					extra: def.schema().extra(),
					fields: def
						.schema()
						.fields()
						.iter()
						.map(|decl| FieldJson {
							name: decl.name.to_string(),
							kind: decl.kind.to_string(),
						})
						.collect(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("types: {}", registry.len());
	for def in registry.iter() {
		let extra = match def.schema().extra() {
			ExtraFields::Reject => "reject",
			ExtraFields::Keep => "keep",
		};
		println!("{} (fields={}, extra={extra})", def.descriptor(), def.schema().fields().len());
		for decl in def.schema().fields() {
			println!("  {}: {}", decl.name, decl.kind);
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct TypesJson {
	types: Vec<TypeJson>,
}

#[derive(serde::Serialize)]
struct TypeJson {
	#[serde(rename = "type")]
	descriptor: TypeDescriptor,
	extra: ExtraFields,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	kind: String,
}
