use std::path::Path;

use wrapreg::wrap::{Compression, DecodeOptions, Registry, Result, SchemaManifest, TypeDescriptor, WrappedObject, deserialize_tagged, deserialize_with, read_tree, register_builtins};

/// Decode limits shared by commands that read documents.
#[derive(clap::Args, Debug, Clone)]
pub struct DecodeArgs {
	/// Maximum object/list nesting depth.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Maximum list length.
	#[arg(long = "max-list")]
	pub max_list: Option<usize>,
	/// Reject integral floats for integer fields.
	#[arg(long)]
	pub strict: bool,
}

impl DecodeArgs {
	pub(crate) fn options(&self) -> DecodeOptions {
		let mut options = if self.strict { DecodeOptions::strict() } else { DecodeOptions::default() };
		if let Some(max_depth) = self.max_depth {
			options.max_depth = max_depth;
		}
		if let Some(max_list) = self.max_list {
			options.max_list_items = max_list;
		}
		options
	}
}

/// Built-in types plus an optional schema manifest, frozen into a registry.
pub(crate) fn load_registry(schema: Option<&Path>) -> Result<Registry> {
	let mut builder = Registry::builder();
	register_builtins(&mut builder)?;
	if let Some(path) = schema {
		SchemaManifest::load(path)?.register_into(&mut builder)?;
	}
	builder.build()
}

/// Read and decode a document, either as `type_name` or as a tagged envelope.
pub(crate) fn decode_document(registry: &Registry, type_name: Option<&str>, data: &Path, options: &DecodeOptions) -> Result<(Compression, WrappedObject)> {
	let (compression, tree) = read_tree(data)?;
	let object = match type_name {
		Some(text) => {
			let descriptor = TypeDescriptor::parse_qualified(text)?;
			deserialize_with(registry, &descriptor, &tree, options)?
		}
		None => deserialize_tagged(registry, &tree, options)?,
	};
	Ok((compression, object))
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json(payload: &impl serde::Serialize) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
