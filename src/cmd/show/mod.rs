use std::path::PathBuf;

use wrapreg::wrap::{FieldPath, Result, Value, WrapError, serialize_tagged, serialize_value};

use crate::cmd::print::{PrintOptions, render_value};
use crate::cmd::util::{DecodeArgs, decode_document, emit_json, load_registry};

#[derive(clap::Args)]
pub struct Args {
	pub data: PathBuf,
	/// Schema manifest declaring additional types.
	#[arg(long)]
	pub schema: Option<PathBuf>,
	/// Qualified type of the document; omitted for tagged envelopes.
	#[arg(long = "type")]
	pub type_name: Option<String>,
	/// Field path to print instead of the whole object.
	#[arg(long = "path")]
	pub path_expr: Option<String>,
	#[arg(long)]
	pub json: bool,
	/// Emit the JSON value as a `{"$type", "$value"}` envelope.
	#[arg(long, requires = "json", conflicts_with = "path_expr")]
	pub tagged: bool,
	#[arg(long = "max-array", default_value_t = 16)]
	pub max_array: usize,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode a document and print the wrapped tree or its re-serialized JSON.
pub fn run(args: Args) -> Result<()> {
	let Args {
		data,
		schema,
		type_name,
		path_expr,
		json,
		tagged,
		max_array,
		decode,
	} = args;

	let registry = load_registry(schema.as_deref())?;
	let (compression, object) = decode_document(&registry, type_name.as_deref(), &data, &decode.options())?;

	let selected = match &path_expr {
		Some(expr) => {
			let path = FieldPath::parse(expr)?;
			object.lookup(&path).cloned().ok_or_else(|| WrapError::FieldPathNotFound { path: expr.clone() })?
		}
		None => Value::Object(object.clone()),
	};

	if json {
		let value = if tagged { serialize_tagged(&object)? } else { serialize_value(&selected)? };
		return emit_json(&ShowJson {
			path: data.display().to_string(),
			r#type: object.type_label(),
			compression: compression.as_str(),
			path_expr,
			value,
		});
	}

	println!("path: {}", data.display());
	println!("type: {}", object.type_label());
	println!("compression: {}", compression.as_str());
	if let Some(expr) = &path_expr {
		println!("field: {expr}");
	}
	print!(
		"{}",
		render_value(
			&selected,
			PrintOptions {
				max_list_items: max_array,
				..PrintOptions::default()
			}
		)
	);

	Ok(())
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	r#type: String,
	compression: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	path_expr: Option<String>,
	value: serde_json::Value,
}
