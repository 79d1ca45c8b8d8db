use std::path::PathBuf;

use wrapreg::wrap::Result;

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
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode a document and report whether it conforms.
pub fn run(args: Args) -> Result<()> {
	let registry = load_registry(args.schema.as_deref())?;
	let (compression, object) = decode_document(&registry, args.type_name.as_deref(), &args.data, &args.decode.options())?;

	if args.json {
		return emit_json(&CheckJson {
			ok: true,
			path: args.data.display().to_string(),
			r#type: object.type_label(),
			fields: object.len(),
			compression: compression.as_str(),
		});
	}

	println!("ok: {} (fields={}, compression={})", object.type_label(), object.len(), compression.as_str());
	Ok(())
}

#[derive(serde::Serialize)]
struct CheckJson {
	ok: bool,
	path: String,
	r#type: String,
	fields: usize,
	compression: &'static str,
}
