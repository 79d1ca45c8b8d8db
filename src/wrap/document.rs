use std::fs;
use std::path::Path;

use crate::wrap::compression::decode_bytes;
use crate::wrap::{Compression, Result};

/// Read a plain or zstd-compressed JSON document into a primitive tree.
pub fn read_tree(path: impl AsRef<Path>) -> Result<(Compression, serde_json::Value)> {
	let raw = fs::read(path)?;
	tree_from_bytes(raw)
}

/// Parse plain or zstd-compressed JSON bytes into a primitive tree.
pub fn tree_from_bytes(raw: Vec<u8>) -> Result<(Compression, serde_json::Value)> {
	let (compression, bytes) = decode_bytes(raw)?;
	let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(&bytes);
	let tree = serde_json::from_slice(bytes)?;
	Ok((compression, tree))
}
