use std::fmt;

use crate::wrap::{Result, WrapError};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named object field.
	Field(String),
	/// Select a list element by zero-based index.
	Index(usize),
}

/// Parsed field path expression.
///
/// Also used as a cursor while walking trees, so errors can name the failing location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Empty path addressing the root object.
	pub fn root() -> Self {
		Self::default()
	}

	/// Parse dotted field syntax with optional `[index]` selectors.
	///
	/// Keys that are not plain identifiers (`line-width`, `$type`, ...) are written as quoted selectors,
	/// e.g. `meta["line-width"]`; `\"` and `\\` escape inside the quotes.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || WrapError::InvalidFieldPath { path: input.to_owned() };
		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			match bytes[idx] {
				b'[' if idx + 1 < bytes.len() && bytes[idx + 1] == b'"' => {
					let (key, next) = parse_quoted(input, idx + 2).ok_or_else(invalid)?;
					steps.push(PathStep::Field(key));
					idx = next;
				}
				b'[' if !steps.is_empty() => {
					idx += 1;
					let n_start = idx;
					while idx < bytes.len() && bytes[idx].is_ascii_digit() {
						idx += 1;
					}
					if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
						return Err(invalid());
					}
					let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
					steps.push(PathStep::Index(number));
					idx += 1;
				}
				b'.' if !steps.is_empty() => {
					idx += 1;
					let end = identifier_end(bytes, idx);
					if end == idx {
						return Err(invalid());
					}
					steps.push(PathStep::Field(input[idx..end].to_owned()));
					idx = end;
				}
				_ if steps.is_empty() => {
					let end = identifier_end(bytes, idx);
					if end == idx {
						return Err(invalid());
					}
					steps.push(PathStep::Field(input[idx..end].to_owned()));
					idx = end;
				}
				_ => return Err(invalid()),
			}
		}

		if steps.is_empty() {
			return Err(invalid());
		}
		Ok(Self { steps })
	}

	/// Whether the path addresses the root.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Append a field step.
	pub fn push_field(&mut self, name: &str) {
		self.steps.push(PathStep::Field(name.to_owned()));
	}

	/// Append an index step.
	pub fn push_index(&mut self, index: usize) {
		self.steps.push(PathStep::Index(index));
	}

	/// Remove the last step.
	pub fn pop(&mut self) {
		self.steps.pop();
	}

	/// Copy of this path extended by one field step.
	pub fn child(&self, name: &str) -> Self {
		let mut out = self.clone();
		out.push_field(name);
		out
	}
}

fn is_identifier_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}

fn identifier_end(bytes: &[u8], start: usize) -> usize {
	let mut idx = start;
	while idx < bytes.len() && is_identifier_byte(bytes[idx]) {
		idx += 1;
	}
	idx
}

/// Key text of a `"..."]` selector starting after the opening quote, and the offset past `]`.
fn parse_quoted(input: &str, start: usize) -> Option<(String, usize)> {
	let mut key = String::new();
	let mut chars = input[start..].char_indices();
	while let Some((offset, ch)) = chars.next() {
		match ch {
			'\\' => match chars.next() {
				Some((_, escaped @ ('"' | '\\'))) => key.push(escaped),
				_ => return None,
			},
			'"' => {
				let close = start + offset + 1;
				return (input.as_bytes().get(close) == Some(&b']')).then_some((key, close + 1));
			}
			other => key.push(other),
		}
	}
	None
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.steps.is_empty() {
			return f.write_str("<root>");
		}
		for (idx, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Field(name) if name.is_empty() || !name.bytes().all(is_identifier_byte) => {
					write!(f, "[\"{}\"]", name.replace('\\', "\\\\").replace('"', "\\\""))?
				}
				PathStep::Field(name) if idx == 0 => f.write_str(name)?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}
