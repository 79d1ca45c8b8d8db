use thiserror::Error;

use crate::wrap::TypeDescriptor;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WrapError>;

/// Errors produced while registering, assigning, and (de)serializing wrapped objects.
#[derive(Debug, Error)]
pub enum WrapError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input bytes were not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Descriptor text or parts are malformed.
	#[error("invalid type descriptor: {text:?}")]
	InvalidDescriptor {
		/// Offending descriptor text.
		text: String,
	},
	/// Descriptor already registered with a different definition.
	#[error("type {descriptor} already registered with a different definition")]
	DuplicateType {
		/// Conflicting descriptor.
		descriptor: TypeDescriptor,
	},
	/// No registered type matches a descriptor.
	#[error("unknown type {descriptor}{}", at_path(.path))]
	UnknownType {
		/// Requested descriptor.
		descriptor: TypeDescriptor,
		/// Field path that referenced the type, if any.
		path: Option<String>,
	},
	/// Value cannot be coerced to a field's declared kind.
	#[error("field type mismatch at {path}: expected {expected}, got {got}")]
	FieldTypeMismatch {
		/// Field path of the offending value.
		path: String,
		/// Declared kind.
		expected: String,
		/// Actual value kind.
		got: String,
	},
	/// Field is not declared on a type that rejects extra fields.
	#[error("unknown field {path} on {descriptor}")]
	UnknownField {
		/// Field path of the undeclared field.
		path: String,
		/// Type that rejected it.
		descriptor: TypeDescriptor,
	},
	/// Constructor produced an object of another type.
	#[error("constructor for {expected} produced {got}")]
	ConstructorTypeMismatch {
		/// Descriptor the constructor was registered under.
		expected: TypeDescriptor,
		/// Type label of the produced object.
		got: String,
	},
	/// Float value has no JSON representation.
	#[error("non-finite number at {path}")]
	NonFiniteNumber {
		/// Field path of the offending value.
		path: String,
	},
	/// Tagged serialization of an object without a descriptor.
	#[error("cannot tag untyped object")]
	UntypedObject,
	/// Tagged envelope is missing or has malformed keys.
	#[error("invalid tagged envelope: {reason}")]
	InvalidEnvelope {
		/// What was wrong with the envelope.
		reason: &'static str,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded at {path} (max={max_depth})")]
	DepthExceeded {
		/// Field path where the limit was hit.
		path: String,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// List length exceeded configured limit.
	#[error("list too large at {path}: count={count}, max={max}")]
	ListTooLarge {
		/// Field path of the list.
		path: String,
		/// Input list length.
		count: usize,
		/// Maximum permitted length.
		max: usize,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Path expression did not resolve against a value.
	#[error("field path not found: {path}")]
	FieldPathNotFound {
		/// Path that failed to resolve.
		path: String,
	},
	/// Unknown leading bytes in an input document.
	#[error("unsupported compression or not a JSON document (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Schema manifest declared an unrecognized field kind.
	#[error("invalid field kind {kind:?} for {field}")]
	InvalidFieldKind {
		/// Field the kind was declared for.
		field: String,
		/// Offending kind text.
		kind: String,
	},
}

fn at_path(path: &Option<String>) -> String {
	match path {
		Some(path) => format!(" at {path}"),
		None => String::new(),
	}
}
