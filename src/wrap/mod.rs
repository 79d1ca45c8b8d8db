mod builtin;
mod codec;
mod coerce;
mod compression;
mod descriptor;
mod document;
mod error;
mod manifest;
mod path;
mod registry;
mod schema;
mod value;

/// Built-in type declarations.
pub use builtin::{GAUGE_STEP_LINE, register_builtins};
/// Primitive-tree serialization entry points and options.
pub use codec::{DecodeOptions, TYPE_KEY, VALUE_KEY, deserialize, deserialize_tagged, deserialize_with, serialize, serialize_tagged, serialize_value};
/// Compression detection result.
pub use compression::Compression;
/// Serializable type identity.
pub use descriptor::TypeDescriptor;
/// Document loading helpers.
pub use document::{read_tree, tree_from_bytes};
/// Error and result aliases.
pub use error::{Result, WrapError};
/// Schema manifest representation and loader.
pub use manifest::{FieldKindSpec, SchemaManifest, TypeSpec};
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Type registration and lookup.
pub use registry::{Constructor, Registry, RegistryBuilder, TypeDef};
/// Field schema types.
pub use schema::{ExtraFields, FieldDecl, FieldKind, PrimitiveKind, TypeSchema};
/// Wrapped runtime value types.
pub use value::{FieldValue, Value, WrappedList, WrappedObject};

#[cfg(test)]
mod test_support;
