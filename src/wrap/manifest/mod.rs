use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::wrap::{ExtraFields, FieldKind, RegistryBuilder, Result, TypeDef, TypeDescriptor, TypeSchema, WrapError, read_tree};

/// Declarative list of types loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaManifest {
	/// Declared types, registered in order.
	pub types: Vec<TypeSpec>,
}

/// One declared type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
	/// Dotted namespace path.
	pub module: String,
	/// Type name.
	pub name: String,
	/// Declared fields by name.
	#[serde(default)]
	pub fields: BTreeMap<String, FieldKindSpec>,
	/// Undeclared-field policy.
	#[serde(default)]
	pub extra: ExtraFields,
}

/// Manifest spelling of a field kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldKindSpec {
	/// `"string"`, `"number"`, `"integer"`, `"bool"`, or `"any"`.
	Named(String),
	/// `{"type": "namespace.path.Name"}`.
	Object {
		/// Qualified type name.
		#[serde(rename = "type")]
		type_name: String,
	},
	/// `{"list": <kind>}`.
	List {
		/// Element kind.
		list: Box<FieldKindSpec>,
	},
}

impl FieldKindSpec {
	/// Resolve to a schema kind; `field` names the declaring field in errors.
	pub fn to_kind(&self, field: &str) -> Result<FieldKind> {
		match self {
			Self::Named(name) => match name.as_str() {
				"string" => Ok(FieldKind::STRING),
				"number" => Ok(FieldKind::NUMBER),
				"integer" => Ok(FieldKind::INTEGER),
				"bool" => Ok(FieldKind::BOOL),
				"any" => Ok(FieldKind::Any),
				other => Err(WrapError::InvalidFieldKind {
					field: field.to_owned(),
					kind: other.to_owned(),
				}),
			},
			Self::Object { type_name } => Ok(FieldKind::Object(TypeDescriptor::parse_qualified(type_name)?)),
			Self::List { list } => Ok(FieldKind::list(list.to_kind(field)?)),
		}
	}
}

impl TypeSpec {
	/// Build a definition with an empty-object constructor.
	pub fn to_type_def(&self) -> Result<TypeDef> {
		let descriptor = TypeDescriptor::new(self.name.clone(), self.module.clone())?;
		let mut schema = TypeSchema::marker().with_extra(self.extra);
		for (name, spec) in &self.fields {
			let field = format!("{descriptor}.{name}");
			schema = schema.field(name, spec.to_kind(&field)?);
		}
		Ok(TypeDef::with_schema(descriptor, schema))
	}
}

impl SchemaManifest {
	/// Parse a manifest from an already-loaded primitive tree.
	pub fn from_tree(tree: serde_json::Value) -> Result<Self> {
		Ok(serde_json::from_value(tree)?)
	}

	/// Load a plain or zstd-compressed manifest file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let (_, tree) = read_tree(path)?;
		Self::from_tree(tree)
	}

	/// Register every declared type into a builder.
	pub fn register_into(&self, builder: &mut RegistryBuilder) -> Result<()> {
		for spec in &self.types {
			builder.register(spec.to_type_def()?)?;
		}
		tracing::debug!(types = self.types.len(), "manifest registered");
		Ok(())
	}
}
