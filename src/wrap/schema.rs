use std::fmt;

use crate::wrap::TypeDescriptor;

static ANY_KIND: FieldKind = FieldKind::Any;

/// Scalar kinds a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
	/// UTF-8 string.
	String,
	/// Any finite number.
	Number,
	/// Whole number.
	Integer,
	/// Boolean.
	Bool,
}

impl PrimitiveKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Number => "number",
			Self::Integer => "integer",
			Self::Bool => "bool",
		}
	}
}

/// Declared kind of a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
	/// Scalar of one primitive kind.
	Primitive(PrimitiveKind),
	/// Nested object of a registered type.
	Object(TypeDescriptor),
	/// Ordered list whose elements all have the inner kind.
	List(Box<FieldKind>),
	/// Untyped dynamic data: primitives, untyped objects, and lists thereof.
	Any,
}

impl FieldKind {
	/// `string` kind.
	pub const STRING: Self = Self::Primitive(PrimitiveKind::String);
	/// `number` kind.
	pub const NUMBER: Self = Self::Primitive(PrimitiveKind::Number);
	/// `integer` kind.
	pub const INTEGER: Self = Self::Primitive(PrimitiveKind::Integer);
	/// `bool` kind.
	pub const BOOL: Self = Self::Primitive(PrimitiveKind::Bool);

	/// List of the given element kind.
	pub fn list(inner: FieldKind) -> Self {
		Self::List(Box::new(inner))
	}

	/// Call `visit` for every type this kind references, including through lists.
	pub fn visit_refs<'a>(&'a self, visit: &mut impl FnMut(&'a TypeDescriptor)) {
		match self {
			Self::Object(descriptor) => visit(descriptor),
			Self::List(inner) => inner.visit_refs(visit),
			Self::Primitive(_) | Self::Any => {}
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(kind) => f.write_str(kind.as_str()),
			Self::Object(descriptor) => write!(f, "{descriptor}"),
			Self::List(inner) => write!(f, "list<{inner}>"),
			Self::Any => f.write_str("any"),
		}
	}
}

/// Policy for fields a schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFields {
	/// Undeclared fields are an error.
	#[default]
	Reject,
	/// Undeclared fields are kept as untyped data.
	Keep,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
	/// Field name.
	pub name: Box<str>,
	/// Expected value kind.
	pub kind: FieldKind,
}

/// Field layout of a registered type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSchema {
	fields: Vec<FieldDecl>,
	extra: ExtraFields,
}

impl TypeSchema {
	/// Schema with no fields that rejects undeclared ones.
	pub fn marker() -> Self {
		Self::default()
	}

	/// Declare a field, replacing any earlier declaration of the same name.
	pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
		match self.fields.iter_mut().find(|decl| &*decl.name == name) {
			Some(decl) => decl.kind = kind,
			None => self.fields.push(FieldDecl { name: name.into(), kind }),
		}
		self
	}

	/// Set the undeclared-field policy.
	pub fn with_extra(mut self, extra: ExtraFields) -> Self {
		self.extra = extra;
		self
	}

	/// Declared fields in declaration order.
	pub fn fields(&self) -> &[FieldDecl] {
		&self.fields
	}

	/// Undeclared-field policy.
	pub fn extra(&self) -> ExtraFields {
		self.extra
	}

	/// Declared kind of a field.
	pub fn declared(&self, name: &str) -> Option<&FieldKind> {
		self.fields.iter().find(|decl| &*decl.name == name).map(|decl| &decl.kind)
	}

	/// Kind a value for `name` must have, or `None` if the field is rejected.
	pub fn resolve(&self, name: &str) -> Option<&FieldKind> {
		match (self.declared(name), self.extra) {
			(Some(kind), _) => Some(kind),
			(None, ExtraFields::Keep) => Some(&ANY_KIND),
			(None, ExtraFields::Reject) => None,
		}
	}
}
