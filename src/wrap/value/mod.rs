use crate::wrap::{FieldPath, PathStep, TypeDescriptor};

/// Runtime value stored in a wrapped object field or list slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar above `i64::MAX`.
	U64(u64),
	/// Floating-point scalar.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Nested wrapped object.
	Object(WrappedObject),
	/// Nested wrapped list.
	List(WrappedList),
}

impl Value {
	/// Short lowercase label for the runtime kind, used in error messages.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::I64(_) | Self::U64(_) => "integer",
			Self::F64(_) => "number",
			Self::String(_) => "string",
			Self::Object(_) => "object",
			Self::List(_) => "list",
		}
	}

	/// Borrow as nested object.
	pub fn as_object(&self) -> Option<&WrappedObject> {
		match self {
			Self::Object(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow as nested list.
	pub fn as_list(&self) -> Option<&WrappedList> {
		match self {
			Self::List(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow as string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(item) => Some(item),
			_ => None,
		}
	}

	/// Numeric value widened to `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match *self {
			Self::I64(v) => Some(v as f64),
			Self::U64(v) => Some(v as f64),
			Self::F64(v) => Some(v),
			_ => None,
		}
	}

	/// Whether this is the null marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(value) => Self::I64(value),
			Err(_) => Self::U64(value),
		}
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<WrappedObject> for Value {
	fn from(value: WrappedObject) -> Self {
		Self::Object(value)
	}
}

impl From<WrappedList> for Value {
	fn from(value: WrappedList) -> Self {
		Self::List(value)
	}
}

/// Named field slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}

/// Object with named fields, optionally tagged with its registered type.
///
/// Field names are unique. Equality compares descriptors and fields by name,
/// ignoring insertion order.
#[derive(Debug, Clone, Default)]
pub struct WrappedObject {
	descriptor: Option<TypeDescriptor>,
	fields: Vec<FieldValue>,
}

impl WrappedObject {
	/// Empty object of a registered type.
	pub fn new(descriptor: TypeDescriptor) -> Self {
		Self {
			descriptor: Some(descriptor),
			fields: Vec::new(),
		}
	}

	/// Empty object without a type, holding dynamic data.
	pub fn untyped() -> Self {
		Self::default()
	}

	/// Registered type, if any.
	pub fn descriptor(&self) -> Option<&TypeDescriptor> {
		self.descriptor.as_ref()
	}

	/// Qualified type name, or `<untyped>`.
	pub fn type_label(&self) -> String {
		match &self.descriptor {
			Some(descriptor) => descriptor.to_string(),
			None => "<untyped>".to_owned(),
		}
	}

	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Mutable field lookup by name.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
		self.fields.iter_mut().find(|field| &*field.name == name).map(|field| &mut field.value)
	}

	/// Whether a field is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Store a value without schema checks, returning the previous value.
	///
	/// Constructors use this to seed defaults; everything else should go through
	/// [`Registry::assign`](crate::wrap::Registry::assign).
	pub fn set_raw(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
		let value = value.into();
		if let Some(slot) = self.get_mut(name) {
			return Some(std::mem::replace(slot, value));
		}
		self.fields.push(FieldValue { name: name.into(), value });
		None
	}

	/// Builder form of [`WrappedObject::set_raw`].
	pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
		self.set_raw(name, value);
		self
	}

	/// Remove a field, returning its value.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		let idx = self.fields.iter().position(|field| &*field.name == name)?;
		Some(self.fields.remove(idx).value)
	}

	/// Fields in insertion order.
	pub fn fields(&self) -> &[FieldValue] {
		&self.fields
	}

	/// Consume into fields in insertion order.
	pub fn into_fields(self) -> Vec<FieldValue> {
		self.fields
	}

	/// Iterate `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|field| (&*field.name, &field.value))
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no fields are set.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Resolve a nested value by field path.
	pub fn lookup(&self, path: &FieldPath) -> Option<&Value> {
		let mut steps = path.steps.iter();
		let mut current = match steps.next()? {
			PathStep::Field(name) => self.get(name)?,
			PathStep::Index(_) => return None,
		};

		for step in steps {
			current = match (step, current) {
				(PathStep::Field(name), Value::Object(item)) => item.get(name)?,
				(PathStep::Index(index), Value::List(items)) => items.get(*index)?,
				_ => return None,
			};
		}

		Some(current)
	}
}

impl PartialEq for WrappedObject {
	fn eq(&self, other: &Self) -> bool {
		self.descriptor == other.descriptor
			&& self.fields.len() == other.fields.len()
			&& self.fields.iter().all(|field| other.get(&field.name) == Some(&field.value))
	}
}

/// Ordered sequence of wrapped values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedList {
	items: Vec<Value>,
}

impl WrappedList {
	/// Empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a value without schema checks.
	pub fn push(&mut self, value: impl Into<Value>) {
		self.items.push(value.into());
	}

	/// Element by index.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.items.get(index)
	}

	/// Elements in order.
	pub fn items(&self) -> &[Value] {
		&self.items
	}

	/// Iterate elements in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.items.iter()
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the list has no elements.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl From<Vec<Value>> for WrappedList {
	fn from(items: Vec<Value>) -> Self {
		Self { items }
	}
}

impl FromIterator<Value> for WrappedList {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self { items: iter.into_iter().collect() }
	}
}

impl IntoIterator for WrappedList {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<'a> IntoIterator for &'a WrappedList {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

#[cfg(test)]
mod tests;
