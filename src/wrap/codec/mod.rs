use serde_json::{Map, Number, Value as JsonValue};

use crate::wrap::coerce::integral_f64;
use crate::wrap::{FieldKind, FieldPath, PrimitiveKind, Registry, Result, TypeDescriptor, Value, WrapError, WrappedList, WrappedObject};

/// Envelope key carrying the qualified type name.
pub const TYPE_KEY: &str = "$type";
/// Envelope key carrying the serialized object.
pub const VALUE_KEY: &str = "$value";

/// Runtime limits and behavior switches for deserialization.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of objects and lists.
	pub max_depth: u32,
	/// Maximum allowed list length.
	pub max_list_items: usize,
	/// Reject integral floats such as `3.0` for `integer` fields.
	pub strict_integers: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_list_items: 65536,
			strict_integers: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that accepts only exact kinds.
	pub fn strict() -> Self {
		Self {
			strict_integers: true,
			..Self::default()
		}
	}
}

/// Serialize an object into a primitive tree.
///
/// Fields become map entries, nested objects and lists recurse, list order is kept.
pub fn serialize(object: &WrappedObject) -> Result<JsonValue> {
	serialize_object(object, &mut FieldPath::root())
}

/// Serialize any wrapped value into a primitive tree.
pub fn serialize_value(value: &Value) -> Result<JsonValue> {
	value_to_tree(value, &mut FieldPath::root())
}

/// Serialize a typed object into a `{"$type", "$value"}` envelope.
pub fn serialize_tagged(object: &WrappedObject) -> Result<JsonValue> {
	let descriptor = object.descriptor().ok_or(WrapError::UntypedObject)?;
	let mut out = Map::new();
	out.insert(TYPE_KEY.to_owned(), JsonValue::String(descriptor.to_string()));
	out.insert(VALUE_KEY.to_owned(), serialize(object)?);
	Ok(JsonValue::Object(out))
}

/// Deserialize a primitive tree as an instance of a registered type, with default options.
pub fn deserialize(registry: &Registry, descriptor: &TypeDescriptor, tree: &JsonValue) -> Result<WrappedObject> {
	deserialize_with(registry, descriptor, tree, &DecodeOptions::default())
}

/// Deserialize a primitive tree as an instance of a registered type.
///
/// Starts from the type's constructor output and populates fields from `tree`,
/// recursing through each field's declared kind. Any failure rejects the whole input.
pub fn deserialize_with(registry: &Registry, descriptor: &TypeDescriptor, tree: &JsonValue, options: &DecodeOptions) -> Result<WrappedObject> {
	DecodeCx::new(registry, options, FieldPath::root()).decode_object(descriptor, tree, 0)
}

/// Deserialize a `{"$type", "$value"}` envelope, resolving the type through the registry.
pub fn deserialize_tagged(registry: &Registry, tree: &JsonValue, options: &DecodeOptions) -> Result<WrappedObject> {
	let envelope = tree.as_object().ok_or(WrapError::InvalidEnvelope { reason: "expected object" })?;
	let type_name = envelope
		.get(TYPE_KEY)
		.and_then(JsonValue::as_str)
		.ok_or(WrapError::InvalidEnvelope { reason: "missing $type string" })?;
	let value = envelope.get(VALUE_KEY).ok_or(WrapError::InvalidEnvelope { reason: "missing $value" })?;
	if envelope.len() != 2 {
		return Err(WrapError::InvalidEnvelope { reason: "unexpected keys" });
	}

	let descriptor = TypeDescriptor::parse_qualified(type_name)?;
	deserialize_with(registry, &descriptor, value, options)
}

/// Recursive decode state: registry, limits, and the current field path.
pub(crate) struct DecodeCx<'a> {
	registry: &'a Registry,
	options: &'a DecodeOptions,
	path: FieldPath,
}

impl<'a> DecodeCx<'a> {
	pub(crate) fn new(registry: &'a Registry, options: &'a DecodeOptions, path: FieldPath) -> Self {
		Self { registry, options, path }
	}

	fn enter(&self, depth: u32) -> Result<()> {
		if depth >= self.options.max_depth {
			return Err(WrapError::DepthExceeded {
				path: self.path.to_string(),
				max_depth: self.options.max_depth,
			});
		}
		Ok(())
	}

	pub(crate) fn decode_object(&mut self, descriptor: &TypeDescriptor, tree: &JsonValue, depth: u32) -> Result<WrappedObject> {
		self.enter(depth)?;
		let registry = self.registry;
		let def = registry.resolve(descriptor, Some(&self.path))?;
		let Some(map) = tree.as_object() else {
			return Err(json_mismatch(&descriptor.to_string(), tree, &self.path));
		};
		tracing::trace!(descriptor = %descriptor, path = %self.path, fields = map.len(), "decoding object");

		let mut object = def.construct();
		for (key, raw) in map {
			self.path.push_field(key);
			let kind = def.schema().resolve(key).ok_or_else(|| WrapError::UnknownField {
				path: self.path.to_string(),
				descriptor: descriptor.clone(),
			})?;
			let value = self.decode_value(kind, raw, depth + 1)?;
			object.set_raw(key, value);
			self.path.pop();
		}

		Ok(object)
	}

	pub(crate) fn decode_value(&mut self, kind: &FieldKind, tree: &JsonValue, depth: u32) -> Result<Value> {
		if tree.is_null() {
			return Ok(Value::Null);
		}

		match kind {
			FieldKind::Primitive(primitive) => self.decode_primitive(*primitive, tree),
			FieldKind::Object(descriptor) => Ok(Value::Object(self.decode_object(descriptor, tree, depth)?)),
			FieldKind::List(inner) => self.decode_list(inner, tree, depth),
			FieldKind::Any => self.decode_any(tree, depth),
		}
	}

	fn decode_primitive(&self, kind: PrimitiveKind, tree: &JsonValue) -> Result<Value> {
		match (kind, tree) {
			(PrimitiveKind::String, JsonValue::String(text)) => Ok(Value::from(text.as_str())),
			(PrimitiveKind::Bool, JsonValue::Bool(flag)) => Ok(Value::Bool(*flag)),
			(PrimitiveKind::Number, JsonValue::Number(number)) => Ok(number_value(number)),
			(PrimitiveKind::Integer, JsonValue::Number(number)) => match number_value(number) {
				value @ (Value::I64(_) | Value::U64(_)) => Ok(value),
				Value::F64(v) if !self.options.strict_integers => integral_f64(v)
					.map(Value::I64)
					.ok_or_else(|| json_mismatch(kind.as_str(), tree, &self.path)),
				_ => Err(json_mismatch(kind.as_str(), tree, &self.path)),
			},
			(kind, tree) => Err(json_mismatch(kind.as_str(), tree, &self.path)),
		}
	}

	fn decode_list(&mut self, inner: &FieldKind, tree: &JsonValue, depth: u32) -> Result<Value> {
		let Some(items) = tree.as_array() else {
			return Err(json_mismatch(&FieldKind::List(Box::new(inner.clone())).to_string(), tree, &self.path));
		};
		self.enter(depth)?;
		if items.len() > self.options.max_list_items {
			return Err(WrapError::ListTooLarge {
				path: self.path.to_string(),
				count: items.len(),
				max: self.options.max_list_items,
			});
		}

		let mut out = Vec::with_capacity(items.len());
		for (index, item) in items.iter().enumerate() {
			self.path.push_index(index);
			out.push(self.decode_value(inner, item, depth + 1)?);
			self.path.pop();
		}
		Ok(Value::List(WrappedList::from(out)))
	}

	fn decode_any(&mut self, tree: &JsonValue, depth: u32) -> Result<Value> {
		match tree {
			JsonValue::Null => Ok(Value::Null),
			JsonValue::Bool(flag) => Ok(Value::Bool(*flag)),
			JsonValue::Number(number) => Ok(number_value(number)),
			JsonValue::String(text) => Ok(Value::from(text.as_str())),
			JsonValue::Array(_) => self.decode_list(&FieldKind::Any, tree, depth),
			JsonValue::Object(map) => {
				self.enter(depth)?;
				let mut object = WrappedObject::untyped();
				for (key, raw) in map {
					self.path.push_field(key);
					let value = self.decode_any(raw, depth + 1)?;
					object.set_raw(key, value);
					self.path.pop();
				}
				Ok(Value::Object(object))
			}
		}
	}
}

fn number_value(number: &Number) -> Value {
	if let Some(v) = number.as_i64() {
		Value::I64(v)
	} else if let Some(v) = number.as_u64() {
		Value::U64(v)
	} else {
		number.as_f64().map(Value::F64).unwrap_or(Value::Null)
	}
}

fn json_kind(tree: &JsonValue) -> &'static str {
	match tree {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(number) if number.is_f64() => "number",
		JsonValue::Number(_) => "integer",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "list",
		JsonValue::Object(_) => "object",
	}
}

fn json_mismatch(expected: &str, tree: &JsonValue, path: &FieldPath) -> WrapError {
	WrapError::FieldTypeMismatch {
		path: path.to_string(),
		expected: expected.to_owned(),
		got: json_kind(tree).to_owned(),
	}
}

fn serialize_object(object: &WrappedObject, path: &mut FieldPath) -> Result<JsonValue> {
	let mut out = Map::new();
	for (name, value) in object.iter() {
		path.push_field(name);
		out.insert(name.to_owned(), value_to_tree(value, path)?);
		path.pop();
	}
	Ok(JsonValue::Object(out))
}

fn value_to_tree(value: &Value, path: &mut FieldPath) -> Result<JsonValue> {
	Ok(match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => JsonValue::Bool(*v),
		Value::I64(v) => JsonValue::Number(Number::from(*v)),
		Value::U64(v) => JsonValue::Number(Number::from(*v)),
		Value::F64(v) => JsonValue::Number(Number::from_f64(*v).ok_or_else(|| WrapError::NonFiniteNumber { path: path.to_string() })?),
		Value::String(v) => JsonValue::String(v.to_string()),
		Value::Object(item) => serialize_object(item, path)?,
		Value::List(items) => {
			let mut out = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				path.push_index(index);
				out.push(value_to_tree(item, path)?);
				path.pop();
			}
			JsonValue::Array(out)
		}
	})
}
