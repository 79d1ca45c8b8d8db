use crate::wrap::codec::{DecodeCx, DecodeOptions};
use crate::wrap::{FieldKind, FieldPath, PrimitiveKind, Registry, Result, Value, WrapError, WrappedList, WrappedObject};

impl Registry {
	/// Assign an already-wrapped value to a field, checking it against the field's declared kind.
	///
	/// On error the object is left unchanged.
	pub fn assign(&self, object: &mut WrappedObject, field: &str, value: impl Into<Value>) -> Result<()> {
		let mut path = FieldPath::root().child(field);
		let kind = self.field_kind(object, field, &path)?;
		let value = self.coerce_value(kind, value.into(), &mut path, &DecodeOptions::default())?;
		object.set_raw(field, value);
		Ok(())
	}

	/// Assign a raw primitive tree to a field, wrapping nested objects and lists into their declared types.
	///
	/// On error the object is left unchanged.
	pub fn assign_tree(&self, object: &mut WrappedObject, field: &str, tree: &serde_json::Value) -> Result<()> {
		let path = FieldPath::root().child(field);
		let kind = self.field_kind(object, field, &path)?;
		let options = DecodeOptions::default();
		let mut cx = DecodeCx::new(self, &options, path);
		let value = cx.decode_value(kind, tree, 1)?;
		object.set_raw(field, value);
		Ok(())
	}

	fn field_kind(&self, object: &WrappedObject, field: &str, path: &FieldPath) -> Result<&FieldKind> {
		let Some(descriptor) = object.descriptor() else {
			return Ok(&FieldKind::Any);
		};
		let def = self.resolve(descriptor, None)?;
		def.schema().resolve(field).ok_or_else(|| WrapError::UnknownField {
			path: path.to_string(),
			descriptor: descriptor.clone(),
		})
	}

	/// Require `object` to already be in the form decoding its own serialization produces.
	pub(crate) fn check_canonical(&self, object: &WrappedObject) -> Result<()> {
		let mut path = FieldPath::root();
		let conformed = self.conform_object_with(object.clone(), &mut path, &DecodeOptions::strict())?;
		match first_difference(object, &conformed, &mut path) {
			Some((got, expected)) => Err(WrapError::FieldTypeMismatch {
				path: path.to_string(),
				expected: format!("{expected:?}"),
				got: format!("{got:?}"),
			}),
			None => Ok(()),
		}
	}

	fn conform_object_with(&self, object: WrappedObject, path: &mut FieldPath, options: &DecodeOptions) -> Result<WrappedObject> {
		let def = match object.descriptor() {
			Some(descriptor) => Some(self.resolve(descriptor, Some(&*path))?),
			None => None,
		};

		let mut out = match def {
			Some(def) => WrappedObject::new(def.descriptor().clone()),
			None => WrappedObject::untyped(),
		};

		for field in object.into_fields() {
			path.push_field(&field.name);
			let kind = match def {
				Some(def) => def.schema().resolve(&field.name).ok_or_else(|| WrapError::UnknownField {
					path: path.to_string(),
					descriptor: def.descriptor().clone(),
				})?,
				None => &FieldKind::Any,
			};
			let value = self.coerce_value(kind, field.value, path, options)?;
			out.set_raw(&field.name, value);
			path.pop();
		}

		Ok(out)
	}

	fn coerce_value(&self, kind: &FieldKind, value: Value, path: &mut FieldPath, options: &DecodeOptions) -> Result<Value> {
		if value.is_null() {
			return Ok(Value::Null);
		}

		match (kind, value) {
			(FieldKind::Primitive(primitive), value) => coerce_primitive(*primitive, value, path, options),
			(FieldKind::Object(expected), Value::Object(object)) if object.descriptor() == Some(expected) => {
				Ok(Value::Object(self.conform_object_with(object, path, options)?))
			}
			(FieldKind::List(inner), Value::List(items)) => {
				let mut out = Vec::with_capacity(items.len());
				for (index, item) in items.into_iter().enumerate() {
					path.push_index(index);
					out.push(self.coerce_value(inner, item, path, options)?);
					path.pop();
				}
				Ok(Value::List(WrappedList::from(out)))
			}
			(FieldKind::Any, Value::Object(object)) if object.descriptor().is_none() => Ok(Value::Object(self.conform_object_with(object, path, options)?)),
			(FieldKind::Any, Value::List(items)) => self.coerce_value(&FieldKind::list(FieldKind::Any), Value::List(items), path, options),
			(FieldKind::Any, value @ (Value::Bool(_) | Value::I64(_) | Value::U64(_) | Value::F64(_) | Value::String(_))) => Ok(narrow_unsigned(value)),
			(kind, value) => Err(mismatch(kind, &value, path)),
		}
	}
}

/// First value that differs between two objects of the same shape; `path` is left pointing at it.
fn first_difference<'a>(left: &'a WrappedObject, right: &'a WrappedObject, path: &mut FieldPath) -> Option<(&'a Value, &'a Value)> {
	for (name, value) in left.iter() {
		let Some(other) = right.get(name) else {
			continue;
		};
		path.push_field(name);
		if let Some(found) = first_value_difference(value, other, path) {
			return Some(found);
		}
		path.pop();
	}
	None
}

fn first_value_difference<'a>(left: &'a Value, right: &'a Value, path: &mut FieldPath) -> Option<(&'a Value, &'a Value)> {
	match (left, right) {
		(Value::Object(a), Value::Object(b)) => first_difference(a, b, path),
		(Value::List(a), Value::List(b)) if a.len() == b.len() => {
			for (index, (x, y)) in a.iter().zip(b.iter()).enumerate() {
				path.push_index(index);
				if let Some(found) = first_value_difference(x, y, path) {
					return Some(found);
				}
				path.pop();
			}
			None
		}
		(a, b) if a == b => None,
		(a, b) => Some((a, b)),
	}
}

fn coerce_primitive(kind: PrimitiveKind, value: Value, path: &FieldPath, options: &DecodeOptions) -> Result<Value> {
	match (kind, value) {
		(PrimitiveKind::String, value @ Value::String(_)) => Ok(value),
		(PrimitiveKind::Bool, value @ Value::Bool(_)) => Ok(value),
		(PrimitiveKind::Number, value @ (Value::I64(_) | Value::U64(_) | Value::F64(_))) => Ok(narrow_unsigned(value)),
		(PrimitiveKind::Integer, value @ (Value::I64(_) | Value::U64(_))) => Ok(narrow_unsigned(value)),
		(PrimitiveKind::Integer, Value::F64(v)) if !options.strict_integers => match integral_f64(v) {
			Some(whole) => Ok(Value::I64(whole)),
			None => Err(mismatch(&FieldKind::Primitive(kind), &Value::F64(v), path)),
		},
		(kind, value) => Err(mismatch(&FieldKind::Primitive(kind), &value, path)),
	}
}

/// `U64` is only used above `i64::MAX`, matching what decoding produces.
fn narrow_unsigned(value: Value) -> Value {
	match value {
		Value::U64(v) => Value::from(v),
		other => other,
	}
}

/// Exact `i64` for a float with no fractional part inside `i64` range.
pub(crate) fn integral_f64(value: f64) -> Option<i64> {
	const LIMIT: f64 = 9_223_372_036_854_775_808.0;
	if value.is_finite() && value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value) {
		Some(value as i64)
	} else {
		None
	}
}

fn mismatch(kind: &FieldKind, value: &Value, path: &FieldPath) -> WrapError {
	let got = match value {
		Value::Object(object) => format!("object {}", object.type_label()),
		other => other.kind_name().to_owned(),
	};
	WrapError::FieldTypeMismatch {
		path: path.to_string(),
		expected: kind.to_string(),
		got,
	}
}

#[cfg(test)]
mod tests;
