use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::wrap::{FieldPath, Result, TypeDescriptor, TypeSchema, WrapError, WrappedObject};

/// Factory producing a fresh instance of a registered type.
pub type Constructor = Arc<dyn Fn() -> WrappedObject + Send + Sync>;

/// Everything the registry knows about one serializable type.
#[derive(Clone)]
pub struct TypeDef {
	descriptor: TypeDescriptor,
	schema: TypeSchema,
	constructor: Constructor,
}

impl TypeDef {
	/// Definition with an explicit constructor.
	pub fn new(descriptor: TypeDescriptor, schema: TypeSchema, constructor: impl Fn() -> WrappedObject + Send + Sync + 'static) -> Self {
		Self {
			descriptor,
			schema,
			constructor: Arc::new(constructor),
		}
	}

	/// Definition whose constructor yields an empty object.
	pub fn with_schema(descriptor: TypeDescriptor, schema: TypeSchema) -> Self {
		let ctor_descriptor = descriptor.clone();
		Self::new(descriptor, schema, move || WrappedObject::new(ctor_descriptor.clone()))
	}

	/// Field-less definition that rejects every field.
	pub fn marker(descriptor: TypeDescriptor) -> Self {
		Self::with_schema(descriptor, TypeSchema::marker())
	}

	/// Registered identity.
	pub fn descriptor(&self) -> &TypeDescriptor {
		&self.descriptor
	}

	/// Field layout.
	pub fn schema(&self) -> &TypeSchema {
		&self.schema
	}

	/// Run the constructor.
	pub fn construct(&self) -> WrappedObject {
		(self.constructor)()
	}

	/// Same schema and constructors producing equal objects.
	fn same_definition(&self, other: &Self) -> bool {
		self.descriptor == other.descriptor && self.schema == other.schema && self.construct() == other.construct()
	}
}

impl fmt::Debug for TypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDef")
			.field("descriptor", &self.descriptor)
			.field("schema", &self.schema)
			.finish_non_exhaustive()
	}
}

/// Collects type definitions before freezing them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	types: HashMap<TypeDescriptor, TypeDef>,
	order: Vec<TypeDescriptor>,
}

impl RegistryBuilder {
	/// Empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register one definition.
	///
	/// Re-registering an identical definition is a no-op; a different definition
	/// under the same descriptor fails with [`WrapError::DuplicateType`].
	pub fn register(&mut self, def: TypeDef) -> Result<()> {
		def.descriptor.validate()?;

		if let Some(existing) = self.types.get(&def.descriptor) {
			if existing.same_definition(&def) {
				tracing::debug!(descriptor = %def.descriptor, "identical type re-registered");
				return Ok(());
			}
			return Err(WrapError::DuplicateType {
				descriptor: def.descriptor.clone(),
			});
		}

		tracing::debug!(descriptor = %def.descriptor, fields = def.schema.fields().len(), "registered type");
		self.order.push(def.descriptor.clone());
		self.types.insert(def.descriptor.clone(), def);
		Ok(())
	}

	/// Whether a descriptor is already registered.
	pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
		self.types.contains_key(descriptor)
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Validate cross-type references and constructor output, then freeze.
	pub fn build(self) -> Result<Registry> {
		let registry = Registry {
			types: self.types,
			order: self.order,
		};

		for def in registry.iter() {
			for decl in def.schema.fields() {
				let mut missing = None;
				decl.kind.visit_refs(&mut |target| {
					if missing.is_none() && !registry.contains(target) {
						missing = Some(target.clone());
					}
				});
				if let Some(target) = missing {
					return Err(WrapError::UnknownType {
						descriptor: target,
						path: Some(format!("{}.{}", def.descriptor, decl.name)),
					});
				}
			}
		}

		for def in registry.iter() {
			let instance = def.construct();
			if instance.descriptor() != Some(&def.descriptor) {
				return Err(WrapError::ConstructorTypeMismatch {
					expected: def.descriptor.clone(),
					got: instance.type_label(),
				});
			}
			registry.check_canonical(&instance)?;
		}

		tracing::debug!(types = registry.len(), "registry built");
		Ok(registry)
	}
}

/// Immutable type registry shared by serialization calls.
///
/// Built once through [`RegistryBuilder`]; safe to read from many threads.
#[derive(Debug)]
pub struct Registry {
	types: HashMap<TypeDescriptor, TypeDef>,
	order: Vec<TypeDescriptor>,
}

impl Registry {
	/// Start a builder.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::new()
	}

	/// Look up a definition.
	pub fn get(&self, descriptor: &TypeDescriptor) -> Option<&TypeDef> {
		self.types.get(descriptor)
	}

	/// Look up a definition by qualified `namespace.path.Name` text.
	pub fn get_qualified(&self, text: &str) -> Result<&TypeDef> {
		let descriptor = TypeDescriptor::parse_qualified(text)?;
		self.resolve(&descriptor, None)
	}

	/// Look up a definition, failing with [`WrapError::UnknownType`].
	pub fn resolve(&self, descriptor: &TypeDescriptor, path: Option<&FieldPath>) -> Result<&TypeDef> {
		self.types.get(descriptor).ok_or_else(|| WrapError::UnknownType {
			descriptor: descriptor.clone(),
			path: path.filter(|path| !path.is_root()).map(ToString::to_string),
		})
	}

	/// Whether a descriptor is registered.
	pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
		self.types.contains_key(descriptor)
	}

	/// Construct a fresh instance of a registered type.
	pub fn construct(&self, descriptor: &TypeDescriptor) -> Result<WrappedObject> {
		Ok(self.resolve(descriptor, None)?.construct())
	}

	/// Definitions in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
		self.order.iter().filter_map(|descriptor| self.types.get(descriptor))
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}
}
