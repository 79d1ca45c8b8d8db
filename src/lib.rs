//! Registry and codec for wrapped, schema-typed serializable objects.

/// Type descriptors, schemas, the type registry, and the primitive-tree codec.
pub mod wrap;
