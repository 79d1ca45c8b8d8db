use std::borrow::Cow;
use std::fmt;

use crate::wrap::{Result, WrapError};

/// Identity of a serializable type: a name inside a dotted namespace path.
///
/// Two descriptors are equal when both parts match. The qualified text form
/// is `namespace.path.Name`; an empty namespace renders as just `Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
	namespace_path: Cow<'static, str>,
	name: Cow<'static, str>,
}

impl TypeDescriptor {
	/// Build a descriptor from static parts without validation.
	///
	/// Intended for built-in declarations; the registry validates the parts on registration.
	pub const fn new_static(name: &'static str, namespace_path: &'static str) -> Self {
		Self {
			namespace_path: Cow::Borrowed(namespace_path),
			name: Cow::Borrowed(name),
		}
	}

	/// Build a validated descriptor from owned parts.
	pub fn new(name: impl Into<String>, namespace_path: impl Into<String>) -> Result<Self> {
		let descriptor = Self {
			namespace_path: Cow::Owned(namespace_path.into()),
			name: Cow::Owned(name.into()),
		};
		descriptor.validate()?;
		Ok(descriptor)
	}

	/// Parse `namespace.path.Name`, splitting at the last dot.
	pub fn parse_qualified(text: &str) -> Result<Self> {
		let parsed = match text.rsplit_once('.') {
			Some(("", _)) => return Err(WrapError::InvalidDescriptor { text: text.to_owned() }),
			Some((namespace_path, name)) => Self::new(name, namespace_path),
			None => Self::new(text, ""),
		};
		parsed.map_err(|_| WrapError::InvalidDescriptor { text: text.to_owned() })
	}

	/// Type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Dotted namespace path, possibly empty.
	pub fn namespace_path(&self) -> &str {
		&self.namespace_path
	}

	/// Qualified `namespace.path.Name` text.
	pub fn qualified(&self) -> String {
		self.to_string()
	}

	/// Check name and namespace segments are identifiers.
	pub fn validate(&self) -> Result<()> {
		let namespace_ok = self.namespace_path.is_empty() || self.namespace_path.split('.').all(is_identifier);
		if !is_identifier(&self.name) || !namespace_ok {
			return Err(WrapError::InvalidDescriptor { text: self.to_string() });
		}
		Ok(())
	}
}

impl fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.namespace_path.is_empty() {
			f.write_str(&self.name)
		} else {
			write!(f, "{}.{}", self.namespace_path, self.name)
		}
	}
}

impl serde::Serialize for TypeDescriptor {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> serde::Deserialize<'de> for TypeDescriptor {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let text = <String as serde::Deserialize>::deserialize(deserializer)?;
		Self::parse_qualified(&text).map_err(serde::de::Error::custom)
	}
}

fn is_identifier(part: &str) -> bool {
	let mut chars = part.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_'),
		_ => false,
	}
}
