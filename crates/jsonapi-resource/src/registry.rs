//! Field registry
//!
//! Each resource type owns a registry of its own declarations. Declaring a
//! name that is already present replaces the previous descriptor in place,
//! so the field keeps the position of its first declaration. Inherited
//! fields are not copied into the registry; they are merged in when the
//! resource type resolves its full field list.

use indexmap::IndexMap;

use crate::field::FieldDescriptor;

/// Ordered mapping from field name to descriptor
pub type FieldMap = IndexMap<String, FieldDescriptor>;

/// A resource type's own field declarations
///
/// # Examples
///
/// ```
/// use jsonapi_resource::{AttributeField, FieldRegistry, RelationshipField};
///
/// let mut registry = FieldRegistry::new();
/// registry.declare(AttributeField::new("name"));
/// registry.declare(RelationshipField::to_many("posts"));
/// registry.declare(AttributeField::new("name").with_accessor(|_| "fixed".into()));
///
/// assert_eq!(registry.names(), vec!["name", "posts"]);
/// assert!(registry.get("name").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
	fields: FieldMap,
}

impl FieldRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a field, replacing any same-named declaration
	pub fn declare(&mut self, field: impl Into<FieldDescriptor>) {
		let field = field.into();
		let name = field.name().to_string();
		if self.fields.insert(name.clone(), field).is_some() {
			tracing::trace!(field = %name, "Field redeclared, previous declaration replaced");
		}
	}

	/// Get a declaration by name
	pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.get(name)
	}

	/// Check if a field is declared
	pub fn contains(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Declared names, in declaration order
	pub fn names(&self) -> Vec<&str> {
		self.fields.keys().map(String::as_str).collect()
	}

	/// Number of own declarations
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Check if nothing is declared
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Iterate over declarations in declaration order
	pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.values()
	}

	/// Merge these declarations over an inherited field list
	///
	/// Inherited fields come first; an own declaration with an inherited
	/// name overrides it in the inherited position, new names are appended.
	pub fn resolve_over(&self, inherited: Option<&FieldMap>) -> FieldMap {
		let mut resolved = inherited.cloned().unwrap_or_default();
		for (name, field) in &self.fields {
			resolved.insert(name.clone(), field.clone());
		}
		resolved
	}
}
