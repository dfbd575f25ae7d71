//! Resource type definitions
//!
//! A [`ResourceType`] is the schema resources are rendered from: a type tag,
//! an id rule, an optional key formatter and the declared fields. Types are
//! assembled with a [`ResourceTypeBuilder`] and frozen behind an `Arc` once
//! built, so a definition can be shared freely between threads and between
//! the subtypes that extend it.

use once_cell::sync::OnceCell;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::field::{AttributeField, FieldDescriptor, RelationshipField};
use crate::key_format::{KeyFormatter, warn_prepended_key_format};
use crate::object::DomainObject;
use crate::registry::{FieldMap, FieldRegistry};

/// Derives the `id` of a resource from its bound object
pub type IdRule = Arc<dyn Fn(&dyn DomainObject) -> String + Send + Sync>;

/// Builds the resource-level `meta` object from the bound object
pub type MetaRule = Arc<dyn Fn(&dyn DomainObject) -> Value + Send + Sync>;

/// Read the `id` attribute and render it as a string
///
/// Strings are used verbatim, a missing or `null` id renders as the empty
/// string and any other value renders as its JSON text.
pub fn default_id(object: &dyn DomainObject) -> String {
	match object.attribute("id") {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(id)) => id,
		Some(other) => other.to_string(),
	}
}

/// A field together with the key it renders under
#[derive(Debug, Clone)]
pub struct ResolvedField {
	key: String,
	descriptor: FieldDescriptor,
}

impl ResolvedField {
	/// Declared name
	pub fn name(&self) -> &str {
		self.descriptor.name()
	}

	/// Formatted output key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The field descriptor
	pub fn descriptor(&self) -> &FieldDescriptor {
		&self.descriptor
	}
}

/// A resource type definition
///
/// # Examples
///
/// ```
/// use jsonapi_resource::{KeyFormatter, ResourceType};
///
/// let user = ResourceType::builder("SerializableUser", "users")
///     .id(|_| "1".to_string())
///     .key_format(KeyFormatter::camel_lower())
///     .attribute("first_name")
///     .has_many("posts")
///     .build();
///
/// let admin = ResourceType::extend("SerializableAdmin", &user)
///     .attribute("permissions")
///     .build();
///
/// let keys: Vec<_> = admin.fields().iter().map(|f| f.key()).collect();
/// assert_eq!(keys, vec!["firstName", "posts", "permissions"]);
/// assert_eq!(admin.type_tag(), "users");
/// ```
pub struct ResourceType {
	name: String,
	type_tag: String,
	id_rule: Option<IdRule>,
	key_format: KeyFormatter,
	meta: Option<MetaRule>,
	registry: FieldRegistry,
	parent: Option<Arc<ResourceType>>,
	field_map: OnceCell<FieldMap>,
	resolved: OnceCell<Vec<ResolvedField>>,
}

impl ResourceType {
	/// Start defining a new root resource type
	///
	/// `name` identifies the definition itself (conventionally
	/// `Serializable` followed by the class name it renders), `type_tag` is
	/// the JSON:API `type` member.
	pub fn builder(name: impl Into<String>, type_tag: impl Into<String>) -> ResourceTypeBuilder {
		ResourceTypeBuilder {
			name: name.into(),
			type_tag: type_tag.into(),
			id_rule: None,
			key_format: None,
			meta: None,
			registry: FieldRegistry::new(),
			parent: None,
			deprecation_warned: false,
		}
	}

	/// Start defining a subtype of `parent`
	///
	/// The subtype inherits the type tag, id rule, key formatter, meta rule
	/// and every field of its parent. Each of them can be overridden without
	/// affecting the parent.
	pub fn extend(name: impl Into<String>, parent: &Arc<ResourceType>) -> ResourceTypeBuilder {
		ResourceTypeBuilder {
			name: name.into(),
			type_tag: parent.type_tag.clone(),
			id_rule: parent.id_rule.clone(),
			key_format: None,
			meta: parent.meta.clone(),
			registry: FieldRegistry::new(),
			parent: Some(Arc::clone(parent)),
			deprecation_warned: false,
		}
	}

	/// Name of the definition
	pub fn name(&self) -> &str {
		&self.name
	}

	/// JSON:API `type` member
	pub fn type_tag(&self) -> &str {
		&self.type_tag
	}

	/// Active key formatter, own or inherited
	pub fn key_format(&self) -> &KeyFormatter {
		&self.key_format
	}

	/// Parent definition, if this is a subtype
	pub fn parent(&self) -> Option<&Arc<ResourceType>> {
		self.parent.as_ref()
	}

	/// Check whether `other` is this type or one of its ancestors
	pub fn is_subtype_of(&self, other: &ResourceType) -> bool {
		std::ptr::eq(self, other)
			|| self
				.parent
				.as_ref()
				.is_some_and(|parent| parent.is_subtype_of(other))
	}

	/// Declarations made on this type itself
	pub fn own_fields(&self) -> &FieldRegistry {
		&self.registry
	}

	/// Derive the `id` for a bound object
	pub fn id_for(&self, object: &dyn DomainObject) -> String {
		match &self.id_rule {
			Some(rule) => rule(object),
			None => default_id(object),
		}
	}

	/// Build the resource-level meta for a bound object, if a rule is set
	pub fn meta_for(&self, object: &dyn DomainObject) -> Option<Value> {
		self.meta.as_ref().map(|rule| rule(object))
	}

	/// All fields by name: ancestors' first, then this type's own
	pub fn field_map(&self) -> &FieldMap {
		self.field_map.get_or_init(|| {
			let inherited = self.parent.as_ref().map(|parent| parent.field_map());
			self.registry.resolve_over(inherited)
		})
	}

	/// All fields with their formatted keys, in resolution order
	///
	/// Computed on first use and cached.
	pub fn fields(&self) -> &[ResolvedField] {
		self.resolved.get_or_init(|| {
			let resolved: Vec<ResolvedField> = self
				.field_map()
				.values()
				.map(|descriptor| ResolvedField {
					key: self.key_format.format(descriptor.name()),
					descriptor: descriptor.clone(),
				})
				.collect();
			tracing::debug!(
				resource = %self.name,
				fields = resolved.len(),
				"Resolved resource fields"
			);
			resolved
		})
	}

	/// Check whether any attribute is declared, own or inherited
	pub fn has_attributes(&self) -> bool {
		self.field_map().values().any(FieldDescriptor::is_attribute)
	}

	/// Check whether any relationship is declared, own or inherited
	pub fn has_relationships(&self) -> bool {
		self.field_map().values().any(FieldDescriptor::is_relationship)
	}
}

impl fmt::Debug for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResourceType")
			.field("name", &self.name)
			.field("type_tag", &self.type_tag)
			.field("custom_id", &self.id_rule.is_some())
			.field("key_format", &self.key_format)
			.field("fields", &self.registry.names())
			.field("parent", &self.parent.as_ref().map(|p| p.name()))
			.finish()
	}
}

/// Fluent definition of a [`ResourceType`]
///
/// Declarations are additive. Declaring a name twice keeps the last
/// declaration, in the position of the first.
pub struct ResourceTypeBuilder {
	name: String,
	type_tag: String,
	id_rule: Option<IdRule>,
	key_format: Option<KeyFormatter>,
	meta: Option<MetaRule>,
	registry: FieldRegistry,
	parent: Option<Arc<ResourceType>>,
	deprecation_warned: bool,
}

impl ResourceTypeBuilder {
	/// Override the JSON:API `type` member
	pub fn type_tag(mut self, type_tag: impl Into<String>) -> Self {
		self.type_tag = type_tag.into();
		self
	}

	/// Derive ids with a custom rule
	pub fn id<F>(mut self, rule: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> String + Send + Sync + 'static,
	{
		self.id_rule = Some(Arc::new(rule));
		self
	}

	/// Install a key formatter for this type and the subtypes that don't
	/// install their own
	pub fn key_format(mut self, formatter: KeyFormatter) -> Self {
		self.key_format = Some(formatter);
		self
	}

	/// Install a key formatter through the legacy path
	///
	/// Renders exactly like [`key_format`](Self::key_format); the only
	/// difference is a one-time deprecation warning per definition.
	#[deprecated(note = "use `key_format` instead")]
	pub fn prepend_key_format(mut self, formatter: KeyFormatter) -> Self {
		if !self.deprecation_warned {
			warn_prepended_key_format(&self.name);
			self.deprecation_warned = true;
		}
		self.key_format = Some(formatter);
		self
	}

	/// Build the resource-level `meta` object from the bound object
	pub fn meta<F>(mut self, rule: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> Value + Send + Sync + 'static,
	{
		self.meta = Some(Arc::new(rule));
		self
	}

	/// Declare a fully configured field
	pub fn field(mut self, field: impl Into<FieldDescriptor>) -> Self {
		self.registry.declare(field);
		self
	}

	/// Declare an attribute read from the same-named property
	pub fn attribute(self, name: impl Into<String>) -> Self {
		self.field(AttributeField::new(name))
	}

	/// Declare an attribute read through `accessor`
	pub fn attribute_with<F>(self, name: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> Value + Send + Sync + 'static,
	{
		self.field(AttributeField::new(name).with_accessor(accessor))
	}

	/// Declare several plain attributes at once
	pub fn attributes<I, S>(self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		names.into_iter().fold(self, |builder, name| builder.attribute(name))
	}

	/// Declare a relationship whose arity follows the related value
	pub fn relationship(self, name: impl Into<String>) -> Self {
		self.field(RelationshipField::new(name))
	}

	/// Declare a to-one relationship
	pub fn belongs_to(self, name: impl Into<String>) -> Self {
		self.field(RelationshipField::to_one(name))
	}

	/// Declare a to-one relationship
	pub fn has_one(self, name: impl Into<String>) -> Self {
		self.field(RelationshipField::to_one(name))
	}

	/// Declare a to-many relationship
	pub fn has_many(self, name: impl Into<String>) -> Self {
		self.field(RelationshipField::to_many(name))
	}

	/// Freeze the definition
	pub fn build(self) -> Arc<ResourceType> {
		let key_format = match (self.key_format, &self.parent) {
			(Some(own), _) => own,
			(None, Some(parent)) => parent.key_format.clone(),
			(None, None) => KeyFormatter::identity(),
		};
		Arc::new(ResourceType {
			name: self.name,
			type_tag: self.type_tag,
			id_rule: self.id_rule,
			key_format,
			meta: self.meta,
			registry: self.registry,
			parent: self.parent,
			field_map: OnceCell::new(),
			resolved: OnceCell::new(),
		})
	}
}
