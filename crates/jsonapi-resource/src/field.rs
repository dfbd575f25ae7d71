//! Field descriptors
//!
//! A resource type declares its fields as descriptors: attributes, rendered
//! under `attributes`, and relationships, rendered under `relationships`.
//! Descriptors only describe how to read a value from the bound object; the
//! decision of whether and under which key a field is rendered belongs to
//! the fieldset resolver and the key formatter.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::object::{DomainObject, Related};
use crate::resource_type::ResourceType;

/// Reads an attribute value from the bound object
pub type AttributeAccessor = Arc<dyn Fn(&dyn DomainObject) -> Value + Send + Sync>;

/// Reads the related object(s) from the bound object
pub type RelationshipAccessor = Arc<dyn Fn(&dyn DomainObject) -> Related + Send + Sync>;

/// Decides, per bound object, whether a field is rendered at all
pub type Condition = Arc<dyn Fn(&dyn DomainObject) -> bool + Send + Sync>;

/// Arity of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
	/// `belongs_to` / `has_one`: linkage is a single identifier or `null`
	ToOne,
	/// `has_many`: linkage is a list of identifiers
	ToMany,
}

impl fmt::Display for Cardinality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Cardinality::ToOne => f.write_str("to-one"),
			Cardinality::ToMany => f.write_str("to-many"),
		}
	}
}

fn conjoin(existing: Option<Condition>, next: Condition) -> Condition {
	match existing {
		Some(first) => Arc::new(move |object: &dyn DomainObject| first(object) && next(object)),
		None => next,
	}
}

/// Attribute descriptor
///
/// # Examples
///
/// ```
/// use jsonapi_resource::AttributeField;
/// use serde_json::json;
///
/// let field = AttributeField::new("title").with_accessor(|_| json!("fixed"));
/// assert_eq!(field.name(), "title");
/// assert!(field.has_accessor());
/// ```
#[derive(Clone)]
pub struct AttributeField {
	name: String,
	accessor: Option<AttributeAccessor>,
	condition: Option<Condition>,
}

impl AttributeField {
	/// Create an attribute read from the same-named property
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			accessor: None,
			condition: None,
		}
	}

	/// Read the value with a custom accessor instead of the same-named property
	pub fn with_accessor<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> Value + Send + Sync + 'static,
	{
		self.accessor = Some(Arc::new(accessor));
		self
	}

	/// Render the attribute only when `condition` holds for the bound object
	pub fn when<F>(mut self, condition: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> bool + Send + Sync + 'static,
	{
		self.condition = Some(conjoin(self.condition.take(), Arc::new(condition)));
		self
	}

	/// Render the attribute unless `condition` holds for the bound object
	pub fn unless<F>(self, condition: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> bool + Send + Sync + 'static,
	{
		self.when(move |object| !condition(object))
	}

	/// Declared name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether a custom accessor replaces the same-named property read
	pub fn has_accessor(&self) -> bool {
		self.accessor.is_some()
	}

	/// Read the attribute value; absent properties read as `null`
	pub fn value(&self, object: &dyn DomainObject) -> Value {
		match &self.accessor {
			Some(accessor) => accessor(object),
			None => object.attribute(&self.name).unwrap_or(Value::Null),
		}
	}
}

impl fmt::Debug for AttributeField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AttributeField")
			.field("name", &self.name)
			.field("custom_accessor", &self.accessor.is_some())
			.field("conditional", &self.condition.is_some())
			.finish()
	}
}

/// Relationship descriptor
///
/// The cardinality is fixed for `belongs_to`/`has_one`/`has_many` style
/// declarations. A relationship declared without one infers its arity from
/// what the accessor returns: a collection links as to-many, anything else as
/// to-one.
#[derive(Clone)]
pub struct RelationshipField {
	name: String,
	cardinality: Option<Cardinality>,
	accessor: Option<RelationshipAccessor>,
	resource_type: Option<Arc<ResourceType>>,
	always_linkage: bool,
	meta: Option<Value>,
	condition: Option<Condition>,
}

impl RelationshipField {
	/// Create a relationship whose arity is inferred from the related value
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			cardinality: None,
			accessor: None,
			resource_type: None,
			always_linkage: false,
			meta: None,
			condition: None,
		}
	}

	/// Create a to-one relationship
	pub fn to_one(name: impl Into<String>) -> Self {
		Self::new(name).with_cardinality(Cardinality::ToOne)
	}

	/// Create a to-many relationship
	pub fn to_many(name: impl Into<String>) -> Self {
		Self::new(name).with_cardinality(Cardinality::ToMany)
	}

	/// Fix the arity of the relationship
	pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
		self.cardinality = Some(cardinality);
		self
	}

	/// Read the related object(s) with a custom accessor
	pub fn with_accessor<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> Related + Send + Sync + 'static,
	{
		self.accessor = Some(Arc::new(accessor));
		self
	}

	/// Serialize every related object with `resource_type` instead of looking
	/// one up by class name
	pub fn with_resource_type(mut self, resource_type: Arc<ResourceType>) -> Self {
		self.resource_type = Some(resource_type);
		self
	}

	/// Render linkage even when the relationship is not included
	pub fn always_linkage(mut self) -> Self {
		self.always_linkage = true;
		self
	}

	/// Attach a static relationship-level `meta` object
	pub fn with_meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self
	}

	/// Render the relationship only when `condition` holds for the bound object
	pub fn when<F>(mut self, condition: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> bool + Send + Sync + 'static,
	{
		self.condition = Some(conjoin(self.condition.take(), Arc::new(condition)));
		self
	}

	/// Render the relationship unless `condition` holds for the bound object
	pub fn unless<F>(self, condition: F) -> Self
	where
		F: Fn(&dyn DomainObject) -> bool + Send + Sync + 'static,
	{
		self.when(move |object| !condition(object))
	}

	/// Declared name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declared arity, `None` when inferred from the related value
	pub fn cardinality(&self) -> Option<Cardinality> {
		self.cardinality
	}

	/// Resource type override for related objects
	pub fn resource_type(&self) -> Option<&Arc<ResourceType>> {
		self.resource_type.as_ref()
	}

	/// Whether linkage is rendered regardless of inclusion
	pub fn has_always_linkage(&self) -> bool {
		self.always_linkage
	}

	/// Relationship-level meta
	pub fn meta(&self) -> Option<&Value> {
		self.meta.as_ref()
	}

	/// Read the related object(s)
	pub fn related(&self, object: &dyn DomainObject) -> Related {
		match &self.accessor {
			Some(accessor) => accessor(object),
			None => object.relationship(&self.name).into(),
		}
	}
}

impl fmt::Debug for RelationshipField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RelationshipField")
			.field("name", &self.name)
			.field("cardinality", &self.cardinality)
			.field("custom_accessor", &self.accessor.is_some())
			.field(
				"resource_type",
				&self.resource_type.as_ref().map(|t| t.name()),
			)
			.field("always_linkage", &self.always_linkage)
			.field("meta", &self.meta)
			.field("conditional", &self.condition.is_some())
			.finish()
	}
}

/// A declared field, tagged by kind
#[derive(Debug, Clone)]
pub enum FieldDescriptor {
	Attribute(AttributeField),
	Relationship(RelationshipField),
}

impl FieldDescriptor {
	/// Declared name
	pub fn name(&self) -> &str {
		match self {
			FieldDescriptor::Attribute(field) => field.name(),
			FieldDescriptor::Relationship(field) => field.name(),
		}
	}

	/// Check if this is an attribute
	pub fn is_attribute(&self) -> bool {
		matches!(self, FieldDescriptor::Attribute(_))
	}

	/// Check if this is a relationship
	pub fn is_relationship(&self) -> bool {
		matches!(self, FieldDescriptor::Relationship(_))
	}

	/// Evaluate the field's condition, if any, against the bound object
	pub fn is_rendered_for(&self, object: &dyn DomainObject) -> bool {
		let condition = match self {
			FieldDescriptor::Attribute(field) => &field.condition,
			FieldDescriptor::Relationship(field) => &field.condition,
		};
		condition.as_ref().is_none_or(|condition| condition(object))
	}
}

impl From<AttributeField> for FieldDescriptor {
	fn from(field: AttributeField) -> Self {
		FieldDescriptor::Attribute(field)
	}
}

impl From<RelationshipField> for FieldDescriptor {
	fn from(field: RelationshipField) -> Self {
		FieldDescriptor::Relationship(field)
	}
}
