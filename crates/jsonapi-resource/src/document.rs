//! Rendered resource objects
//!
//! These are the shapes the renderer produces. They serialize with serde to
//! the JSON:API resource-object layout and can also be turned into a
//! [`serde_json::Value`] directly.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

/// `{id, type}` reference to a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceIdentifier {
	pub id: String,
	#[serde(rename = "type")]
	pub resource_type: String,
}

impl ResourceIdentifier {
	/// Create an identifier
	pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			resource_type: resource_type.into(),
		}
	}
}

/// Serialize a rendered shape into a JSON value
///
/// These shapes only hold strings, JSON values and string-keyed maps, so
/// serialization cannot fail.
fn to_json<T: Serialize>(shape: &T) -> Value {
	serde_json::to_value(shape).unwrap_or(Value::Null)
}

/// Relationship `data` member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Linkage {
	/// A single identifier, or `null` when there is no related resource
	ToOne(Option<ResourceIdentifier>),
	/// Identifiers in the order the accessor returned them
	ToMany(Vec<ResourceIdentifier>),
}

impl Linkage {
	/// Convert to a JSON value
	pub fn to_value(&self) -> Value {
		to_json(self)
	}
}

/// A rendered relationship
///
/// Carries `data` when linkage was rendered; otherwise `meta` (by default
/// `{"included": false}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelationshipObject {
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<Linkage>,
	#[serde(skip_serializing_if = "Option::is_none")]
	meta: Option<Value>,
}

impl RelationshipObject {
	/// Relationship with linkage
	pub fn linkage(data: Linkage) -> Self {
		Self {
			data: Some(data),
			meta: None,
		}
	}

	/// Relationship marked as not included
	pub fn not_included() -> Self {
		Self {
			data: None,
			meta: Some(json!({ "included": false })),
		}
	}

	pub(crate) fn with_meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self
	}

	/// Rendered linkage, if any
	pub fn data(&self) -> Option<&Linkage> {
		self.data.as_ref()
	}

	/// Rendered meta, if any
	pub fn meta(&self) -> Option<&Value> {
		self.meta.as_ref()
	}

	/// Check whether linkage was rendered
	pub fn has_linkage(&self) -> bool {
		self.data.is_some()
	}

	/// Check whether nothing has been rendered yet
	pub(crate) fn is_empty(&self) -> bool {
		self.data.is_none() && self.meta.is_none()
	}

	/// Convert to a JSON value
	pub fn to_value(&self) -> Value {
		to_json(self)
	}
}

/// A rendered resource object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject {
	#[serde(rename = "type")]
	resource_type: String,
	id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	attributes: Option<IndexMap<String, Value>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	relationships: Option<IndexMap<String, RelationshipObject>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	meta: Option<Value>,
}

impl ResourceObject {
	pub(crate) fn new(
		resource_type: String,
		id: String,
		attributes: Option<IndexMap<String, Value>>,
		relationships: Option<IndexMap<String, RelationshipObject>>,
		meta: Option<Value>,
	) -> Self {
		Self {
			resource_type,
			id,
			attributes,
			relationships,
			meta,
		}
	}

	/// The `type` member
	pub fn resource_type(&self) -> &str {
		&self.resource_type
	}

	/// The `id` member
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Rendered attributes by formatted key
	pub fn attributes(&self) -> Option<&IndexMap<String, Value>> {
		self.attributes.as_ref()
	}

	/// Rendered relationships by formatted key
	pub fn relationships(&self) -> Option<&IndexMap<String, RelationshipObject>> {
		self.relationships.as_ref()
	}

	/// Look up one rendered attribute by formatted key
	pub fn attribute(&self, key: &str) -> Option<&Value> {
		self.attributes.as_ref()?.get(key)
	}

	/// Look up one rendered relationship by formatted key
	pub fn relationship(&self, key: &str) -> Option<&RelationshipObject> {
		self.relationships.as_ref()?.get(key)
	}

	/// Resource-level meta
	pub fn meta(&self) -> Option<&Value> {
		self.meta.as_ref()
	}

	/// Convert to a JSON value
	pub fn to_value(&self) -> Value {
		to_json(self)
	}
}

impl From<ResourceObject> for Value {
	fn from(object: ResourceObject) -> Self {
		object.to_value()
	}
}
