//! Resource rendering
//!
//! [`Resource`] binds a domain object to its [`ResourceType`] and renders it
//! into a [`ResourceObject`]. Rendering is stateless: the same resource and
//! options always produce the same output, and nothing on the type is
//! mutated apart from its lazily populated field cache.

use indexmap::IndexMap;

use crate::classes::ResourceClassResolver;
use crate::document::ResourceObject;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::fieldset::resolve_fieldset;
use crate::object::DomainObject;
use crate::options::RenderOptions;
use crate::relationship::RelationshipRenderer;
use crate::resource_type::ResourceType;

/// A domain object bound to the resource type it is rendered with
///
/// # Examples
///
/// ```
/// use jsonapi_resource::{DomainObject, RenderOptions, Resource, ResourceType};
/// use serde_json::{Value, json};
///
/// struct User;
///
/// impl DomainObject for User {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(json!(7)),
///             "name" => Some(json!("Ada")),
///             _ => None,
///         }
///     }
/// }
///
/// let users = ResourceType::builder("SerializableUser", "users")
///     .attribute("name")
///     .build();
///
/// let rendered = Resource::new(&users, &User).render(&RenderOptions::new()).unwrap();
///
/// assert_eq!(
///     rendered.to_value(),
///     json!({ "type": "users", "id": "7", "attributes": { "name": "Ada" } })
/// );
/// ```
#[derive(Clone, Copy)]
pub struct Resource<'a> {
	resource_type: &'a ResourceType,
	object: &'a dyn DomainObject,
	classes: Option<&'a dyn ResourceClassResolver>,
}

impl<'a> Resource<'a> {
	/// Bind `object` to `resource_type`
	pub fn new(resource_type: &'a ResourceType, object: &'a dyn DomainObject) -> Self {
		Self {
			resource_type,
			object,
			classes: None,
		}
	}

	/// Look up resource types of related objects through `classes`
	pub fn with_classes(mut self, classes: &'a dyn ResourceClassResolver) -> Self {
		self.classes = Some(classes);
		self
	}

	/// The bound resource type
	pub fn resource_type(&self) -> &ResourceType {
		self.resource_type
	}

	/// The bound object
	pub fn object(&self) -> &dyn DomainObject {
		self.object
	}

	/// Render the resource object
	///
	/// Fails only when an included relationship cannot be linked; see
	/// [`RenderError`](crate::RenderError).
	pub fn render(&self, options: &RenderOptions) -> Result<ResourceObject> {
		let resource_type = self.resource_type;
		let id = resource_type.id_for(self.object);
		tracing::debug!(
			resource = resource_type.name(),
			type_tag = resource_type.type_tag(),
			%id,
			"Rendering resource"
		);

		let relationship_renderer = RelationshipRenderer::new(self.classes);
		let mut attributes = IndexMap::new();
		let mut relationships = IndexMap::new();

		for field in resolve_fieldset(resource_type.fields(), options.fields()) {
			if !field.descriptor().is_rendered_for(self.object) {
				tracing::trace!(field = field.name(), "Field condition not met, skipping");
				continue;
			}
			match field.descriptor() {
				FieldDescriptor::Attribute(attribute) => {
					attributes.insert(field.key().to_string(), attribute.value(self.object));
				}
				FieldDescriptor::Relationship(relationship) => {
					let rendered =
						relationship_renderer.render(relationship, self.object, options)?;
					relationships.insert(field.key().to_string(), rendered);
				}
			}
		}

		Ok(ResourceObject::new(
			resource_type.type_tag().to_string(),
			id,
			resource_type.has_attributes().then_some(attributes),
			resource_type.has_relationships().then_some(relationships),
			resource_type.meta_for(self.object),
		))
	}
}
