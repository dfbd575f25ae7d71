//! # JSON:API Resource
//!
//! Resource serialization engine: renders domain objects into JSON:API
//! resource objects with typed attributes, relationship linkage, inclusion
//! control, sparse fieldsets and key formatting.
//!
//! ## Overview
//!
//! - **[`ResourceType`]**: an immutable, inheritable definition (type tag, id
//!   rule, key formatter, declared fields), assembled with a builder
//! - **[`Resource`]**: a domain object bound to its resource type
//! - **[`RenderOptions`]**: per-call sparse fieldset and inclusion paths
//! - **[`ResourceObject`]**: the rendered output, serializable with serde
//!
//! ## Example
//!
//! ```
//! use jsonapi_resource::{
//!     DomainObject, KeyFormatter, Related, RenderOptions, Resource, ResourceClasses,
//!     ResourceType,
//! };
//! use serde_json::{Value, json};
//! use std::sync::Arc;
//!
//! struct Post {
//!     id: u64,
//! }
//!
//! impl DomainObject for Post {
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         (name == "id").then(|| json!(self.id))
//!     }
//! }
//!
//! struct User {
//!     posts: Vec<Arc<dyn DomainObject>>,
//! }
//!
//! impl DomainObject for User {
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "id" => Some(json!("u1")),
//!             "first_name" => Some(json!("Ada")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn relationship(&self, name: &str) -> Option<Related> {
//!         (name == "posts").then(|| Related::Many(self.posts.clone()))
//!     }
//! }
//!
//! let users = ResourceType::builder("SerializableUser", "users")
//!     .key_format(KeyFormatter::camel_lower())
//!     .attribute("first_name")
//!     .has_many("posts")
//!     .belongs_to("manager")
//!     .build();
//! let classes = ResourceClasses::new()
//!     .register(ResourceType::builder("SerializablePost", "posts").build());
//!
//! let user = User { posts: vec![Arc::new(Post { id: 1 })] };
//! let rendered = Resource::new(&users, &user)
//!     .with_classes(&classes)
//!     .render(&RenderOptions::new().with_include(["posts"]))
//!     .unwrap();
//!
//! assert_eq!(
//!     rendered.to_value(),
//!     json!({
//!         "type": "users",
//!         "id": "u1",
//!         "attributes": { "firstName": "Ada" },
//!         "relationships": {
//!             "posts": { "data": [{ "id": "1", "type": "posts" }] },
//!             "manager": { "meta": { "included": false } }
//!         }
//!     })
//! );
//! ```
//!
//! ## Diagnostics
//!
//! The crate logs through `tracing` and never installs a subscriber.
//! Deprecation warnings use the [`DEPRECATION_TARGET`] target.

pub mod classes;
pub mod document;
pub mod error;
pub mod field;
pub mod fieldset;
pub mod key_format;
pub mod object;
pub mod options;
pub mod registry;
pub mod relationship;
pub mod resource;
pub mod resource_type;

pub use classes::{CONVENTION_PREFIX, ResourceClassResolver, ResourceClasses};
pub use document::{Linkage, RelationshipObject, ResourceIdentifier, ResourceObject};
pub use error::{RenderError, Result};
pub use field::{
	AttributeAccessor, AttributeField, Cardinality, Condition, FieldDescriptor,
	RelationshipAccessor, RelationshipField,
};
pub use fieldset::resolve_fieldset;
pub use key_format::{DEPRECATION_TARGET, KeyFormatter};
pub use object::{DomainObject, Related};
pub use options::RenderOptions;
pub use registry::{FieldMap, FieldRegistry};
pub use relationship::RelationshipRenderer;
pub use resource::Resource;
pub use resource_type::{
	IdRule, MetaRule, ResolvedField, ResourceType, ResourceTypeBuilder, default_id,
};
