//! # jsonapi-serializable
//!
//! Serialize in-memory domain objects into JSON:API resource objects.
//!
//! This crate is a facade over the workspace crates. The engine lives in
//! [`resource`] (`jsonapi-resource`); everything commonly needed is also
//! re-exported at the top level and through [`prelude`].
//!
//! ## Quick Example
//!
//! ```
//! use jsonapi_serializable::prelude::*;
//! use serde_json::{Value, json};
//!
//! struct Foo;
//!
//! impl DomainObject for Foo {
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         (name == "name").then(|| json!("Foo"))
//!     }
//! }
//!
//! let foo = ResourceType::builder("SerializableFoo", "foo")
//!     .id(|_| "bar".to_string())
//!     .key_format(KeyFormatter::capitalize())
//!     .attributes(["name", "address"])
//!     .build();
//!
//! let rendered = Resource::new(&foo, &Foo).render(&RenderOptions::new())?;
//!
//! assert_eq!(
//!     rendered.to_value(),
//!     json!({ "type": "foo", "id": "bar", "attributes": { "Name": "Foo", "Address": null } })
//! );
//! # Ok::<(), RenderError>(())
//! ```

pub use jsonapi_resource as resource;

pub use jsonapi_resource::{
	AttributeField, Cardinality, DEPRECATION_TARGET, DomainObject, FieldDescriptor, KeyFormatter,
	Linkage, Related, RelationshipField, RelationshipObject, RenderError, RenderOptions,
	Resource, ResourceClassResolver, ResourceClasses, ResourceIdentifier, ResourceObject,
	ResourceType, ResourceTypeBuilder, Result,
};

pub mod prelude {
	pub use crate::{
		AttributeField, Cardinality, DomainObject, KeyFormatter, Related, RelationshipField,
		RenderError, RenderOptions, Resource, ResourceClassResolver, ResourceClasses,
		ResourceObject, ResourceType,
	};
}
