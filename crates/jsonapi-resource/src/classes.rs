//! Resource type lookup for related objects
//!
//! When a relationship has no explicit resource type, each related object is
//! serialized with the resource type registered for its class name. The
//! lookup is supplied by the surrounding application through
//! [`ResourceClassResolver`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::resource_type::ResourceType;

/// Prefix of the conventional resource type name for a class
pub const CONVENTION_PREFIX: &str = "Serializable";

/// Finds the resource type used to serialize objects of a class
pub trait ResourceClassResolver: Send + Sync {
	/// Resource type for objects whose class name is `class_name`
	fn resolve(&self, class_name: &str) -> Option<Arc<ResourceType>>;
}

impl<F> ResourceClassResolver for F
where
	F: Fn(&str) -> Option<Arc<ResourceType>> + Send + Sync,
{
	fn resolve(&self, class_name: &str) -> Option<Arc<ResourceType>> {
		self(class_name)
	}
}

/// Map-backed resolver with a naming convention fallback
///
/// Explicit class mappings are consulted first. Failing that, the class
/// `Post` resolves to a registered resource type named `SerializablePost`.
///
/// # Examples
///
/// ```
/// use jsonapi_resource::{ResourceClassResolver, ResourceClasses, ResourceType};
///
/// let post = ResourceType::builder("SerializablePost", "posts").build();
/// let legacy = ResourceType::builder("LegacyComment", "comments").build();
///
/// let classes = ResourceClasses::new()
///     .register(post)
///     .map_class("Comment", legacy);
///
/// let tag = |class_name: &str| classes.resolve(class_name).map(|t| t.type_tag().to_string());
///
/// assert_eq!(tag("Post"), Some("posts".into()));
/// assert_eq!(tag("Comment"), Some("comments".into()));
/// assert!(classes.resolve("Review").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceClasses {
	explicit: HashMap<String, Arc<ResourceType>>,
	by_name: HashMap<String, Arc<ResourceType>>,
}

impl ResourceClasses {
	/// Create an empty resolver
	pub fn new() -> Self {
		Self::default()
	}

	/// Serialize objects of class `class_name` with `resource_type`
	pub fn map_class(
		mut self,
		class_name: impl Into<String>,
		resource_type: Arc<ResourceType>,
	) -> Self {
		self.insert(class_name, resource_type);
		self
	}

	/// Make `resource_type` available to the naming convention
	pub fn register(mut self, resource_type: Arc<ResourceType>) -> Self {
		self.by_name
			.insert(resource_type.name().to_string(), resource_type);
		self
	}

	/// Add an explicit class mapping in place
	pub fn insert(&mut self, class_name: impl Into<String>, resource_type: Arc<ResourceType>) {
		self.explicit.insert(class_name.into(), resource_type);
	}

	/// Check if nothing is registered
	pub fn is_empty(&self) -> bool {
		self.explicit.is_empty() && self.by_name.is_empty()
	}
}

impl ResourceClassResolver for ResourceClasses {
	fn resolve(&self, class_name: &str) -> Option<Arc<ResourceType>> {
		if let Some(resource_type) = self.explicit.get(class_name) {
			return Some(Arc::clone(resource_type));
		}
		self.by_name
			.get(&format!("{}{}", CONVENTION_PREFIX, class_name))
			.cloned()
	}
}
