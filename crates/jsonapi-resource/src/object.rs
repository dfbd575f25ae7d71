//! Domain object interface
//!
//! The renderer never requires a specific base type for the objects it
//! serializes. Anything implementing [`DomainObject`] can be bound to a
//! resource: attributes are read by name, relationships are read by name, and
//! the object's class name drives the default resource type lookup for
//! related objects.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::field::Cardinality;

/// Read access to a domain object, by field name
///
/// Every method has a default, so an implementation only provides what its
/// resource types actually read. Absent attributes render as `null` and
/// absent relationships render as empty linkage.
///
/// # Examples
///
/// ```
/// use jsonapi_resource::DomainObject;
/// use serde_json::{Value, json};
///
/// struct Post {
///     id: u64,
///     title: String,
/// }
///
/// impl DomainObject for Post {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(json!(self.id)),
///             "title" => Some(json!(self.title)),
///             _ => None,
///         }
///     }
/// }
///
/// let post = Post { id: 1, title: "Hello".to_string() };
/// assert_eq!(post.class_name(), "Post");
/// assert_eq!(post.attribute("title"), Some(json!("Hello")));
/// assert!(post.relationship("author").is_none());
/// ```
pub trait DomainObject: Any + Send + Sync + 'static {
	/// Runtime class name of the object
	///
	/// Used to find the resource type for this object when it appears on the
	/// far side of a relationship. Defaults to the unqualified Rust type name.
	fn class_name(&self) -> &str {
		short_type_name(std::any::type_name::<Self>())
	}

	/// Read the attribute `name`, or `None` if the object has no such property
	fn attribute(&self, _name: &str) -> Option<Value> {
		None
	}

	/// Read the related object(s) for `name`, or `None` if there are none
	fn relationship(&self, _name: &str) -> Option<Related> {
		None
	}
}

impl dyn DomainObject {
	/// Downcast to the concrete object type
	///
	/// Lets custom accessors reach typed fields instead of going through
	/// [`DomainObject::attribute`].
	pub fn downcast_ref<T: DomainObject>(&self) -> Option<&T> {
		let any: &dyn Any = self;
		any.downcast_ref::<T>()
	}
}

impl fmt::Debug for dyn DomainObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DomainObject")
			.field("class_name", &self.class_name())
			.finish_non_exhaustive()
	}
}

/// Strip the module path and generic arguments from a type name
fn short_type_name(full: &str) -> &str {
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

/// Related object(s) returned by a relationship accessor
#[derive(Clone)]
pub enum Related {
	/// No related object
	None,
	/// A single related object
	One(Arc<dyn DomainObject>),
	/// An ordered collection of related objects
	Many(Vec<Arc<dyn DomainObject>>),
}

impl Related {
	/// Wrap a single object
	pub fn one<T: DomainObject>(object: T) -> Self {
		Related::One(Arc::new(object))
	}

	/// Wrap an optional single object
	pub fn optional(object: Option<Arc<dyn DomainObject>>) -> Self {
		object.map_or(Related::None, Related::One)
	}

	/// Wrap a collection of objects
	pub fn many<I>(objects: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Arc<dyn DomainObject>>,
	{
		Related::Many(objects.into_iter().map(Into::into).collect())
	}

	/// The arity this value carries, if it carries one at all
	pub fn cardinality(&self) -> Option<Cardinality> {
		match self {
			Related::None => None,
			Related::One(_) => Some(Cardinality::ToOne),
			Related::Many(_) => Some(Cardinality::ToMany),
		}
	}

	/// Check whether there is no related object
	pub fn is_none(&self) -> bool {
		matches!(self, Related::None)
	}
}

impl fmt::Debug for Related {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Related::None => f.write_str("None"),
			Related::One(object) => f.debug_tuple("One").field(object).finish(),
			Related::Many(objects) => f.debug_tuple("Many").field(objects).finish(),
		}
	}
}

impl From<Option<Related>> for Related {
	fn from(value: Option<Related>) -> Self {
		value.unwrap_or(Related::None)
	}
}
