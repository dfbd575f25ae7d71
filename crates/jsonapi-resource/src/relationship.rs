//! Relationship rendering
//!
//! An included relationship renders linkage: the `{id, type}` identifiers of
//! its related resources. A relationship that is not included renders a
//! `{"included": false}` meta marker instead, and its accessor is never
//! called, so unused associations are never loaded.

use std::sync::Arc;

use crate::classes::ResourceClassResolver;
use crate::document::{Linkage, RelationshipObject, ResourceIdentifier};
use crate::error::{RenderError, Result};
use crate::field::{Cardinality, RelationshipField};
use crate::object::{DomainObject, Related};
use crate::options::RenderOptions;
use crate::resource_type::ResourceType;

/// Renders relationships of one bound object
pub struct RelationshipRenderer<'a> {
	classes: Option<&'a dyn ResourceClassResolver>,
}

impl<'a> RelationshipRenderer<'a> {
	/// Create a renderer that looks up related resource types in `classes`
	pub fn new(classes: Option<&'a dyn ResourceClassResolver>) -> Self {
		Self { classes }
	}

	/// Render one relationship
	///
	/// Inclusion is decided on the declared (unformatted) name.
	pub fn render(
		&self,
		field: &RelationshipField,
		object: &dyn DomainObject,
		options: &RenderOptions,
	) -> Result<RelationshipObject> {
		let included = options.includes(field.name());
		let mut rendered = if included || field.has_always_linkage() {
			RelationshipObject::linkage(self.linkage(field, object)?)
		} else {
			RelationshipObject::default()
		};
		if let Some(meta) = field.meta() {
			rendered = rendered.with_meta(meta.clone());
		}
		if rendered.is_empty() {
			rendered = RelationshipObject::not_included();
		}
		Ok(rendered)
	}

	fn linkage(&self, field: &RelationshipField, object: &dyn DomainObject) -> Result<Linkage> {
		let related = field.related(object);
		let cardinality = field
			.cardinality()
			.or_else(|| related.cardinality())
			.unwrap_or(Cardinality::ToOne);
		tracing::trace!(
			relationship = field.name(),
			%cardinality,
			"Rendering relationship linkage"
		);

		match (cardinality, related) {
			(Cardinality::ToOne, Related::None) => Ok(Linkage::ToOne(None)),
			(Cardinality::ToOne, Related::One(target)) => {
				Ok(Linkage::ToOne(Some(self.identify(field, target.as_ref())?)))
			}
			(Cardinality::ToMany, Related::None) => Ok(Linkage::ToMany(Vec::new())),
			(Cardinality::ToMany, Related::Many(targets)) => targets
				.iter()
				.map(|target| self.identify(field, target.as_ref()))
				.collect::<Result<Vec<_>>>()
				.map(Linkage::ToMany),
			(Cardinality::ToOne, Related::Many(_)) => Err(RenderError::CardinalityMismatch {
				relationship: field.name().to_string(),
				expected: Cardinality::ToOne,
				found: Cardinality::ToMany,
			}),
			(Cardinality::ToMany, Related::One(_)) => Err(RenderError::CardinalityMismatch {
				relationship: field.name().to_string(),
				expected: Cardinality::ToMany,
				found: Cardinality::ToOne,
			}),
		}
	}

	fn identify(
		&self,
		field: &RelationshipField,
		target: &dyn DomainObject,
	) -> Result<ResourceIdentifier> {
		let resource_type = self.resource_type_for(field, target)?;
		let id = resource_type.id_for(target);
		if id.is_empty() {
			return Err(RenderError::EmptyIdentifier {
				relationship: field.name().to_string(),
				resource_type: resource_type.type_tag().to_string(),
			});
		}
		Ok(ResourceIdentifier::new(id, resource_type.type_tag()))
	}

	fn resource_type_for(
		&self,
		field: &RelationshipField,
		target: &dyn DomainObject,
	) -> Result<Arc<ResourceType>> {
		if let Some(resource_type) = field.resource_type() {
			return Ok(Arc::clone(resource_type));
		}
		let class_name = target.class_name();
		self.classes
			.and_then(|classes| classes.resolve(class_name))
			.ok_or_else(|| {
				tracing::warn!(
					relationship = field.name(),
					class = class_name,
					"No resource type registered for related object"
				);
				RenderError::UnresolvedResourceClass {
					relationship: field.name().to_string(),
					class_name: class_name.to_string(),
				}
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::classes::ResourceClasses;
	use rstest::{fixture, rstest};
	use serde_json::{Value, json};
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct Post {
		id: u64,
	}

	impl DomainObject for Post {
		fn attribute(&self, name: &str) -> Option<Value> {
			(name == "id").then(|| json!(self.id))
		}
	}

	struct Draft;

	impl DomainObject for Draft {}

	struct Blog {
		posts: Vec<Arc<dyn DomainObject>>,
	}

	impl DomainObject for Blog {
		fn relationship(&self, name: &str) -> Option<Related> {
			match name {
				"posts" => Some(Related::Many(self.posts.clone())),
				"featured" => self.posts.first().cloned().map(Related::One),
				_ => None,
			}
		}
	}

	#[fixture]
	fn classes() -> ResourceClasses {
		ResourceClasses::new().register(ResourceType::builder("SerializablePost", "posts").build())
	}

	#[fixture]
	fn blog() -> Blog {
		Blog {
			posts: vec![Arc::new(Post { id: 1 }), Arc::new(Post { id: 2 })],
		}
	}

	fn included(name: &str) -> RenderOptions {
		RenderOptions::new().with_include([name])
	}

	#[rstest]
	fn test_to_many_linkage(classes: ResourceClasses, blog: Blog) {
		// Arrange
		let renderer = RelationshipRenderer::new(Some(&classes));
		let field = RelationshipField::to_many("posts");

		// Act
		let rendered = renderer.render(&field, &blog, &included("posts")).unwrap();

		// Assert
		assert_eq!(
			rendered.to_value(),
			json!({ "data": [{ "id": "1", "type": "posts" }, { "id": "2", "type": "posts" }] })
		);
	}

	#[rstest]
	fn test_inferred_cardinality(classes: ResourceClasses, blog: Blog) {
		let renderer = RelationshipRenderer::new(Some(&classes));

		let many = renderer
			.render(&RelationshipField::new("posts"), &blog, &included("posts"))
			.unwrap();
		let one = renderer
			.render(&RelationshipField::new("featured"), &blog, &included("featured"))
			.unwrap();
		let none = renderer
			.render(&RelationshipField::new("missing"), &blog, &included("missing"))
			.unwrap();

		assert!(matches!(many.data(), Some(Linkage::ToMany(ids)) if ids.len() == 2));
		assert_eq!(one.to_value(), json!({ "data": { "id": "1", "type": "posts" } }));
		assert_eq!(none.to_value(), json!({ "data": null }));
	}

	#[rstest]
	fn test_absent_related_objects(classes: ResourceClasses) {
		let renderer = RelationshipRenderer::new(Some(&classes));
		let empty = Blog { posts: Vec::new() };

		let to_one = renderer
			.render(&RelationshipField::to_one("featured"), &empty, &included("featured"))
			.unwrap();
		let to_many = renderer
			.render(&RelationshipField::to_many("comments"), &empty, &included("comments"))
			.unwrap();

		assert_eq!(to_one.to_value(), json!({ "data": null }));
		assert_eq!(to_many.to_value(), json!({ "data": [] }));
	}

	#[rstest]
	fn test_not_included_never_calls_accessor() {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let field = RelationshipField::to_many("posts").with_accessor(move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
			Related::None
		});
		let renderer = RelationshipRenderer::new(None);

		// Act
		let rendered = renderer.render(&field, &Draft, &included("comments")).unwrap();

		// Assert
		assert_eq!(rendered.to_value(), json!({ "meta": { "included": false } }));
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[rstest]
	fn test_override_skips_class_lookup(blog: Blog) {
		let article = ResourceType::builder("ArticleResource", "articles").build();
		let field = RelationshipField::to_many("posts").with_resource_type(article);
		let renderer = RelationshipRenderer::new(None);

		let rendered = renderer.render(&field, &blog, &included("posts")).unwrap();

		assert_eq!(
			rendered.to_value(),
			json!({
				"data": [{ "id": "1", "type": "articles" }, { "id": "2", "type": "articles" }]
			})
		);
	}

	#[rstest]
	fn test_unresolved_class_fails(blog: Blog) {
		let empty = ResourceClasses::new();
		let renderer = RelationshipRenderer::new(Some(&empty));

		let err = renderer
			.render(&RelationshipField::to_many("posts"), &blog, &included("posts"))
			.unwrap_err();

		assert_eq!(
			err,
			RenderError::UnresolvedResourceClass {
				relationship: "posts".to_string(),
				class_name: "Post".to_string(),
			}
		);
	}

	#[rstest]
	fn test_unresolved_class_ignored_when_not_included(blog: Blog) {
		let renderer = RelationshipRenderer::new(None);

		let rendered = renderer
			.render(&RelationshipField::to_many("posts"), &blog, &RenderOptions::new())
			.unwrap();

		assert!(!rendered.has_linkage());
	}

	#[rstest]
	#[case(RelationshipField::to_one("posts"), Cardinality::ToOne, Cardinality::ToMany)]
	#[case(RelationshipField::to_many("featured"), Cardinality::ToMany, Cardinality::ToOne)]
	fn test_cardinality_mismatch(
		classes: ResourceClasses,
		blog: Blog,
		#[case] field: RelationshipField,
		#[case] expected: Cardinality,
		#[case] found: Cardinality,
	) {
		let renderer = RelationshipRenderer::new(Some(&classes));
		let options = included(field.name());

		let err = renderer.render(&field, &blog, &options).unwrap_err();

		assert_eq!(
			err,
			RenderError::CardinalityMismatch {
				relationship: field.name().to_string(),
				expected,
				found,
			}
		);
	}

	#[rstest]
	fn test_empty_identifier_fails(classes: ResourceClasses) {
		let field = RelationshipField::to_one("draft").with_accessor(|_| Related::one(Draft));
		let draft_type = ResourceType::builder("SerializableDraft", "drafts").build();
		let classes = classes.register(draft_type);
		let renderer = RelationshipRenderer::new(Some(&classes));

		let err = renderer.render(&field, &Draft, &included("draft")).unwrap_err();

		assert!(matches!(
			err,
			RenderError::EmptyIdentifier { ref resource_type, .. } if resource_type == "drafts"
		));
	}

	#[rstest]
	fn test_always_linkage_and_meta(classes: ResourceClasses, blog: Blog) {
		// Arrange
		let renderer = RelationshipRenderer::new(Some(&classes));
		let always = RelationshipField::to_many("posts").always_linkage();
		let with_meta = RelationshipField::to_many("posts").with_meta(json!({ "count": 2 }));

		// Act
		let always = renderer.render(&always, &blog, &RenderOptions::new()).unwrap();
		let meta_only = renderer.render(&with_meta, &blog, &RenderOptions::new()).unwrap();
		let meta_and_data = renderer.render(&with_meta, &blog, &included("posts")).unwrap();

		// Assert
		assert!(always.has_linkage());
		assert!(always.meta().is_none());
		assert_eq!(meta_only.to_value(), json!({ "meta": { "count": 2 } }));
		assert!(meta_and_data.has_linkage());
		assert_eq!(meta_and_data.meta(), Some(&json!({ "count": 2 })));
	}
}
