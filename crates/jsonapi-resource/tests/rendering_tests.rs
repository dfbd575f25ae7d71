//! Integration tests for resource rendering
//!
//! Covers relationship linkage, sparse fieldsets, conditional fields and
//! rendering from several threads against one shared definition.

use assert_json_diff::assert_json_eq;
use jsonapi_resource::{
	AttributeField, DomainObject, RelationshipField, Related, RenderError, RenderOptions,
	Resource, ResourceClasses, ResourceType,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;
use std::thread;

struct Person {
	id: &'static str,
	name: &'static str,
}

impl DomainObject for Person {
	fn attribute(&self, name: &str) -> Option<Value> {
		match name {
			"id" => Some(json!(self.id)),
			"name" => Some(json!(self.name)),
			_ => None,
		}
	}
}

struct Comment {
	id: u64,
}

impl DomainObject for Comment {
	fn attribute(&self, name: &str) -> Option<Value> {
		(name == "id").then(|| json!(self.id))
	}
}

struct Article {
	id: u64,
	title: &'static str,
	draft: bool,
	author: Option<Arc<dyn DomainObject>>,
	comments: Vec<Arc<dyn DomainObject>>,
}

impl DomainObject for Article {
	fn attribute(&self, name: &str) -> Option<Value> {
		match name {
			"id" => Some(json!(self.id)),
			"title" => Some(json!(self.title)),
			_ => None,
		}
	}

	fn relationship(&self, name: &str) -> Option<Related> {
		match name {
			"author" => Some(Related::optional(self.author.clone())),
			"comments" => Some(Related::Many(self.comments.clone())),
			_ => None,
		}
	}
}

fn is_draft(object: &dyn DomainObject) -> bool {
	object
		.downcast_ref::<Article>()
		.is_some_and(|article| article.draft)
}

#[fixture]
fn articles() -> Arc<ResourceType> {
	ResourceType::builder("SerializableArticle", "articles")
		.attribute("title")
		.field(
			AttributeField::new("review_state")
				.with_accessor(|_| json!("pending"))
				.when(is_draft),
		)
		.belongs_to("author")
		.has_many("comments")
		.build()
}

#[fixture]
fn classes() -> ResourceClasses {
	ResourceClasses::new()
		.register(ResourceType::builder("SerializablePerson", "people").build())
		.register(ResourceType::builder("SerializableComment", "comments").build())
}

#[fixture]
fn article() -> Article {
	Article {
		id: 12,
		title: "JSON:API paints my bikeshed!",
		draft: false,
		author: Some(Arc::new(Person {
			id: "9",
			name: "Dan",
		})),
		comments: vec![Arc::new(Comment { id: 5 }), Arc::new(Comment { id: 12 })],
	}
}

#[rstest]
fn test_full_linkage(articles: Arc<ResourceType>, article: Article, classes: ResourceClasses) {
	// Arrange
	let resource = Resource::new(&articles, &article).with_classes(&classes);
	let options = RenderOptions::new().with_include(["author", "comments"]);

	// Act
	let rendered = resource.render(&options).unwrap();

	// Assert
	assert_json_eq!(
		rendered.to_value(),
		json!({
			"type": "articles",
			"id": "12",
			"attributes": { "title": "JSON:API paints my bikeshed!" },
			"relationships": {
				"author": { "data": { "id": "9", "type": "people" } },
				"comments": {
					"data": [
						{ "id": "5", "type": "comments" },
						{ "id": "12", "type": "comments" }
					]
				}
			}
		})
	);
}

#[rstest]
fn test_serialized_output_matches_value(
	articles: Arc<ResourceType>,
	article: Article,
	classes: ResourceClasses,
) {
	let rendered = Resource::new(&articles, &article)
		.with_classes(&classes)
		.render(&RenderOptions::new().with_include(["comments"]))
		.unwrap();

	let serialized = serde_json::to_string(&rendered).unwrap();

	let reparsed: Value = serde_json::from_str(&serialized).unwrap();
	assert_eq!(reparsed, rendered.to_value());
	assert!(serialized.starts_with(r#"{"type":"articles","id":"12""#));
}

#[rstest]
fn test_missing_to_one_renders_null(
	articles: Arc<ResourceType>,
	article: Article,
	classes: ResourceClasses,
) {
	let anonymous = Article {
		author: None,
		..article
	};

	let rendered = Resource::new(&articles, &anonymous)
		.with_classes(&classes)
		.render(&RenderOptions::new().with_include(["author"]))
		.unwrap();

	assert_eq!(
		rendered.relationship("author").unwrap().to_value(),
		json!({ "data": null })
	);
}

#[rstest]
fn test_unresolved_class_fails_render(articles: Arc<ResourceType>, article: Article) {
	// Arrange
	let people = ResourceType::builder("SerializablePerson", "people").build();
	let classes = ResourceClasses::new().register(people);
	let resource = Resource::new(&articles, &article).with_classes(&classes);

	// Act
	let err = resource
		.render(&RenderOptions::new().with_include(["comments"]))
		.unwrap_err();

	// Assert
	assert_eq!(
		err,
		RenderError::UnresolvedResourceClass {
			relationship: "comments".to_string(),
			class_name: "Comment".to_string(),
		}
	);
	assert!(err.is_configuration_error());
	assert!(err.to_string().contains("SerializableComment"));
}

#[rstest]
fn test_unknown_fields_and_includes_ignored(
	articles: Arc<ResourceType>,
	article: Article,
	classes: ResourceClasses,
) {
	// Arrange
	let options = RenderOptions::new()
		.with_fields(["title", "bogus"])
		.with_include(["publisher"]);

	// Act
	let rendered = Resource::new(&articles, &article)
		.with_classes(&classes)
		.render(&options)
		.unwrap();

	// Assert
	assert_json_eq!(
		rendered.to_value(),
		json!({
			"type": "articles",
			"id": "12",
			"attributes": { "title": "JSON:API paints my bikeshed!" },
			"relationships": {}
		})
	);
}

#[rstest]
fn test_dotted_include_path(
	articles: Arc<ResourceType>,
	article: Article,
	classes: ResourceClasses,
) {
	let rendered = Resource::new(&articles, &article)
		.with_classes(&classes)
		.render(&RenderOptions::new().with_include(["comments.author"]))
		.unwrap();

	assert!(rendered.relationship("comments").unwrap().has_linkage());
	assert!(!rendered.relationship("author").unwrap().has_linkage());
}

#[rstest]
fn test_options_from_query_json(
	articles: Arc<ResourceType>,
	article: Article,
	classes: ResourceClasses,
) {
	// Arrange
	let options: RenderOptions =
		serde_json::from_value(json!({ "fields": ["author"], "include": ["author"] })).unwrap();

	// Act
	let rendered = Resource::new(&articles, &article)
		.with_classes(&classes)
		.render(&options)
		.unwrap();

	// Assert
	assert_json_eq!(
		rendered.to_value(),
		json!({
			"type": "articles",
			"id": "12",
			"attributes": {},
			"relationships": {
				"author": { "data": { "id": "9", "type": "people" } }
			}
		})
	);
}

#[rstest]
#[case(false, None)]
#[case(true, Some(json!("pending")))]
fn test_conditional_attribute(
	articles: Arc<ResourceType>,
	article: Article,
	#[case] draft: bool,
	#[case] expected: Option<Value>,
) {
	let article = Article { draft, ..article };

	let rendered = Resource::new(&articles, &article)
		.render(&RenderOptions::new())
		.unwrap();

	assert_eq!(rendered.attribute("review_state").cloned(), expected);
}

#[rstest]
fn test_always_linkage_and_override(article: Article) {
	// Arrange
	let writers = ResourceType::builder("WriterResource", "writers").build();
	let articles = ResourceType::builder("SerializableArticle", "articles")
		.field(
			RelationshipField::to_one("author")
				.with_resource_type(writers)
				.always_linkage(),
		)
		.field(RelationshipField::to_many("comments").with_meta(json!({ "count": 2 })))
		.build();

	// Act
	let rendered = Resource::new(&articles, &article)
		.render(&RenderOptions::new())
		.unwrap();

	// Assert
	assert_json_eq!(
		rendered.to_value(),
		json!({
			"type": "articles",
			"id": "12",
			"relationships": {
				"author": { "data": { "id": "9", "type": "writers" } },
				"comments": { "meta": { "count": 2 } }
			}
		})
	);
}

#[rstest]
fn test_redeclared_field_replaces_in_place(article: Article) {
	let articles = ResourceType::builder("SerializableArticle", "articles")
		.attribute("title")
		.attribute("slug")
		.attribute_with("title", |_| json!("redacted"))
		.build();

	let rendered = Resource::new(&articles, &article)
		.render(&RenderOptions::new())
		.unwrap();

	assert_eq!(
		rendered.to_value()["attributes"],
		json!({ "title": "redacted", "slug": null })
	);
	let keys: Vec<_> = rendered.attributes().unwrap().keys().cloned().collect();
	assert_eq!(keys, vec!["title", "slug"]);
}

#[rstest]
fn test_concurrent_rendering_shares_definition(
	articles: Arc<ResourceType>,
	classes: ResourceClasses,
) {
	// Arrange
	let classes = Arc::new(classes);
	let options = RenderOptions::new().with_include(["author"]);

	// Act
	let handles: Vec<_> = (0..8u64)
		.map(|id| {
			let articles = Arc::clone(&articles);
			let classes = Arc::clone(&classes);
			let options = options.clone();
			thread::spawn(move || {
				let article = Article {
					id,
					title: "concurrent",
					draft: false,
					author: Some(Arc::new(Person { id: "1", name: "Ann" })),
					comments: Vec::new(),
				};
				Resource::new(&articles, &article)
					.with_classes(classes.as_ref())
					.render(&options)
					.unwrap()
			})
		})
		.collect();
	let rendered: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

	// Assert
	for (index, object) in rendered.iter().enumerate() {
		assert_eq!(object.id(), index.to_string());
		assert_eq!(
			object.relationship("author").unwrap().to_value(),
			json!({ "data": { "id": "1", "type": "people" } })
		);
	}
}
