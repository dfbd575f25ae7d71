//! Per-call render options

use serde::Deserialize;
use std::collections::HashSet;

/// Options for a single render call
///
/// `fields` restricts which fields are rendered; entries may name a field by
/// its declared name or by its formatted key. `None` renders every field,
/// while an empty set renders none. `include` lists the relationships whose
/// linkage is rendered, by declared name; dotted paths such as
/// `posts.author` include their first segment.
///
/// Options can also be deserialized, e.g. from
/// `{"fields": ["name"], "include": ["posts"]}`.
///
/// # Examples
///
/// ```
/// use jsonapi_resource::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_fields(["name", "posts"])
///     .with_include(["posts.author"]);
///
/// assert!(options.fields().is_some_and(|fields| fields.contains("name")));
/// assert!(options.includes("posts"));
/// assert!(!options.includes("author"));
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	fields: Option<HashSet<String>>,
	include: HashSet<String>,
}

impl RenderOptions {
	/// Render every field, include nothing
	pub fn new() -> Self {
		Self::default()
	}

	/// Restrict rendering to the given fields
	pub fn with_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Render linkage for the given relationships
	pub fn with_include<I, S>(mut self, include: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.include.extend(include.into_iter().map(Into::into));
		self
	}

	/// Requested fields, `None` when unrestricted
	pub fn fields(&self) -> Option<&HashSet<String>> {
		self.fields.as_ref()
	}

	/// Requested inclusion paths
	pub fn include(&self) -> &HashSet<String> {
		&self.include
	}

	/// Check whether the relationship `name` is included
	pub fn includes(&self, name: &str) -> bool {
		self.include.iter().any(|path| {
			path == name
				|| path
					.strip_prefix(name)
					.is_some_and(|rest| rest.starts_with('.'))
		})
	}
}
