//! Key formatting
//!
//! A key formatter maps a declared field name to the key it is rendered
//! under. It applies to attribute and relationship names only; `type` and
//! `id` are never formatted. Formatters are pure: they see nothing but the
//! name, so the formatted key of a field can be computed once per resource
//! type and reused across renders.

use convert_case::{Case, Casing};
use std::fmt;
use std::sync::Arc;

/// Diagnostic target for deprecation warnings
pub const DEPRECATION_TARGET: &str = "jsonapi_resource::deprecation";

type FormatFn = dyn Fn(&str) -> String + Send + Sync;

/// Maps field names to output keys
///
/// # Examples
///
/// ```
/// use jsonapi_resource::KeyFormatter;
///
/// let identity = KeyFormatter::identity();
/// assert_eq!(identity.format("first_name"), "first_name");
///
/// let camel = KeyFormatter::camel_lower();
/// assert_eq!(camel.format("first_name"), "firstName");
///
/// let custom = KeyFormatter::new(|name| name.to_uppercase());
/// assert_eq!(custom.format("name"), "NAME");
/// ```
#[derive(Clone)]
pub struct KeyFormatter {
	label: &'static str,
	format: Option<Arc<FormatFn>>,
}

impl KeyFormatter {
	/// Formatter that returns names unchanged
	pub fn identity() -> Self {
		Self {
			label: "identity",
			format: None,
		}
	}

	/// Formatter backed by an arbitrary pure function
	pub fn new<F>(format: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		Self::labelled("custom", format)
	}

	fn labelled<F>(label: &'static str, format: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		Self {
			label,
			format: Some(Arc::new(format)),
		}
	}

	/// `first_name` → `firstName`
	pub fn camel_lower() -> Self {
		Self::labelled("camel_lower", |name| name.to_case(Case::Camel))
	}

	/// `first_name` → `FirstName`
	pub fn camel() -> Self {
		Self::labelled("camel", |name| name.to_case(Case::Pascal))
	}

	/// `first_name` → `first-name`
	pub fn dasherize() -> Self {
		Self::labelled("dasherize", |name| name.to_case(Case::Kebab))
	}

	/// `firstName` → `first_name`
	pub fn underscore() -> Self {
		Self::labelled("underscore", |name| name.to_case(Case::Snake))
	}

	/// `first_name` → `First_name`
	///
	/// Upper-cases the first character and lower-cases the rest, leaving
	/// separators alone.
	pub fn capitalize() -> Self {
		Self::labelled("capitalize", capitalize)
	}

	/// Format a field name into its output key
	pub fn format(&self, name: &str) -> String {
		match &self.format {
			Some(format) => format(name),
			None => name.to_string(),
		}
	}

	/// Check if this formatter leaves names unchanged
	pub fn is_identity(&self) -> bool {
		self.format.is_none()
	}
}

impl Default for KeyFormatter {
	fn default() -> Self {
		Self::identity()
	}
}

impl fmt::Debug for KeyFormatter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("KeyFormatter").field(&self.label).finish()
	}
}

fn capitalize(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

/// Emit the warning for the deprecated formatter installation path
pub(crate) fn warn_prepended_key_format(resource_name: &str) {
	tracing::warn!(
		target: DEPRECATION_TARGET,
		resource = %resource_name,
		"DEPRECATION WARNING: installing a key format with `prepend_key_format` is deprecated \
		 and will be removed; use `key_format` instead (rendering is unchanged)"
	);
}
