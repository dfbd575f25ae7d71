//! Sparse fieldset resolution

use std::collections::HashSet;

use crate::resource_type::ResolvedField;

/// Select the fields to render for one call
///
/// With no requested set every field is selected. Otherwise a field is
/// selected when either its declared name or its formatted key is
/// requested, so clients may use whichever form they see on the wire.
/// Unknown names are ignored. The selection keeps resolution order, not the
/// order of the request.
///
/// # Examples
///
/// ```
/// use jsonapi_resource::{KeyFormatter, ResourceType, resolve_fieldset};
/// use std::collections::HashSet;
///
/// let user = ResourceType::builder("SerializableUser", "users")
///     .key_format(KeyFormatter::camel_lower())
///     .attributes(["first_name", "last_name", "email"])
///     .build();
///
/// let requested: HashSet<String> = ["email", "firstName", "unknown"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let selected: Vec<_> = resolve_fieldset(user.fields(), Some(&requested))
///     .into_iter()
///     .map(|field| field.name())
///     .collect();
///
/// assert_eq!(selected, vec!["first_name", "email"]);
/// ```
pub fn resolve_fieldset<'a>(
	fields: &'a [ResolvedField],
	requested: Option<&HashSet<String>>,
) -> Vec<&'a ResolvedField> {
	match requested {
		None => fields.iter().collect(),
		Some(requested) => fields
			.iter()
			.filter(|field| requested.contains(field.name()) || requested.contains(field.key()))
			.collect(),
	}
}
