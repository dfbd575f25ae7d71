//! Error types for resource rendering

use crate::field::Cardinality;

/// Errors that can occur while rendering a resource object
///
/// Unknown fieldset entries, unknown include paths and redeclared fields are
/// not errors; they are absorbed by the renderer. Only misconfigurations that
/// would otherwise produce partial or wrong linkage fail the render call.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
	/// No resource type could be found for a related object's class
	#[error(
		"No resource type found for class '{class_name}' in relationship '{relationship}' \
		 (register it explicitly or define 'Serializable{class_name}')"
	)]
	UnresolvedResourceClass {
		relationship: String,
		class_name: String,
	},

	/// The relationship accessor returned a value of the wrong arity
	#[error(
		"Relationship '{relationship}' is declared {expected} but its accessor returned {found}"
	)]
	CardinalityMismatch {
		relationship: String,
		expected: Cardinality,
		found: Cardinality,
	},

	/// A related object produced an empty id and cannot be linked
	#[error(
		"Related object of type '{resource_type}' in relationship '{relationship}' has an empty id"
	)]
	EmptyIdentifier {
		relationship: String,
		resource_type: String,
	},
}

impl RenderError {
	/// Name of the relationship the error was raised for
	pub fn relationship(&self) -> &str {
		match self {
			RenderError::UnresolvedResourceClass { relationship, .. }
			| RenderError::CardinalityMismatch { relationship, .. }
			| RenderError::EmptyIdentifier { relationship, .. } => relationship,
		}
	}

	/// Check if this error stems from how resource types were wired together
	/// rather than from the data being rendered
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			RenderError::UnresolvedResourceClass { .. } | RenderError::CardinalityMismatch { .. }
		)
	}
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
