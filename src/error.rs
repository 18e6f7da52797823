use crate::json_ext::{Object, Path};
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure surfaced by a resolver, either synchronously or through the
/// rejection of an eventual value.
///
/// Note that this is not returned to the client as-is; it is converted to a
/// [`struct@Error`] at the response path where it was observed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct ResolverError {
    /// The reason the resolver failed.
    pub message: String,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Convert the failure to a GraphQL error at the given response path.
    pub fn to_graphql_error(&self, path: Path, locations: Vec<Location>) -> Error {
        Error {
            message: self.message.clone(),
            locations,
            path: Some(path),
            extensions: Default::default(),
        }
    }
}

impl From<&str> for ResolverError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ResolverError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Any error.
#[derive(Error, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[error("{message}")]
#[serde(rename_all = "camelCase", default)]
pub struct Error {
    /// The error message.
    pub message: String,

    /// The locations of the error from the originating request.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    /// If this is a field error, the response path to that field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,

    /// The optional graphql extensions.
    #[serde(skip_serializing_if = "Object::is_empty")]
    pub extensions: Object,
}

/// A location in the request that triggered a graphql error.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// The line number.
    pub line: u32,

    /// The column number.
    pub column: u32,
}

/// Error in the schema.
#[derive(Debug, Error, Display, Clone, Eq, PartialEq)]
pub enum SchemaError {
    /// query root type '{0}' is not defined
    UnknownQueryType(String),

    /// mutation root type '{0}' is not defined
    UnknownMutationType(String),

    /// duplicate type definition '{0}'
    DuplicateType(String),

    /// field '{parent}.{field}' references undefined type '{target}'
    UndefinedTypeReference {
        /// The type declaring the field.
        parent: String,

        /// The field with the dangling reference.
        field: String,

        /// The type name that is not defined.
        target: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_serializes_without_empty_members() {
        let error = Error {
            message: "bad".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({ "message": "bad" })
        );
    }

    #[test]
    fn resolver_error_keeps_path_and_locations() {
        let error = ResolverError::new("bad").to_graphql_error(
            Path::from("nest/test"),
            vec![Location { line: 1, column: 10 }],
        );
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({
                "message": "bad",
                "locations": [ { "line": 1, "column": 10 } ],
                "path": ["nest", "test"],
            })
        );
    }

    #[test]
    fn schema_error_display() {
        let error = SchemaError::UndefinedTypeReference {
            parent: "Query".to_string(),
            field: "user".to_string(),
            target: "User".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "field 'Query.user' references undefined type 'User'"
        );
    }
}
