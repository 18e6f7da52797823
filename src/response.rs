use crate::error::Error;
use crate::json_ext::Object;
use serde::{Deserialize, Serialize};
use serde_json_bytes::Value;
use typed_builder::TypedBuilder;

/// A graphql response.
///
/// `data` is always serialized, even when the whole response degraded to
/// null; `errors` and `extensions` are only serialized when non-empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(field_defaults(setter(into)))]
pub struct Response {
    /// The response data.
    #[serde(default)]
    #[builder(default = Value::Object(Default::default()))]
    pub data: Value,

    /// The graphql errors encountered, in the order they were recorded.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[builder(default)]
    pub errors: Vec<Error>,

    /// The optional graphql extensions.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub extensions: Object,
}

impl Response {
    /// append_errors keeps the provided errors after the ones already recorded.
    pub fn append_errors(&mut self, errors: &mut Vec<Error>) {
        self.errors.append(errors)
    }
}
