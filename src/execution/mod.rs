mod engine;
mod result_coercion;

use crate::error::Error;
use crate::json_ext::Path;
use crate::resolver::Resolver;
use crate::response::Response;
use crate::spec::{Operation, OperationKind, Schema};
use engine::{execute_selection_set, ErrorAccumulator, ExecutionMode, PropagateNull};
use serde_json_bytes::Value;

/// Execute an operation against a schema, resolving fields through `root`.
///
/// This always produces a well-formed response: field errors are collected
/// into [`Response::errors`] and the data either holds the completed
/// selection set or is null when a non-null violation reached the root.
#[tracing::instrument(skip_all, level = "trace")]
pub async fn execute(schema: &Schema, operation: &Operation, root: &dyn Resolver) -> Response {
    let (object_type, mode) = match operation.kind() {
        OperationKind::Query => (schema.query_type(), ExecutionMode::Normal),
        OperationKind::Mutation => match schema.mutation_type() {
            Some(object_type) => (object_type, ExecutionMode::Sequential),
            None => {
                return Response::builder()
                    .data(Value::Null)
                    .errors(vec![Error {
                        message: "schema does not support mutations".to_string(),
                        ..Default::default()
                    }])
                    .build()
            }
        },
    };

    let errors = ErrorAccumulator::new();
    let path = Path::empty();
    let result = execute_selection_set(
        schema,
        &errors,
        &path,
        mode,
        object_type,
        root,
        operation.selection_set(),
    )
    .await;

    let data = match result {
        Ok(object) => Value::Object(object),
        // The root operation type is always nullable.
        Err(PropagateNull) => Value::Null,
    };
    Response::builder()
        .data(data)
        .errors(errors.into_errors())
        .build()
}
