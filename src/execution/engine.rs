use crate::error::{Error, Location};
use crate::execution::result_coercion::complete_value;
use crate::json_ext::{Object, Path};
use crate::resolver::Resolver;
use crate::spec::{Field, FieldType, ObjectType, Schema};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use serde_json_bytes::{ByteString, Value};
use std::sync::{Mutex, PoisonError};

/// Marker for a field error being propagated upwards until it finds a
/// nullable place to stop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PropagateNull;

/// How sibling fields of one selection set are dispatched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ExecutionMode {
    /// Sibling fields resolve concurrently; no field blocks another from
    /// starting.
    Normal,

    /// Root mutation fields resolve one at a time, in declaration order.
    Sequential,
}

/// Append-only error sink for one execution.
///
/// Concurrent branches each collect into their own scratch accumulator; a
/// parent merges scratches in declaration/index order once every sibling has
/// finished, so the final list is ordered by ascending response path rather
/// than by completion timing.
#[derive(Debug, Default)]
pub(crate) struct ErrorAccumulator {
    errors: Mutex<Vec<Error>>,
}

impl ErrorAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, error: Error) {
        self.lock().push(error);
    }

    pub(crate) fn append(&self, mut errors: Vec<Error>) {
        self.lock().append(&mut errors);
    }

    /// Consume the accumulator, yielding the errors in recording order.
    pub(crate) fn into_errors(self) -> Vec<Error> {
        self.errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Error>> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build a field error at the given response path.
pub(crate) fn field_error(
    message: impl Into<String>,
    path: &Path,
    locations: Vec<Location>,
) -> Error {
    Error {
        message: message.into(),
        locations,
        path: Some(path.clone()),
        extensions: Object::default(),
    }
}

/// Stop a propagating null here if `ty` is nullable; keep it climbing
/// otherwise.
pub(crate) fn try_nullify(
    ty: &FieldType,
    result: Result<Value, PropagateNull>,
) -> Result<Value, PropagateNull> {
    match result {
        Ok(value) => Ok(value),
        Err(PropagateNull) if !ty.is_non_null() => Ok(Value::Null),
        Err(PropagateNull) => Err(PropagateNull),
    }
}

/// <https://spec.graphql.org/October2021/#ExecuteSelectionSet()>
///
/// Resolves and completes every requested field of `object`, keyed by
/// response alias in declaration order. Returns `Err` when a sub-field
/// violated its non-null contract and the violation must climb past this
/// object; every sibling still runs to completion first, and every branch's
/// errors are recorded.
pub(crate) fn execute_selection_set<'a>(
    schema: &'a Schema,
    errors: &'a ErrorAccumulator,
    path: &'a Path,
    mode: ExecutionMode,
    object_type: &'a ObjectType,
    object: &'a dyn Resolver,
    selection_set: &'a [Field],
) -> BoxFuture<'a, Result<Object, PropagateNull>> {
    async move {
        let branches = selection_set.iter().map(|field| {
            let field_path = path.key(field.response_key());
            async move {
                let scratch = ErrorAccumulator::new();
                let result =
                    execute_field(schema, &scratch, &field_path, object_type, object, field).await;
                (field.response_key(), result, scratch.into_errors())
            }
        });

        let outcomes = match mode {
            ExecutionMode::Normal => join_all(branches).await,
            ExecutionMode::Sequential => {
                let mut outcomes = Vec::with_capacity(selection_set.len());
                for branch in branches {
                    outcomes.push(branch.await);
                }
                outcomes
            }
        };

        let mut output = Object::default();
        let mut propagated = false;
        for (response_key, result, branch_errors) in outcomes {
            errors.append(branch_errors);
            match result {
                Ok(value) => {
                    output.insert(ByteString::from(response_key), value);
                }
                Err(PropagateNull) => propagated = true,
            }
        }
        if propagated {
            Err(PropagateNull)
        } else {
            Ok(output)
        }
    }
    .boxed()
}

async fn execute_field(
    schema: &Schema,
    errors: &ErrorAccumulator,
    path: &Path,
    object_type: &ObjectType,
    object: &dyn Resolver,
    field: &Field,
) -> Result<Value, PropagateNull> {
    let Some(field_type) = object_type.field_type(&field.name) else {
        // Validation happens upstream; stay total anyway.
        tracing::debug!("unknown field {}.{}", object_type.name(), field.name);
        errors.push(field_error(
            format!(
                "Cannot query field {} on type {}",
                field.name,
                object_type.name()
            ),
            path,
            field.error_locations(),
        ));
        return Ok(Value::Null);
    };

    let resolved = match object.resolve_field(&field.name) {
        Ok(resolved) => resolved,
        Err(error) => {
            errors.push(error.to_graphql_error(path.clone(), field.error_locations()));
            return try_nullify(field_type, Err(PropagateNull));
        }
    };

    let result = complete_value(
        schema,
        errors,
        path,
        object_type.name(),
        field,
        field_type,
        resolved,
    )
    .await;
    try_nullify(field_type, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_nullify_stops_at_nullable_types() {
        assert_eq!(
            try_nullify(&FieldType::Int, Err(PropagateNull)),
            Ok(Value::Null)
        );
        assert_eq!(
            try_nullify(&FieldType::non_null(FieldType::Int), Err(PropagateNull)),
            Err(PropagateNull)
        );
        assert_eq!(
            try_nullify(&FieldType::non_null(FieldType::Int), Ok(Value::from(1))),
            Ok(Value::from(1))
        );
    }

    #[test]
    fn accumulator_preserves_append_order() {
        let accumulator = ErrorAccumulator::new();
        accumulator.push(field_error("first", &Path::from("a"), Vec::new()));
        accumulator.append(vec![
            field_error("second", &Path::from("b"), Vec::new()),
            field_error("third", &Path::from("c"), Vec::new()),
        ]);
        let messages: Vec<String> = accumulator
            .into_errors()
            .into_iter()
            .map(|error| error.message)
            .collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }
}
