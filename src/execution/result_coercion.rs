use crate::execution::engine::{
    execute_selection_set, field_error, try_nullify, ErrorAccumulator, ExecutionMode, PropagateNull,
};
use crate::json_ext::Path;
use crate::resolver::{ResolvedValue, ValueMap};
use crate::spec::{Field, FieldType, Schema};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use serde_json_bytes::Value;

/// <https://spec.graphql.org/October2021/#CompleteValue()>
///
/// Coerces a resolved value against the field type, driving eventual layers
/// to settlement and recursing through list and object positions. `Ok(Null)`
/// is a legitimate null; `Err(PropagateNull)` means an error was already
/// recorded somewhere below and the null is still looking for a nullable
/// position to land in.
pub(crate) fn complete_value<'a>(
    schema: &'a Schema,
    errors: &'a ErrorAccumulator,
    path: &'a Path,
    parent_type: &'a str,
    field: &'a Field,
    ty: &'a FieldType,
    resolved: ResolvedValue,
) -> BoxFuture<'a, Result<Value, PropagateNull>> {
    async move {
        if let FieldType::NonNull(inner) = ty {
            let value =
                complete_value(schema, errors, path, parent_type, field, inner, resolved).await?;
            return if matches!(value, Value::Null) {
                errors.push(field_error(
                    format!(
                        "Cannot return null for non-nullable field {parent_type}.{}.",
                        field.name
                    ),
                    path,
                    field.error_locations(),
                ));
                Err(PropagateNull)
            } else {
                Ok(value)
            };
        }

        let resolved = match resolved.settle().await {
            Ok(resolved) => resolved,
            Err(error) => {
                errors.push(error.to_graphql_error(path.clone(), field.error_locations()));
                return Err(PropagateNull);
            }
        };

        // At this point the type is nullable, so a settled null is final.
        if matches!(resolved, ResolvedValue::Concrete(Value::Null)) {
            return Ok(Value::Null);
        }

        if let FieldType::List(inner) = ty {
            let elements = match resolved {
                ResolvedValue::List(elements) => elements,
                ResolvedValue::Concrete(Value::Array(values)) => {
                    values.into_iter().map(ResolvedValue::Concrete).collect()
                }
                other => {
                    errors.push(field_error(
                        format!(
                            "Resolver returned {}, expected a list of type {ty}",
                            other.describe()
                        ),
                        path,
                        field.error_locations(),
                    ));
                    return Err(PropagateNull);
                }
            };

            // Every element completes even when one propagates, and every
            // element's errors are recorded in index order.
            let branches = elements.into_iter().enumerate().map(|(i, element)| {
                let element_path = path.index(i);
                async move {
                    let scratch = ErrorAccumulator::new();
                    let result = complete_value(
                        schema,
                        &scratch,
                        &element_path,
                        parent_type,
                        field,
                        inner,
                        element,
                    )
                    .await;
                    (try_nullify(inner, result), scratch.into_errors())
                }
            });

            let mut values = Vec::new();
            let mut propagated = false;
            for (result, branch_errors) in join_all(branches).await {
                errors.append(branch_errors);
                match result {
                    Ok(value) => values.push(value),
                    Err(PropagateNull) => propagated = true,
                }
            }
            return if propagated {
                Err(PropagateNull)
            } else {
                Ok(Value::Array(values))
            };
        }

        if let FieldType::Named(name) = ty {
            if schema.custom_scalars.contains(name) {
                // Custom scalar results are passed through as-is.
                return match resolved {
                    ResolvedValue::Concrete(value) => Ok(value),
                    other => {
                        errors.push(field_error(
                            format!(
                                "Resolver returned {}, expected a value of custom scalar {name}",
                                other.describe()
                            ),
                            path,
                            field.error_locations(),
                        ));
                        Err(PropagateNull)
                    }
                };
            }

            if let Some(values) = schema.enums.get(name) {
                return match resolved {
                    ResolvedValue::Concrete(Value::String(value))
                        if values.contains(value.as_str()) =>
                    {
                        Ok(Value::String(value))
                    }
                    ResolvedValue::Concrete(value) => {
                        errors.push(field_error(
                            format!("Resolver returned {value}, expected a value of enum {name}"),
                            path,
                            field.error_locations(),
                        ));
                        Err(PropagateNull)
                    }
                    other => {
                        errors.push(field_error(
                            format!(
                                "Resolver returned {}, expected a value of enum {name}",
                                other.describe()
                            ),
                            path,
                            field.error_locations(),
                        ));
                        Err(PropagateNull)
                    }
                };
            }

            let Some(object_type) = schema.object_type(name) else {
                // Schema construction rejects dangling references, but the
                // type table is consulted by name so stay total here.
                errors.push(field_error(
                    format!("Undefined type {name}"),
                    path,
                    field.error_locations(),
                ));
                return Err(PropagateNull);
            };
            return match resolved {
                ResolvedValue::Object(resolver) => execute_selection_set(
                    schema,
                    errors,
                    path,
                    ExecutionMode::Normal,
                    object_type,
                    resolver.as_ref(),
                    &field.selection_set,
                )
                .await
                .map(Value::Object),
                ResolvedValue::Concrete(Value::Object(object)) => {
                    let resolver = ValueMap::from_object(object);
                    execute_selection_set(
                        schema,
                        errors,
                        path,
                        ExecutionMode::Normal,
                        object_type,
                        &resolver,
                        &field.selection_set,
                    )
                    .await
                    .map(Value::Object)
                }
                other => {
                    errors.push(field_error(
                        format!(
                            "Resolver returned {}, expected an object of type {name}",
                            other.describe()
                        ),
                        path,
                        field.error_locations(),
                    ));
                    Err(PropagateNull)
                }
            };
        }

        // Built-in scalars.
        match resolved {
            ResolvedValue::Concrete(value) => {
                if ty.validate_leaf(&value).is_ok() {
                    Ok(value)
                } else {
                    errors.push(field_error(
                        format!("Resolver returned {value}, expected a value of type {ty}"),
                        path,
                        field.error_locations(),
                    ));
                    Err(PropagateNull)
                }
            }
            other => {
                errors.push(field_error(
                    format!(
                        "Resolver returned {}, expected a value of type {ty}",
                        other.describe()
                    ),
                    path,
                    field.error_locations(),
                ));
                Err(PropagateNull)
            }
        }
    }
    .boxed()
}
