use crate::error::ResolverError;
use crate::json_ext::Object;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json_bytes::Value;
use std::fmt::{self, Debug};
use std::future::Future;
use std::sync::{Mutex, PoisonError};

/// A GraphQL object whose fields can be resolved during execution.
pub trait Resolver: Send + Sync {
    /// Resolves a field of this object.
    ///
    /// Invoked at most once per field occurrence in the selection set. The
    /// returned value is expected to match the type of the corresponding
    /// field definition in the schema.
    fn resolve_field(&self, field_name: &str) -> Result<ResolvedValue, ResolverError>;
}

/// The value of a resolved field.
///
/// Any variant may stand in for any position of the response tree: a list may
/// itself be eventual, and so may each of its elements, independently.
pub enum ResolvedValue {
    /// An immediately available JSON value.
    ///
    /// * JSON null represents GraphQL null
    /// * A GraphQL enum value is represented as a JSON string
    /// * For custom scalars, any JSON value is passed through as-is
    Concrete(Value),

    /// Expected for GraphQL list types; elements may each still be eventual.
    List(Vec<ResolvedValue>),

    /// Expected where the GraphQL type is an object type.
    Object(Box<dyn Resolver>),

    /// An eventual value, resolved or rejected by a future.
    Deferred(BoxFuture<'static, Result<ResolvedValue, ResolverError>>),

    /// A lazy value, produced without arguments on first use.
    Thunk(Box<dyn FnOnce() -> Result<ResolvedValue, ResolverError> + Send + Sync>),
}

impl ResolvedValue {
    /// Construct a null leaf resolved value.
    pub fn null() -> Self {
        Self::Concrete(Value::Null)
    }

    /// Construct a leaf resolved value from something that is convertible to JSON.
    pub fn leaf(json: impl Into<Value>) -> Self {
        Self::Concrete(json.into())
    }

    /// Construct an object resolved value from the resolver for that object.
    pub fn object(resolver: impl Resolver + 'static) -> Self {
        Self::Object(Box::new(resolver))
    }

    /// Construct a list resolved value from an iterator.
    pub fn list(iter: impl IntoIterator<Item = Self>) -> Self {
        Self::List(iter.into_iter().collect())
    }

    /// Construct an eventual resolved value from a future.
    pub fn deferred(
        future: impl Future<Output = Result<ResolvedValue, ResolverError>> + Send + 'static,
    ) -> Self {
        Self::Deferred(Box::pin(future))
    }

    /// Construct a lazy resolved value from a thunk.
    pub fn thunk(
        thunk: impl FnOnce() -> Result<ResolvedValue, ResolverError> + Send + Sync + 'static,
    ) -> Self {
        Self::Thunk(Box::new(thunk))
    }

    /// Drive thunks and eventual layers until the value is settled, without
    /// the caller needing to branch on whether it was concrete to begin with.
    ///
    /// Concrete values settle immediately. A rejection surfaces as a
    /// [`ResolverError`], exactly like a synchronous resolver failure.
    pub(crate) async fn settle(mut self) -> Result<ResolvedValue, ResolverError> {
        loop {
            self = match self {
                ResolvedValue::Deferred(future) => future.await?,
                ResolvedValue::Thunk(thunk) => thunk()?,
                settled => return Ok(settled),
            };
        }
    }

    /// A short description of the value's shape, for error messages.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            ResolvedValue::Concrete(_) => "a leaf value",
            ResolvedValue::List(_) => "a list",
            ResolvedValue::Object(_) => "an object",
            ResolvedValue::Deferred(_) | ResolvedValue::Thunk(_) => "an unsettled value",
        }
    }
}

impl Debug for ResolvedValue {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolvedValue::Concrete(value) => {
                formatter.debug_tuple("Concrete").field(value).finish()
            }
            ResolvedValue::List(elements) => formatter.debug_tuple("List").field(elements).finish(),
            ResolvedValue::Object(_) => formatter.write_str("Object(..)"),
            ResolvedValue::Deferred(_) => formatter.write_str("Deferred(..)"),
            ResolvedValue::Thunk(_) => formatter.write_str("Thunk(..)"),
        }
    }
}

impl From<Value> for ResolvedValue {
    fn from(value: Value) -> Self {
        Self::Concrete(value)
    }
}

/// A [`Resolver`] backed by a map of precomputed, possibly eventual, field
/// values.
///
/// Fields absent from the map resolve to null. Each entry is handed out once;
/// this matches the at-most-once resolution contract of [`Resolver`].
pub struct ValueMap {
    fields: Mutex<IndexMap<String, ResolvedValue>>,
}

impl ValueMap {
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, ResolvedValue)>) -> Self {
        Self {
            fields: Mutex::new(
                fields
                    .into_iter()
                    .map(|(name, value)| (name.into(), value))
                    .collect(),
            ),
        }
    }

    /// Wrap a plain JSON object so its entries resolve as concrete values.
    pub(crate) fn from_object(object: Object) -> Self {
        Self::new(
            object
                .into_iter()
                .map(|(name, value)| (name.as_str().to_string(), ResolvedValue::Concrete(value))),
        )
    }
}

impl Resolver for ValueMap {
    fn resolve_field(&self, field_name: &str) -> Result<ResolvedValue, ResolverError> {
        let mut fields = self.fields.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(fields
            .shift_remove(field_name)
            .unwrap_or_else(ResolvedValue::null))
    }
}

impl Debug for ValueMap {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("ValueMap(..)")
    }
}
