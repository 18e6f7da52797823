use crate::error::SchemaError;
use crate::spec::FieldType;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// An object type definition: a name and its typed fields, in declaration
/// order.
#[derive(Clone, Debug)]
pub struct ObjectType {
    name: String,
    fields: IndexMap<String, FieldType>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field definition, keeping declaration order.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn field_type(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }
}

/// The type table consulted during execution.
///
/// Object types are stored by name and fields reference other types by name,
/// so recursive types (an object with a field of its own type) need no
/// forward-reference patching to construct.
#[derive(Clone, Debug)]
pub struct Schema {
    object_types: HashMap<String, ObjectType>,
    pub(crate) custom_scalars: HashSet<String>,
    pub(crate) enums: HashMap<String, HashSet<String>>,
    query_type: String,
    mutation_type: Option<String>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub(crate) fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.get(name)
    }

    pub(crate) fn query_type(&self) -> &ObjectType {
        self.object_types
            .get(&self.query_type)
            .expect("the query type is checked at construction; qed")
    }

    pub(crate) fn mutation_type(&self) -> Option<&ObjectType> {
        self.mutation_type
            .as_deref()
            .and_then(|name| self.object_types.get(name))
    }
}

/// Incrementally assembles a [`Schema`], validating it on `build`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    object_types: Vec<ObjectType>,
    custom_scalars: HashSet<String>,
    enums: HashMap<String, HashSet<String>>,
    query_type: Option<String>,
    mutation_type: Option<String>,
}

impl SchemaBuilder {
    pub fn object(mut self, object_type: ObjectType) -> Self {
        self.object_types.push(object_type);
        self
    }

    pub fn custom_scalar(mut self, name: impl Into<String>) -> Self {
        self.custom_scalars.insert(name.into());
        self
    }

    pub fn enumeration<V: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.enums
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn query_type(mut self, name: impl Into<String>) -> Self {
        self.query_type = Some(name.into());
        self
    }

    pub fn mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation_type = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut object_types = HashMap::with_capacity(self.object_types.len());
        for object_type in self.object_types {
            let name = object_type.name.clone();
            if self.custom_scalars.contains(&name)
                || self.enums.contains_key(&name)
                || object_types.insert(name.clone(), object_type).is_some()
            {
                return Err(SchemaError::DuplicateType(name));
            }
        }

        for object_type in object_types.values() {
            for (field_name, field_type) in &object_type.fields {
                if let Some(target) = field_type.inner_type_name() {
                    if !object_types.contains_key(target)
                        && !self.custom_scalars.contains(target)
                        && !self.enums.contains_key(target)
                    {
                        return Err(SchemaError::UndefinedTypeReference {
                            parent: object_type.name.clone(),
                            field: field_name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }

        let query_type = self.query_type.unwrap_or_else(|| "Query".to_string());
        if !object_types.contains_key(&query_type) {
            return Err(SchemaError::UnknownQueryType(query_type));
        }
        if let Some(mutation_type) = &self.mutation_type {
            if !object_types.contains_key(mutation_type) {
                return Err(SchemaError::UnknownMutationType(mutation_type.clone()));
            }
        }

        Ok(Schema {
            object_types,
            custom_scalars: self.custom_scalars,
            enums: self.enums,
            query_type,
            mutation_type: self.mutation_type,
        })
    }
}
