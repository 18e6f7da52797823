use crate::error::Location;
use typed_builder::TypedBuilder;

/// A field node from an already parsed and validated query, carrying what
/// execution needs: the schema field name, the response alias, the source
/// location for error reporting, and sub-selections for object-typed fields.
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Field {
    /// Field name as defined on the parent type.
    #[builder(setter(into))]
    pub name: String,

    /// Response key override, when the query requests the field under an
    /// alias.
    #[builder(default, setter(strip_option, into))]
    pub alias: Option<String>,

    /// Location of the field in the original query text.
    #[builder(default, setter(strip_option))]
    pub location: Option<Location>,

    /// Sub-selections, non-empty for object-typed fields.
    #[builder(default)]
    pub selection_set: Vec<Field>,
}

impl Field {
    /// The key under which this field appears in the response object.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn error_locations(&self) -> Vec<Location> {
        self.location.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_key_prefers_the_alias() {
        let field = Field::builder().name("test").build();
        assert_eq!(field.response_key(), "test");

        let field = Field::builder().name("test").alias("aliased").build();
        assert_eq!(field.response_key(), "aliased");
    }
}
