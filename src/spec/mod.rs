mod field_type;
mod query;
mod schema;
mod selection;

pub use field_type::*;
pub use query::*;
pub use schema::*;
pub use selection::*;
