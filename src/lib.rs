//! Type-directed execution of GraphQL selection sets.
//!
//! Given a [`Schema`], an [`Operation`] and a root [`Resolver`], [`execute`]
//! resolves every requested field (possibly through eventual values),
//! coerces the results against the field types, and assembles a [`Response`]
//! in which non-null violations have been propagated to the nearest nullable
//! position and recorded as path-addressed errors.

#![warn(unreachable_pub)]

mod error;
mod execution;
mod json_ext;
mod resolver;
mod response;
mod spec;

pub use crate::error::*;
pub use crate::execution::execute;
pub use crate::json_ext::*;
pub use crate::resolver::*;
pub use crate::response::*;
pub use crate::spec::*;
