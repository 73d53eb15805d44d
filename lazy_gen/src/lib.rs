//! Schema-driven generator of zero-copy lazy accessors.
//!
//! A [`lazy_types::Schema`] is checked, every field is resolved to a
//! [`schema::TypeDescriptor`], and the emitters print one Rust unit of
//! accessors over the views of the `lazy_runtime` crate.

pub mod codegen;
pub mod naming;
pub mod schema;

pub use codegen::{generate, GeneratorOptions};
pub use schema::{load_schema, LoadError, SchemaError};
