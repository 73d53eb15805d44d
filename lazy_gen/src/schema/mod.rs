/* Schema checking and type resolution shared by every emitter */

pub mod check;
pub mod error;
pub mod load;
pub mod resolved;

pub use check::check;
pub use error::SchemaError;
pub use load::{load_schema, parse_schema, LoadError, SchemaFormat};
pub use resolved::{
    field_descriptor, resolve, resolve_fields, type_path, DescriptorKind, ResolvedField, Traversal,
    TypeDescriptor,
};
