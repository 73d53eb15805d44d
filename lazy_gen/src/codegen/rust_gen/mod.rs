pub mod abstract_type;
pub mod accessor;
pub mod concrete;
pub mod registry;

/* Re-export main public functions */
pub use abstract_type::emit_abstract;
pub use concrete::emit_concrete;
pub use registry::{emit_registry, object_entries, ObjectEntry};
