pub mod rust;
pub mod rust_gen;

use crate::schema::{check, SchemaError};
use lazy_types::{Schema, TypeId};
use tracing::info;

pub use rust::RustCodeGenerator;

/* Provenance line written at the top of every generated unit */
pub const GENERATED_HEADER: &str = "// *** THIS FILE GENERATED BY `lazy-gen` ***";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /* Path the generated code imports the runtime from */
    pub runtime_crate: String,
    /* Emit the `Object` registry and the visitor protocol impls */
    pub emit_registry: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_crate: "lazy_runtime".to_string(),
            emit_registry: true,
        }
    }
}

/// One top-level definition produced by an emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedType {
    pub type_id: TypeId,
    pub name: String,
    pub kind: EmittedKind,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmittedKind {
    Concrete {
        getters: Vec<String>,
    },
    Abstract {
        module: String,
        base_getters: Vec<String>,
        variants: Vec<EmittedVariant>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedVariant {
    pub type_id: TypeId,
    pub name: String,
    pub tag: u32,
    pub getters: Vec<String>,
}

/// Check `schema` and print the complete accessor unit for it.
///
/// The output is a pure function of the schema and options; the first schema
/// violation aborts with no partial output.
pub fn generate(schema: &Schema, options: &GeneratorOptions) -> Result<String, SchemaError> {
    check(schema)?;
    let source = RustCodeGenerator::new(schema, options.clone()).emit_code()?;
    info!(types = schema.types.len(), bytes = source.len(), "generated accessors");
    Ok(source)
}
