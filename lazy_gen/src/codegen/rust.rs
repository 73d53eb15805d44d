use crate::codegen::rust_gen::{emit_abstract, emit_concrete, emit_registry, object_entries};
use crate::codegen::{EmittedType, GeneratorOptions, GENERATED_HEADER};
use crate::schema::resolved::lookup;
use crate::schema::SchemaError;
use lazy_types::Schema;

/* Runtime items the generated unit refers to */
const RUNTIME_IMPORTS: &[&str] = &[
  "Decode",
  "DecodeError",
  "LazyObject",
  "ObjectVisitor",
  "Sequence",
  "View",
  "VisitValue",
  "DISCRIMINANT_OFFSET",
  "DISCRIMINANT_SIZE",
  "POINTER_SIZE",
];

pub struct RustCodeGenerator<'s> {
  schema: &'s Schema,
  options: GeneratorOptions,
}

impl<'s> RustCodeGenerator<'s> {
  pub fn new(schema: &'s Schema, options: GeneratorOptions) -> Self {
    Self { schema, options }
  }

  /* Emit every top-level type in declaration order; union members come from their parent */
  pub fn emit_types(&self) -> Result<Vec<EmittedType>, SchemaError> {
    self
      .schema
      .top_level_ids()
      .map(|type_id| {
        let (_, layout) = lookup(self.schema, type_id)?;
        if layout.is_abstract() {
          emit_abstract(self.schema, type_id, &self.options)
        } else {
          emit_concrete(self.schema, type_id, &self.options)
        }
      })
      .collect()
  }

  /* Header, imports, definitions, then the object registry */
  pub fn emit_code(&self) -> Result<String, SchemaError> {
    let emitted = self.emit_types()?;

    let mut output = String::new();
    output.push_str(GENERATED_HEADER);
    output.push_str("\n\n");
    output.push_str("#[allow(unused_imports)]\n");
    output.push_str(&format!("use {}::{{{}}};\n", self.options.runtime_crate, RUNTIME_IMPORTS.join(", ")));

    for emitted_type in &emitted {
      output.push('\n');
      output.push_str(&emitted_type.source);
    }

    if self.options.emit_registry && !self.schema.types.is_empty() {
      output.push('\n');
      output.push_str(&emit_registry(&object_entries(self.schema)?));
    }

    Ok(output)
  }
}
