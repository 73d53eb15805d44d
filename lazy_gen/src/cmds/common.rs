/* Common utilities shared between analyze and codegen commands */

use anyhow::Context;
use lazy_gen::schema::{check, load_schema};
use lazy_types::Schema;
use std::path::Path;

/* Load a schema document and check it before anything is emitted */
pub fn load_and_check(path: &Path, verbose: bool) -> anyhow::Result<Schema> {
  if verbose {
    eprintln!("[~] Loading schema {}", path.display());
  }
  let schema = load_schema(path)?;

  if verbose {
    eprintln!("[~] Loaded {} type definitions", schema.types.len());
    for (type_id, decl) in &schema.types {
      match &decl.parent {
        Some(parent) => eprintln!("  - {} ({}, member of {})", decl.name, type_id, parent),
        None => eprintln!("  - {} ({})", decl.name, type_id),
      }
    }
    eprintln!();
  }

  check(&schema).with_context(|| format!("invalid schema {}", path.display()))?;
  Ok(schema)
}
