/* Codegen command - generate accessors from a schema */

use super::common::load_and_check;
use anyhow::Context;
use lazy_gen::{generate, GeneratorOptions};
use std::path::PathBuf;

/* Execute the codegen command */
pub fn run(
  schema_path: PathBuf,
  output: Option<PathBuf>,
  runtime_crate: String,
  emit_registry: bool,
  verbose: bool,
) -> anyhow::Result<()> {
  if verbose {
    eprintln!("Lazy Generator - Code Generation Tool");
    eprintln!("====================================\n");
    eprintln!("[~] Configuration:");
    eprintln!("  Schema: {}", schema_path.display());
    match &output {
      Some(path) => eprintln!("  Output file: {}", path.display()),
      None => eprintln!("  Output file: <stdout>"),
    }
    eprintln!("  Runtime crate: {}", runtime_crate);
    eprintln!("  Object registry: {}", emit_registry);
    eprintln!();
  }

  let schema = load_and_check(&schema_path, verbose)?;
  let options = GeneratorOptions { runtime_crate, emit_registry };
  let code = generate(&schema, &options).with_context(|| format!("failed to generate {}", schema_path.display()))?;

  match output {
    Some(path) => {
      if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
      }
      std::fs::write(&path, &code).with_context(|| format!("failed to write {}", path.display()))?;
      if verbose {
        eprintln!("[✓] Generated Rust accessors: {}", path.display());
      }
    }
    None => print!("{}", code),
  }

  Ok(())
}
