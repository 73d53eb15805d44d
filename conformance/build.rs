use anyhow::Context;
use lazy_gen::{generate, load_schema, GeneratorOptions};
use std::path::PathBuf;

/* Generate accessors for every schema the conformance tests decode */
const SCHEMAS: &[&str] = &["shapes.yaml", "tree.json", "notes.yaml"];

fn main() -> anyhow::Result<()> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    for name in SCHEMAS {
        let path = manifest_dir.join("schemas").join(name);
        println!("cargo:rerun-if-changed={}", path.display());

        let schema = load_schema(&path)?;
        let code = generate(&schema, &GeneratorOptions::default())
            .with_context(|| format!("failed to generate {}", path.display()))?;

        let stem = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("generated");
        let out_path = out_dir.join(format!("{}.rs", stem));
        std::fs::write(&out_path, code).with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}
