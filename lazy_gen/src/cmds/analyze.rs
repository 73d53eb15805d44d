/* Analyze command - print the resolved descriptor table of every type */

use super::common::load_and_check;
use lazy_gen::codegen::rust_gen::object_entries;
use lazy_gen::schema::{resolve_fields, type_path, ResolvedField, Traversal};
use lazy_types::Schema;
use std::path::PathBuf;

/* Execute the analyze command */
pub fn run(schema_path: PathBuf) -> anyhow::Result<()> {
    println!("Lazy Generator - Type Analysis Tool");
    println!("===================================\n");

    let schema = load_and_check(&schema_path, true)?;

    for (type_id, decl) in &schema.types {
        let layout = schema.layout(type_id);
        let path = type_path(&schema, type_id)?;
        match layout.and_then(|layout| layout.discriminants.as_ref()) {
            Some(discriminants) => {
                println!("[~] {} ({}): abstract, {} variant(s)", path, type_id, discriminants.len());
                for (tag, variant) in discriminants {
                    println!("      tag {:>3} -> {}", tag, variant);
                }
            }
            None => {
                let size = layout.and_then(|layout| layout.size).unwrap_or(0);
                println!("[~] {} ({}): concrete, {} bytes", path, type_id, size);
            }
        }
        if let Some(parent) = &decl.parent {
            println!("      member of {}", parent);
        }
        print_fields(&schema, type_id)?;
        println!();
    }

    println!("[~] Object registry:");
    for entry in object_entries(&schema)? {
        println!("    Object::{} => {}", entry.variant, entry.rust_type);
    }

    Ok(())
}

fn print_fields(schema: &Schema, type_id: &str) -> anyhow::Result<()> {
    let fields = resolve_fields(schema, type_id)?;
    if fields.is_empty() {
        println!("      (no fields)");
        return Ok(());
    }
    println!("      {:<20} {:>6} {:>5}  {:<40} {}", "field", "offset", "slot", "type", "visit");
    for ResolvedField { name, descriptor, offset, .. } in &fields {
        println!(
            "      {:<20} {:>6} {:>5}  {:<40} {}",
            name,
            offset,
            descriptor.slot_width(),
            descriptor.display,
            describe(&descriptor.traversal)
        );
    }
    Ok(())
}

fn describe(traversal: &Traversal) -> String {
    match traversal {
        Traversal::None => "-".to_string(),
        Traversal::Value => "value".to_string(),
        Traversal::Sequence(inner) => format!("sequence({})", describe(inner)),
        Traversal::Option(inner) => format!("option({})", describe(inner)),
        Traversal::Result(ok, err) => format!("result({}, {})", describe(ok), describe(err)),
    }
}
