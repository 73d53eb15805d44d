/* Concrete type emitter: a fixed-size record read in place */

use super::accessor::{emit_getters, emit_inline_decode, emit_lazy_object, emit_visit_value};
use crate::codegen::{EmittedKind, EmittedType, GeneratorOptions};
use crate::naming::to_pascal;
use crate::schema::resolved::lookup;
use crate::schema::{resolve_fields, SchemaError};
use lazy_types::Schema;
use std::fmt::Write;
use tracing::debug;

pub fn emit_concrete(schema: &Schema, type_id: &str, options: &GeneratorOptions) -> Result<EmittedType, SchemaError> {
    let (decl, layout) = lookup(schema, type_id)?;
    let size = layout.size.ok_or(SchemaError::MalformedLayout {
        type_id: type_id.to_string(),
        reason: "concrete layout has no size",
    })?;
    let fields = resolve_fields(schema, type_id)?;
    let name = to_pascal(&decl.name);
    debug!(type_id, name = %name, size, fields = fields.len(), "emitting concrete type");

    let mut out = String::new();
    writeln!(out, "/// Lazy accessor for `{}` ({} bytes).", decl.name, size).unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy)]").unwrap();
    writeln!(out, "pub struct {}<'a> {{", name).unwrap();
    writeln!(out, "    view: View<'a>,").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "impl<'a> {}<'a> {{", name).unwrap();
    writeln!(out, "    pub const SIZE: usize = {};", size).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub fn read(view: View<'a>, address: usize) -> Result<Self, DecodeError> {{").unwrap();
    writeln!(out, "        Ok(Self {{ view: view.seek(address)? }})").unwrap();
    writeln!(out, "    }}").unwrap();
    emit_getters(&mut out, &fields, "self.view");
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    if options.emit_registry {
        emit_lazy_object(&mut out, &name, "self.view", &fields, None);
        writeln!(out).unwrap();
    }
    emit_inline_decode(&mut out, &name);
    if options.emit_registry {
        writeln!(out).unwrap();
        emit_visit_value(&mut out, &name, &name);
    }

    Ok(EmittedType {
        type_id: type_id.to_string(),
        name,
        kind: EmittedKind::Concrete {
            getters: fields.into_iter().map(|field| field.ident).collect(),
        },
        source: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use lazy_types::{PrimitiveKind, SerializationLayout, TypeDecl, TypeRef};

    fn point() -> Schema {
        let mut schema = Schema::new();
        schema.types.insert(
            "point".into(),
            TypeDecl {
                name: "Point".into(),
                parent: None,
                fields: IndexMap::from([
                    ("x".to_string(), TypeRef::primitive(PrimitiveKind::I32)),
                    ("y".to_string(), TypeRef::primitive(PrimitiveKind::I32)),
                ]),
            },
        );
        schema
            .serialization
            .insert("point".into(), SerializationLayout::concrete(8, vec![("x".into(), 0), ("y".into(), 4)]));
        schema
    }

    #[test]
    fn point_has_exactly_its_getters() {
        let emitted = emit_concrete(&point(), "point", &GeneratorOptions::default()).unwrap();
        assert_eq!(emitted.name, "Point");
        assert_eq!(emitted.kind, EmittedKind::Concrete { getters: vec!["x".into(), "y".into()] });
        assert!(emitted.source.contains("pub struct Point<'a> {"));
        assert!(emitted.source.contains("pub const SIZE: usize = 8;"));
        assert!(emitted.source.contains("self.view.read_i32(0)"));
        assert!(emitted.source.contains("self.view.read_i32(4)"));
        assert_eq!(emitted.source.matches("pub fn ").count(), 3);
        /* No visitable fields: the runtime's default visitor applies */
        assert!(!emitted.source.contains("fn visit_children"));
        assert!(emitted.source.contains("Ok(visitor.visit(Object::Point(*self)))"));
    }

    #[test]
    fn registry_glue_is_optional() {
        let options = GeneratorOptions { emit_registry: false, ..GeneratorOptions::default() };
        let emitted = emit_concrete(&point(), "point", &options).unwrap();
        assert!(!emitted.source.contains("Object"));
        assert!(emitted.source.contains("impl<'a> Decode<'a> for Point<'a> {"));
    }
}
