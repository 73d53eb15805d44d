/* Object registry: the closed value type handed to visitors */

use super::accessor::OBJECT;
use crate::naming::to_pascal;
use crate::schema::{type_path, SchemaError};
use lazy_types::{Schema, TypeId};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub type_id: TypeId,
    /* Registry variant; union members are prefixed with their parent's name */
    pub variant: String,
    pub rust_type: String,
    pub type_name: String,
}

/* One entry per declared type, in declaration order */
pub fn object_entries(schema: &Schema) -> Result<Vec<ObjectEntry>, SchemaError> {
    schema
        .types
        .iter()
        .map(|(type_id, decl)| {
            let name = to_pascal(&decl.name);
            let variant = match &decl.parent {
                Some(parent) => {
                    let parent_decl = schema.type_decl(parent).ok_or_else(|| SchemaError::UnknownParent {
                        type_id: type_id.clone(),
                        parent: parent.clone(),
                    })?;
                    format!("{}{}", to_pascal(&parent_decl.name), name)
                }
                None => name,
            };
            Ok(ObjectEntry {
                type_id: type_id.clone(),
                variant,
                rust_type: format!("{}<'a>", type_path(schema, type_id)?),
                type_name: decl.name.clone(),
            })
        })
        .collect()
}

pub fn emit_registry(entries: &[ObjectEntry]) -> String {
    let mut out = String::new();
    writeln!(out, "/// Every accessor a visitor can be handed.").unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy)]").unwrap();
    writeln!(out, "pub enum {} {{", OBJECT).unwrap();
    for entry in entries {
        writeln!(out, "    {}({}),", entry.variant, entry.rust_type).unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "impl<'a> {} {{", OBJECT).unwrap();
    writeln!(out, "    pub fn type_name(&self) -> &'static str {{").unwrap();
    writeln!(out, "        match self {{").unwrap();
    for entry in entries {
        writeln!(out, "            Object::{}(_) => \"{}\",", entry.variant, entry.type_name).unwrap();
    }
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();

    for entry in entries {
        writeln!(out).unwrap();
        writeln!(out, "impl<'a> From<{}> for {} {{", entry.rust_type, OBJECT).unwrap();
        writeln!(out, "    fn from(value: {}) -> Self {{", entry.rust_type).unwrap();
        writeln!(out, "        Object::{}(value)", entry.variant).unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
    }
    writeln!(out).unwrap();

    /* Visitors recurse through `object.visit_children(visitor)` */
    writeln!(out, "impl<'a> LazyObject<'a, {}> for {} {{", OBJECT, OBJECT).unwrap();
    writeln!(out, "    fn view(&self) -> View<'a> {{").unwrap();
    writeln!(out, "        match self {{").unwrap();
    for entry in entries {
        writeln!(out, "            Object::{}(value) => value.view(),", entry.variant).unwrap();
    }
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "    fn visit_children<V: ObjectVisitor<{}>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {{",
        OBJECT
    )
    .unwrap();
    writeln!(out, "        match self {{").unwrap();
    for entry in entries {
        writeln!(out, "            Object::{}(value) => value.visit_children(visitor),", entry.variant).unwrap();
    }
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use lazy_types::{SerializationLayout, TypeDecl};

    #[test]
    fn entries_follow_declaration_order() {
        let mut schema = Schema::new();
        schema.types.insert("circle".into(), TypeDecl { name: "Circle".into(), parent: Some("shape".into()), fields: IndexMap::new() });
        schema.types.insert("point".into(), TypeDecl { name: "Point".into(), parent: None, fields: IndexMap::new() });
        schema.types.insert("shape".into(), TypeDecl { name: "Shape".into(), parent: None, fields: IndexMap::new() });
        schema.serialization.insert("circle".into(), SerializationLayout::concrete(0, Vec::new()));
        schema.serialization.insert("point".into(), SerializationLayout::concrete(0, Vec::new()));
        schema
            .serialization
            .insert("shape".into(), SerializationLayout::abstract_type(IndexMap::from([(0, "circle".to_string())])));

        let entries = object_entries(&schema).unwrap();
        let variants: Vec<(&str, &str)> = entries.iter().map(|e| (e.variant.as_str(), e.rust_type.as_str())).collect();
        assert_eq!(
            variants,
            vec![("ShapeCircle", "shape::Circle<'a>"), ("Point", "Point<'a>"), ("Shape", "Shape<'a>")]
        );

        let source = emit_registry(&entries);
        assert!(source.contains("pub enum Object<'a> {\n    ShapeCircle(shape::Circle<'a>),\n    Point(Point<'a>),\n    Shape(Shape<'a>),\n}"));
        assert!(source.contains("Object::ShapeCircle(_) => \"Circle\","));
        assert!(source.contains("impl<'a> From<Point<'a>> for Object<'a> {"));
    }
}
