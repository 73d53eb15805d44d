/* Pieces shared by every generated accessor: getters, the child visitor and
   the Decode/VisitValue glue that lets an accessor nest inside other values. */

use crate::schema::ResolvedField;
use std::fmt::Write;

/* Registry type every visitor receives */
pub const OBJECT: &str = "Object<'a>";

/* One getter per field, in layout order, relative to `view_expr` */
pub fn emit_getters(out: &mut String, fields: &[ResolvedField], view_expr: &str) {
    for field in fields {
        let descriptor = &field.descriptor;
        writeln!(out).unwrap();
        if field.ident.trim_start_matches("r#") != field.name {
            writeln!(out, "    /// Field `{}`.", field.name).unwrap();
        }
        writeln!(
            out,
            "    pub fn {}(&self) -> Result<{}, DecodeError> {{",
            field.ident, descriptor.display
        )
        .unwrap();
        match descriptor.direct_read() {
            Some(read) => writeln!(out, "        {}.{}({})", view_expr, read, field.offset).unwrap(),
            None => writeln!(out, "        {}.decode({})", view_expr, field.offset).unwrap(),
        }
        writeln!(out, "    }}").unwrap();
    }
}

pub fn has_visitable(fields: &[ResolvedField]) -> bool {
    fields.iter().any(|field| field.descriptor.is_visitable())
}

/* `visit_children` body: the base's result first, then every visitable field
   in layout order. Nothing short-circuits. */
fn emit_visit_children(out: &mut String, fields: &[ResolvedField], base: Option<&str>) {
    writeln!(
        out,
        "    fn visit_children<V: ObjectVisitor<{}>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {{",
        OBJECT
    )
    .unwrap();
    let visitable: Vec<&ResolvedField> = fields.iter().filter(|field| field.descriptor.is_visitable()).collect();
    match (base, visitable.is_empty()) {
        (Some(base), true) => {
            writeln!(out, "        {}.visit_children(visitor)", base).unwrap();
        }
        (base, _) => {
            match base {
                Some(base) => writeln!(out, "        let mut found = {}.visit_children(visitor)?;", base).unwrap(),
                None => writeln!(out, "        let mut found = false;").unwrap(),
            }
            for field in visitable {
                writeln!(
                    out,
                    "        found |= VisitValue::<{}>::visit_value(&self.{}()?, visitor)?;",
                    OBJECT, field.ident
                )
                .unwrap();
            }
            writeln!(out, "        Ok(found)").unwrap();
        }
    }
    writeln!(out, "    }}").unwrap();
}

/* `LazyObject` impl; the default no-op visitor is kept when nothing is visitable */
pub fn emit_lazy_object(
    out: &mut String,
    type_name: &str,
    view_expr: &str,
    fields: &[ResolvedField],
    base: Option<&str>,
) {
    writeln!(out, "impl<'a> LazyObject<'a, {}> for {}<'a> {{", OBJECT, type_name).unwrap();
    writeln!(out, "    fn view(&self) -> View<'a> {{").unwrap();
    writeln!(out, "        {}", view_expr).unwrap();
    writeln!(out, "    }}").unwrap();
    if base.is_some() || has_visitable(fields) {
        writeln!(out).unwrap();
        emit_visit_children(out, fields, base);
    }
    writeln!(out, "}}").unwrap();
}

/* Concrete values are stored inline, `SIZE` bytes wide */
pub fn emit_inline_decode(out: &mut String, type_name: &str) {
    writeln!(out, "impl<'a> Decode<'a> for {}<'a> {{", type_name).unwrap();
    writeln!(out, "    const WIDTH: usize = Self::SIZE;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {{").unwrap();
    writeln!(out, "        Self::read(view, offset)").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
}

/* Hand the accessor itself to a visitor, wrapped in its registry entry */
pub fn emit_visit_value(out: &mut String, type_name: &str, object_variant: &str) {
    writeln!(out, "impl<'a> VisitValue<{}> for {}<'a> {{", OBJECT, type_name).unwrap();
    writeln!(
        out,
        "    fn visit_value<V: ObjectVisitor<{}>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {{",
        OBJECT
    )
    .unwrap();
    writeln!(out, "        Ok(visitor.visit(Object::{}(*self)))", object_variant).unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
}

/* Shift a block of generated items one module level deeper */
pub fn indent(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    for line in source.lines() {
        if !line.is_empty() {
            out.push_str("    ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
