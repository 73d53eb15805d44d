/* Abstract type emitter: a discriminated union becomes a module holding the
   shared base accessor, the tag enumeration, one accessor per variant and a
   sum type dispatching on the tag read from the body. */

use super::accessor::{
    emit_getters, emit_inline_decode, emit_lazy_object, emit_visit_value, has_visitable, indent, OBJECT,
};
use crate::codegen::{EmittedKind, EmittedType, EmittedVariant, GeneratorOptions};
use crate::naming::{module_ident, to_pascal};
use crate::schema::resolved::lookup;
use crate::schema::{resolve_fields, ResolvedField, SchemaError};
use lazy_types::{Schema, TypeId};
use std::fmt::Write;
use tracing::debug;

struct Variant {
    type_id: TypeId,
    schema_name: String,
    name: String,
    tag: u32,
    size: u32,
    fields: Vec<ResolvedField>,
}

pub fn emit_abstract(schema: &Schema, type_id: &str, options: &GeneratorOptions) -> Result<EmittedType, SchemaError> {
    let (decl, layout) = lookup(schema, type_id)?;
    let discriminants = layout.discriminants.as_ref().ok_or(SchemaError::MalformedLayout {
        type_id: type_id.to_string(),
        reason: "abstract layout has no discriminants",
    })?;
    if discriminants.is_empty() {
        return Err(SchemaError::EmptyUnion { type_id: type_id.to_string() });
    }

    let name = to_pascal(&decl.name);
    let module = module_ident(&decl.name);
    let base_fields = resolve_fields(schema, type_id)?;
    let variants = discriminants
        .iter()
        .map(|(tag, variant_id)| {
            let (variant_decl, variant_layout) = lookup(schema, variant_id)?;
            let size = variant_layout.size.ok_or(SchemaError::MalformedLayout {
                type_id: variant_id.clone(),
                reason: "a union member must have a concrete layout",
            })?;
            Ok(Variant {
                type_id: variant_id.clone(),
                schema_name: variant_decl.name.clone(),
                name: to_pascal(&variant_decl.name),
                tag: *tag,
                size,
                fields: resolve_fields(schema, variant_id)?,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;
    debug!(type_id, name = %name, variants = variants.len(), "emitting abstract type");

    let mut body = String::new();
    writeln!(body, "use super::*;").unwrap();
    writeln!(body).unwrap();
    emit_base(&mut body, &decl.name, &base_fields, options);
    emit_tag_enum(&mut body, &variants);
    for variant in &variants {
        emit_variant(&mut body, &name, variant, has_visitable(&base_fields), options);
    }
    emit_sum_type(&mut body, &name, &variants, options);

    let mut out = String::new();
    writeln!(out, "/// Discriminated union `{}`.", decl.name).unwrap();
    writeln!(out, "pub mod {} {{", module).unwrap();
    out.push_str(&indent(&body));
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "pub use {}::{};", module, name).unwrap();

    Ok(EmittedType {
        type_id: type_id.to_string(),
        name,
        kind: EmittedKind::Abstract {
            module,
            base_getters: base_fields.into_iter().map(|field| field.ident).collect(),
            variants: variants
                .into_iter()
                .map(|variant| EmittedVariant {
                    type_id: variant.type_id,
                    name: variant.name,
                    tag: variant.tag,
                    getters: variant.fields.into_iter().map(|field| field.ident).collect(),
                })
                .collect(),
        },
        source: out,
    })
}

/* Fields shared by every variant; offsets are relative to the variant object */
fn emit_base(out: &mut String, schema_name: &str, fields: &[ResolvedField], options: &GeneratorOptions) {
    writeln!(out, "/// Fields shared by every `{}` variant.", schema_name).unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy)]").unwrap();
    writeln!(out, "pub struct Base<'a> {{").unwrap();
    writeln!(out, "    view: View<'a>,").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "impl<'a> Base<'a> {{").unwrap();
    writeln!(out, "    pub fn read(view: View<'a>, address: usize) -> Result<Self, DecodeError> {{").unwrap();
    writeln!(out, "        Ok(Self {{ view: view.seek(address)? }})").unwrap();
    writeln!(out, "    }}").unwrap();
    emit_getters(out, fields, "self.view");
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    if options.emit_registry {
        emit_lazy_object(out, "Base", "self.view", fields, None);
        writeln!(out).unwrap();
    }
}

fn emit_tag_enum(out: &mut String, variants: &[Variant]) {
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]").unwrap();
    writeln!(out, "#[repr(u32)]").unwrap();
    writeln!(out, "pub enum Type {{").unwrap();
    for variant in variants {
        writeln!(out, "    {} = {},", variant.name, variant.tag).unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "impl Type {{").unwrap();
    writeln!(out, "    pub const fn value(self) -> u32 {{").unwrap();
    writeln!(out, "        self as u32").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub fn from_value(value: u32) -> Option<Self> {{").unwrap();
    writeln!(out, "        match value {{").unwrap();
    for variant in variants {
        writeln!(out, "            {} => Some(Type::{}),", variant.tag, variant.name).unwrap();
    }
    writeln!(out, "            _ => None,").unwrap();
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub const fn name(self) -> &'static str {{").unwrap();
    writeln!(out, "        match self {{").unwrap();
    for variant in variants {
        writeln!(out, "            Type::{} => \"{}\",", variant.name, variant.schema_name).unwrap();
    }
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    let names: Vec<String> = variants.iter().map(|variant| format!("\"{}\"", variant.schema_name)).collect();
    writeln!(out, "pub const TYPE_NAMES: &[&str] = &[{}];", names.join(", ")).unwrap();
    writeln!(out).unwrap();
}

fn emit_variant(out: &mut String, parent: &str, variant: &Variant, base_visitable: bool, options: &GeneratorOptions) {
    let name = &variant.name;
    writeln!(out, "/// `{}` variant, tag {}.", variant.schema_name, variant.tag).unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy)]").unwrap();
    writeln!(out, "pub struct {}<'a> {{", name).unwrap();
    writeln!(out, "    base: Base<'a>,").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "impl<'a> {}<'a> {{", name).unwrap();
    writeln!(out, "    pub const TYPE: Type = Type::{};", name).unwrap();
    writeln!(out, "    pub const SIZE: usize = {};", variant.size).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub fn read(view: View<'a>, address: usize) -> Result<Self, DecodeError> {{").unwrap();
    writeln!(out, "        Ok(Self {{ base: Base::read(view, address)? }})").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub fn base(&self) -> Base<'a> {{").unwrap();
    writeln!(out, "        self.base").unwrap();
    writeln!(out, "    }}").unwrap();
    emit_getters(out, &variant.fields, "self.base.view");
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    emit_deref(out, name, &[]);
    writeln!(out).unwrap();
    if options.emit_registry {
        let base = base_visitable.then_some("self.base");
        emit_lazy_object(out, name, "self.base.view", &variant.fields, base);
        writeln!(out).unwrap();
    }
    emit_inline_decode(out, name);
    writeln!(out).unwrap();
    if options.emit_registry {
        emit_visit_value(out, name, &format!("{}{}", parent, name));
        writeln!(out).unwrap();
    }
}

/* `Deref` to the shared base; `arms` are the sum type's variants, empty for a variant accessor */
fn emit_deref(out: &mut String, type_name: &str, arms: &[&Variant]) {
    writeln!(out, "impl<'a> ::core::ops::Deref for {}<'a> {{", type_name).unwrap();
    writeln!(out, "    type Target = Base<'a>;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    fn deref(&self) -> &Base<'a> {{").unwrap();
    if arms.is_empty() {
        writeln!(out, "        &self.base").unwrap();
    } else {
        writeln!(out, "        match self {{").unwrap();
        for variant in arms {
            writeln!(out, "            {}::{}(value) => &value.base,", type_name, variant.name).unwrap();
        }
        writeln!(out, "        }}").unwrap();
    }
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
}

fn emit_sum_type(out: &mut String, name: &str, variants: &[Variant], options: &GeneratorOptions) {
    writeln!(out, "#[derive(Debug, Clone, Copy)]").unwrap();
    writeln!(out, "pub enum {}<'a> {{", name).unwrap();
    for variant in variants {
        writeln!(out, "    {}({}<'a>),", variant.name, variant.name).unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "impl<'a> {}<'a> {{", name).unwrap();
    writeln!(out, "    /// Read the variant whose body starts at `address`, dispatching on its tag.").unwrap();
    writeln!(out, "    pub fn read(view: View<'a>, address: usize) -> Result<Self, DecodeError> {{").unwrap();
    writeln!(out, "        let body = view.seek(address)?;").unwrap();
    writeln!(out, "        match body.read_u32(DISCRIMINANT_OFFSET)? {{").unwrap();
    for variant in variants {
        writeln!(
            out,
            "            {} => Ok({}::{}({}::read(body, DISCRIMINANT_SIZE)?)),",
            variant.tag, name, variant.name, variant.name
        )
        .unwrap();
    }
    writeln!(
        out,
        "            tag => Err(DecodeError::UnknownDiscriminant {{ type_name: \"{}\", tag }}),",
        name
    )
    .unwrap();
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub fn tag(&self) -> Type {{").unwrap();
    writeln!(out, "        match self {{").unwrap();
    for variant in variants {
        writeln!(out, "            {}::{}(_) => Type::{},", name, variant.name, variant.name).unwrap();
    }
    writeln!(out, "        }}").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    pub fn base(&self) -> Base<'a> {{").unwrap();
    writeln!(out, "        **self").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    let arms: Vec<&Variant> = variants.iter().collect();
    emit_deref(out, name, &arms);
    writeln!(out).unwrap();

    if options.emit_registry {
        writeln!(out, "impl<'a> LazyObject<'a, {}> for {}<'a> {{", OBJECT, name).unwrap();
        writeln!(out, "    fn view(&self) -> View<'a> {{").unwrap();
        writeln!(out, "        self.base().view").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "    fn visit_children<V: ObjectVisitor<{}>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {{",
            OBJECT
        )
        .unwrap();
        writeln!(out, "        match self {{").unwrap();
        for variant in variants {
            writeln!(out, "            {}::{}(value) => value.visit_children(visitor),", name, variant.name).unwrap();
        }
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    /* Stored behind a pointer slot: the body carries the tag */
    writeln!(out, "impl<'a> Decode<'a> for {}<'a> {{", name).unwrap();
    writeln!(out, "    const WIDTH: usize = POINTER_SIZE;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {{").unwrap();
    writeln!(out, "        Self::read(view.pointer(offset)?, 0)").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    /* Visitors are handed the variant that was actually read */
    if options.emit_registry {
        writeln!(out, "impl<'a> VisitValue<{}> for {}<'a> {{", OBJECT, name).unwrap();
        writeln!(
            out,
            "    fn visit_value<V: ObjectVisitor<{}>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {{",
            OBJECT
        )
        .unwrap();
        writeln!(out, "        match self {{").unwrap();
        for variant in variants {
            writeln!(out, "            {}::{}(value) => value.visit_value(visitor),", name, variant.name).unwrap();
        }
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    writeln!(out, "pub fn read<'a>(view: View<'a>, address: usize) -> Result<{}<'a>, DecodeError> {{", name).unwrap();
    writeln!(out, "    {}::read(view, address)", name).unwrap();
    writeln!(out, "}}").unwrap();

    if options.emit_registry {
        let mut members = vec![format!("Object::{}(_)", name)];
        members.extend(variants.iter().map(|variant| format!("Object::{}{}(_)", name, variant.name)));
        writeln!(out).unwrap();
        writeln!(out, "/// True for the union itself and for every one of its variants.").unwrap();
        writeln!(out, "pub fn is_instance(object: &Object<'_>) -> bool {{").unwrap();
        writeln!(out, "    matches!(object, {})", members.join(" | ")).unwrap();
        writeln!(out, "}}").unwrap();
    }
}
