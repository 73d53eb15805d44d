use crate::naming::{field_ident, module_ident, to_pascal};
use crate::schema::error::SchemaError;
use lazy_types::{PrimitiveKind, Schema, SerializationLayout, TypeDecl, TypeId, TypeRef};

/* Slot width of every indirect kind; matches the runtime's pointer slot */
pub const POINTER_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
  Primitive(PrimitiveKind),
  Concrete { type_id: TypeId, size: u32 },
  Abstract { type_id: TypeId },
  Sequence(Box<TypeDescriptor>),
  Option(Box<TypeDescriptor>),
  Result(Box<TypeDescriptor>, Box<TypeDescriptor>),
}

/* How a value's nested objects are reached by the child visitor */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traversal {
  None,
  Value,
  Sequence(Box<Traversal>),
  Option(Box<Traversal>),
  Result(Box<Traversal>, Box<Traversal>),
}

impl Traversal {
  pub fn is_visitable(&self) -> bool {
    !matches!(self, Traversal::None)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
  /* Rust type expression returned by a getter, borrowing the buffer for 'a */
  pub display: String,
  pub kind: DescriptorKind,
  pub traversal: Traversal,
}

impl TypeDescriptor {
  fn primitive(kind: PrimitiveKind) -> Self {
    let display = match kind {
      PrimitiveKind::String => "&'a str".to_string(),
      other => other.as_str().to_string(),
    };
    Self { display, kind: DescriptorKind::Primitive(kind), traversal: Traversal::None }
  }

  fn sequence(element: TypeDescriptor) -> Self {
    let traversal = match &element.traversal {
      Traversal::None => Traversal::None,
      inner => Traversal::Sequence(Box::new(inner.clone())),
    };
    Self {
      display: format!("Sequence<'a, {}>", element.display),
      kind: DescriptorKind::Sequence(Box::new(element)),
      traversal,
    }
  }

  fn option(element: TypeDescriptor) -> Self {
    let traversal = match &element.traversal {
      Traversal::None => Traversal::None,
      inner => Traversal::Option(Box::new(inner.clone())),
    };
    Self {
      display: format!("Option<{}>", element.display),
      kind: DescriptorKind::Option(Box::new(element)),
      traversal,
    }
  }

  fn result(ok: TypeDescriptor, err: TypeDescriptor) -> Self {
    let traversal = match (&ok.traversal, &err.traversal) {
      (Traversal::None, Traversal::None) => Traversal::None,
      (a, b) => Traversal::Result(Box::new(a.clone()), Box::new(b.clone())),
    };
    Self {
      display: format!("Result<{}, {}>", ok.display, err.display),
      kind: DescriptorKind::Result(Box::new(ok), Box::new(err)),
      traversal,
    }
  }

  /* Width of the value itself when it is statically known */
  pub fn fixed_width(&self) -> Option<usize> {
    match &self.kind {
      DescriptorKind::Primitive(kind) => primitive_width(*kind),
      DescriptorKind::Concrete { size, .. } => Some(*size as usize),
      DescriptorKind::Abstract { .. }
      | DescriptorKind::Sequence(_)
      | DescriptorKind::Option(_)
      | DescriptorKind::Result(..) => None,
    }
  }

  /* Bytes the value occupies inside its owner: the value itself or a pointer to it */
  pub fn slot_width(&self) -> usize {
    match &self.kind {
      DescriptorKind::Primitive(kind) => primitive_width(*kind).unwrap_or(POINTER_SIZE),
      DescriptorKind::Concrete { size, .. } => *size as usize,
      _ => POINTER_SIZE,
    }
  }

  /* Fixed primitives are read straight from the view without a nested accessor */
  pub fn direct_read(&self) -> Option<&'static str> {
    match self.kind {
      DescriptorKind::Primitive(PrimitiveKind::Bool) => Some("read_bool"),
      DescriptorKind::Primitive(PrimitiveKind::U32) => Some("read_u32"),
      DescriptorKind::Primitive(PrimitiveKind::I32) => Some("read_i32"),
      DescriptorKind::Primitive(PrimitiveKind::U64) => Some("read_u64"),
      DescriptorKind::Primitive(PrimitiveKind::I64) => Some("read_i64"),
      DescriptorKind::Primitive(PrimitiveKind::Char) => Some("read_char"),
      _ => None,
    }
  }

  pub fn is_visitable(&self) -> bool {
    self.traversal.is_visitable()
  }
}

pub fn primitive_width(kind: PrimitiveKind) -> Option<usize> {
  match kind {
    PrimitiveKind::Bool => Some(1),
    PrimitiveKind::U32 | PrimitiveKind::I32 | PrimitiveKind::Char => Some(4),
    PrimitiveKind::U64 | PrimitiveKind::I64 => Some(8),
    PrimitiveKind::String => None,
  }
}

pub fn lookup<'s>(schema: &'s Schema, type_id: &str) -> Result<(&'s TypeDecl, &'s SerializationLayout), SchemaError> {
  let decl = schema.type_decl(type_id).ok_or_else(|| SchemaError::UnknownType { type_id: type_id.to_string() })?;
  let layout = schema.layout(type_id).ok_or_else(|| SchemaError::MissingLayout { type_id: type_id.to_string() })?;
  Ok((decl, layout))
}

/* Rust name of a type's accessor; union members are qualified by their parent's module */
pub fn type_path(schema: &Schema, type_id: &str) -> Result<String, SchemaError> {
  let decl = schema.type_decl(type_id).ok_or_else(|| SchemaError::UnknownType { type_id: type_id.to_string() })?;
  match &decl.parent {
    Some(parent_id) => {
      let parent = schema
        .type_decl(parent_id)
        .ok_or_else(|| SchemaError::UnknownParent { type_id: type_id.to_string(), parent: parent_id.clone() })?;
      Ok(format!("{}::{}", module_ident(&parent.name), to_pascal(&decl.name)))
    }
    None => Ok(to_pascal(&decl.name)),
  }
}

/* Resolve a type reference to its descriptor. Pure: reads the schema only */
pub fn resolve(type_ref: &TypeRef, schema: &Schema) -> Result<TypeDescriptor, SchemaError> {
  match type_ref {
    TypeRef::Type { id } => {
      let (_, layout) = lookup(schema, id)?;
      let display = format!("{}<'a>", type_path(schema, id)?);
      if layout.is_abstract() {
        Ok(TypeDescriptor { display, kind: DescriptorKind::Abstract { type_id: id.clone() }, traversal: Traversal::Value })
      } else {
        let size = layout
          .size
          .ok_or(SchemaError::MalformedLayout { type_id: id.clone(), reason: "concrete layout has no size" })?;
        Ok(TypeDescriptor {
          display,
          kind: DescriptorKind::Concrete { type_id: id.clone(), size },
          traversal: Traversal::Value,
        })
      }
    }
    TypeRef::Primitive { kind } => {
      let kind = kind.parse::<PrimitiveKind>().map_err(|kind| SchemaError::UnknownPrimitive { kind })?;
      Ok(TypeDescriptor::primitive(kind))
    }
    TypeRef::Sequence { element } => Ok(TypeDescriptor::sequence(resolve(element, schema)?)),
    TypeRef::Option { element } => Ok(TypeDescriptor::option(resolve(element, schema)?)),
    TypeRef::Result { ok, err } => Ok(TypeDescriptor::result(resolve(ok, schema)?, resolve(err, schema)?)),
  }
}

/* Resolve one declared field, attaching the owner to any failure */
pub fn field_descriptor(schema: &Schema, type_id: &str, field: &str) -> Result<TypeDescriptor, SchemaError> {
  let decl = schema.type_decl(type_id).ok_or_else(|| SchemaError::UnknownType { type_id: type_id.to_string() })?;
  let type_ref = decl
    .fields
    .get(field)
    .ok_or_else(|| SchemaError::UnknownField { type_id: type_id.to_string(), field: field.to_string() })?;
  resolve(type_ref, schema).map_err(|e| e.in_field(type_id, field))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
  pub name: String,
  pub ident: String,
  pub descriptor: TypeDescriptor,
  pub offset: u32,
}

/* Fields of a type in layout order, each with its descriptor and byte offset */
pub fn resolve_fields(schema: &Schema, type_id: &str) -> Result<Vec<ResolvedField>, SchemaError> {
  let (_, layout) = lookup(schema, type_id)?;
  layout
    .fields
    .iter()
    .map(|(name, offset)| {
      Ok(ResolvedField {
        name: name.clone(),
        ident: field_ident(name),
        descriptor: field_descriptor(schema, type_id, name)?,
        offset: *offset,
      })
    })
    .collect()
}
