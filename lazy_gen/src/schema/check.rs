use crate::naming::{field_ident, module_ident, to_pascal, RESERVED_TYPE_NAMES, RESERVED_VARIANT_NAMES};
use crate::schema::error::SchemaError;
use crate::schema::resolved::{field_descriptor, lookup};
use lazy_types::{Schema, SerializationLayout, TypeDecl};
use std::collections::HashSet;

/* Validate every schema invariant the emitters rely on.
   Types are checked in declaration order and the first violation is returned. */
pub fn check(schema: &Schema) -> Result<(), SchemaError> {
  for (type_id, decl) in &schema.types {
    let layout = schema
      .layout(type_id)
      .ok_or_else(|| SchemaError::MissingLayout { type_id: type_id.clone() })?;
    check_placement(type_id, decl, layout)?;
    for (field, _) in &layout.fields {
      field_descriptor(schema, type_id, field)?;
    }
    match &layout.discriminants {
      Some(_) => check_union(schema, type_id, layout)?,
      None => check_fit(schema, type_id, layout)?,
    }
    if let Some(parent) = &decl.parent {
      check_membership(schema, type_id, parent, layout)?;
    }
  }
  check_names(schema)
}

/* Every declared field is placed exactly once and nothing else is placed */
fn check_placement(type_id: &str, decl: &TypeDecl, layout: &SerializationLayout) -> Result<(), SchemaError> {
  let mut placed = HashSet::new();
  for (field, _) in &layout.fields {
    if !decl.fields.contains_key(field) {
      return Err(SchemaError::UnknownField { type_id: type_id.to_string(), field: field.clone() });
    }
    if !placed.insert(field.as_str()) {
      return Err(SchemaError::DuplicatePlacement { type_id: type_id.to_string(), field: field.clone() });
    }
  }
  for field in decl.fields.keys() {
    if !placed.contains(field.as_str()) {
      return Err(SchemaError::UnplacedField { type_id: type_id.to_string(), field: field.clone() });
    }
  }
  Ok(())
}

/* Every field slot lies inside the declared size */
fn check_fit(schema: &Schema, type_id: &str, layout: &SerializationLayout) -> Result<(), SchemaError> {
  let size = layout
    .size
    .ok_or(SchemaError::MalformedLayout { type_id: type_id.to_string(), reason: "concrete layout has no size" })?;
  for (field, offset) in &layout.fields {
    let descriptor = field_descriptor(schema, type_id, field)?;
    let end = *offset as usize + descriptor.slot_width();
    if end > size as usize {
      return Err(SchemaError::FieldOutOfLayout {
        type_id: type_id.to_string(),
        field: field.clone(),
        offset: *offset,
        end,
        size,
      });
    }
  }
  Ok(())
}

fn check_union(schema: &Schema, type_id: &str, layout: &SerializationLayout) -> Result<(), SchemaError> {
  let discriminants = match &layout.discriminants {
    Some(discriminants) => discriminants,
    None => return Ok(()),
  };
  if discriminants.is_empty() {
    return Err(SchemaError::EmptyUnion { type_id: type_id.to_string() });
  }
  let mut seen = HashSet::new();
  for variant in discriminants.values() {
    let (decl, variant_layout) = lookup(schema, variant)?;
    if decl.parent.as_deref() != Some(type_id) {
      return Err(SchemaError::ForeignVariant { type_id: type_id.to_string(), variant: variant.clone() });
    }
    if !seen.insert(variant.as_str()) {
      return Err(SchemaError::DuplicateVariant { type_id: type_id.to_string(), variant: variant.clone() });
    }
    if variant_layout.is_abstract() {
      return Err(SchemaError::MalformedLayout {
        type_id: variant.clone(),
        reason: "a union member must have a concrete layout",
      });
    }
    /* Base fields are read through each variant's object */
    let size = variant_layout
      .size
      .ok_or(SchemaError::MalformedLayout { type_id: variant.clone(), reason: "concrete layout has no size" })?;
    for (field, offset) in &layout.fields {
      let descriptor = field_descriptor(schema, type_id, field)?;
      let end = *offset as usize + descriptor.slot_width();
      if end > size as usize {
        return Err(SchemaError::FieldOutOfLayout {
          type_id: variant.clone(),
          field: field.clone(),
          offset: *offset,
          end,
          size,
        });
      }
    }
  }
  Ok(())
}

fn check_membership(
  schema: &Schema,
  type_id: &str,
  parent: &str,
  layout: &SerializationLayout,
) -> Result<(), SchemaError> {
  let parent_decl = schema.type_decl(parent);
  let parent_layout = schema.layout(parent);
  let (Some(_), Some(parent_layout)) = (parent_decl, parent_layout) else {
    return Err(SchemaError::UnknownParent { type_id: type_id.to_string(), parent: parent.to_string() });
  };
  let Some(discriminants) = &parent_layout.discriminants else {
    return Err(SchemaError::ParentNotAbstract { type_id: type_id.to_string(), parent: parent.to_string() });
  };
  if !discriminants.values().any(|variant| variant == type_id) {
    return Err(SchemaError::OrphanVariant { type_id: type_id.to_string(), parent: parent.to_string() });
  }
  if layout.is_abstract() {
    return Err(SchemaError::MalformedLayout {
      type_id: type_id.to_string(),
      reason: "a union member must have a concrete layout",
    });
  }
  Ok(())
}

/* Generated names must not shadow runtime items or each other.
   Union members live in a module that glob-imports the top level, so they
   must not reuse a top-level name either. */
fn check_names(schema: &Schema) -> Result<(), SchemaError> {
  /* A Pascal name must also start like an identifier: `2d` would print `struct 2d` */
  let reserved = |name: &str| {
    !name.starts_with(|c: char| c.is_alphabetic() || c == '_')
      || RESERVED_TYPE_NAMES.contains(&name)
      || RESERVED_VARIANT_NAMES.contains(&name)
  };

  let mut top_level: HashSet<String> = HashSet::new();
  let mut modules: HashSet<String> = HashSet::new();
  for (type_id, decl) in schema.types.iter().filter(|(_, decl)| decl.parent.is_none()) {
    let name = to_pascal(&decl.name);
    if reserved(&name) {
      return Err(SchemaError::ReservedName { type_id: type_id.clone(), name });
    }
    if !top_level.insert(name.clone()) {
      return Err(SchemaError::DuplicateName { type_id: type_id.clone(), name });
    }
    /* `HTTPBody` and `HttpBody` are distinct types but share the module `http_body` */
    if schema.layout(type_id).is_some_and(SerializationLayout::is_abstract) {
      let module = module_ident(&decl.name);
      if !modules.insert(module.clone()) {
        return Err(SchemaError::DuplicateName { type_id: type_id.clone(), name: module });
      }
    }
  }

  let mut registry: HashSet<String> = HashSet::new();
  let mut getters: HashSet<(&str, String)> = HashSet::new();
  for (type_id, decl) in &schema.types {
    let name = to_pascal(&decl.name);
    let registry_name = match &decl.parent {
      None => name,
      Some(parent) => {
        let parent_name = schema.type_decl(parent).map(|p| to_pascal(&p.name)).unwrap_or_default();
        if reserved(&name) || name == parent_name {
          return Err(SchemaError::ReservedName { type_id: type_id.clone(), name });
        }
        if top_level.contains(&name) {
          return Err(SchemaError::DuplicateName { type_id: type_id.clone(), name });
        }
        format!("{}{}", parent_name, name)
      }
    };
    if !registry.insert(registry_name.clone()) {
      return Err(SchemaError::DuplicateName { type_id: type_id.clone(), name: registry_name });
    }

    for field in decl.fields.keys() {
      let ident = field_ident(field);
      if !getters.insert((type_id.as_str(), ident.clone())) {
        return Err(SchemaError::DuplicateName { type_id: type_id.clone(), name: ident });
      }
    }
  }
  Ok(())
}
