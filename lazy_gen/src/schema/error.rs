use lazy_types::TypeId;
use thiserror::Error;

/// A schema that cannot be turned into accessors. Fatal to the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown type '{type_id}'")]
    UnknownType { type_id: TypeId },

    #[error("type '{type_id}' has no serialization layout")]
    MissingLayout { type_id: TypeId },

    #[error("unknown primitive kind '{kind}'")]
    UnknownPrimitive { kind: String },

    /// A reference inside a field failed to resolve.
    #[error("type '{type_id}' field '{field}': {source}")]
    InvalidField {
        type_id: TypeId,
        field: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("type '{type_id}' has a malformed layout: {reason}")]
    MalformedLayout { type_id: TypeId, reason: &'static str },

    #[error("layout of type '{type_id}' places undeclared field '{field}'")]
    UnknownField { type_id: TypeId, field: String },

    #[error("field '{field}' of type '{type_id}' is not placed by its layout")]
    UnplacedField { type_id: TypeId, field: String },

    #[error("layout of type '{type_id}' places field '{field}' more than once")]
    DuplicatePlacement { type_id: TypeId, field: String },

    #[error("field '{field}' of type '{type_id}' needs bytes {offset}..{end} but the type is {size} bytes")]
    FieldOutOfLayout {
        type_id: TypeId,
        field: String,
        offset: u32,
        end: usize,
        size: u32,
    },

    #[error("type '{type_id}' names unknown parent '{parent}'")]
    UnknownParent { type_id: TypeId, parent: TypeId },

    #[error("type '{type_id}' names parent '{parent}' which is not an abstract type")]
    ParentNotAbstract { type_id: TypeId, parent: TypeId },

    #[error("type '{type_id}' is not listed in the discriminants of its parent '{parent}'")]
    OrphanVariant { type_id: TypeId, parent: TypeId },

    #[error("abstract type '{type_id}' lists variant '{variant}' whose parent is not '{type_id}'")]
    ForeignVariant { type_id: TypeId, variant: TypeId },

    #[error("abstract type '{type_id}' lists variant '{variant}' more than once")]
    DuplicateVariant { type_id: TypeId, variant: TypeId },

    #[error("abstract type '{type_id}' has no variants")]
    EmptyUnion { type_id: TypeId },

    #[error("type '{type_id}' uses reserved name '{name}'")]
    ReservedName { type_id: TypeId, name: String },

    #[error("type '{type_id}' generates name '{name}' which is already taken")]
    DuplicateName { type_id: TypeId, name: String },
}

impl SchemaError {
    pub fn in_field(self, type_id: &str, field: &str) -> Self {
        SchemaError::InvalidField {
            type_id: type_id.to_string(),
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}
