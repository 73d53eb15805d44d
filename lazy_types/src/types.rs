use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/* Type ids are opaque strings chosen by whoever produced the schema */
pub type TypeId = String;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    Bool,
    U32,
    I32,
    U64,
    I64,
    Char,
    String,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Bool,
        PrimitiveKind::U32,
        PrimitiveKind::I32,
        PrimitiveKind::U64,
        PrimitiveKind::I64,
        PrimitiveKind::Char,
        PrimitiveKind::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* Unknown primitive spellings are rejected by the resolver, which knows the owning field */
impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Reference from a field to the type of its value.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "class", rename_all = "kebab-case")]
pub enum TypeRef {
    Type {
        id: TypeId,
    },
    Primitive {
        /* Kept as text so a bad spelling surfaces as a schema error with context */
        #[serde(rename = "type")]
        kind: String,
    },
    Sequence {
        #[serde(rename = "type")]
        element: Box<TypeRef>,
    },
    Option {
        #[serde(rename = "type")]
        element: Box<TypeRef>,
    },
    Result {
        #[serde(rename = "type0")]
        ok: Box<TypeRef>,
        #[serde(rename = "type1")]
        err: Box<TypeRef>,
    },
}

impl TypeRef {
    pub fn type_id(id: impl Into<TypeId>) -> Self {
        TypeRef::Type { id: id.into() }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeRef::Primitive { kind: kind.as_str().to_string() }
    }

    pub fn sequence(element: TypeRef) -> Self {
        TypeRef::Sequence { element: Box::new(element) }
    }

    pub fn option(element: TypeRef) -> Self {
        TypeRef::Option { element: Box::new(element) }
    }

    pub fn result(ok: TypeRef, err: TypeRef) -> Self {
        TypeRef::Result { ok: Box::new(ok), err: Box::new(err) }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDecl {
    pub name: String,
    /* Present iff this type is a member of a discriminated union */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeId>,
    #[serde(default)]
    pub fields: IndexMap<String, TypeRef>,
}

/// Physical placement of a type inside a buffer.
///
/// A layout with `discriminants` is the abstract form: the listed fields are the
/// base fields shared by every variant. Otherwise it is the concrete form and
/// `size` is required.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SerializationLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default)]
    pub fields: Vec<(String, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminants: Option<IndexMap<u32, TypeId>>,
}

impl SerializationLayout {
    pub fn concrete(size: u32, fields: Vec<(String, u32)>) -> Self {
        Self { size: Some(size), fields, discriminants: None }
    }

    pub fn abstract_type(discriminants: IndexMap<u32, TypeId>) -> Self {
        Self { size: None, fields: Vec::new(), discriminants: Some(discriminants) }
    }

    pub fn is_abstract(&self) -> bool {
        self.discriminants.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Schema {
    pub types: IndexMap<TypeId, TypeDecl>,
    pub serialization: IndexMap<TypeId, SerializationLayout>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_decl(&self, id: &str) -> Option<&TypeDecl> {
        self.types.get(id)
    }

    pub fn layout(&self, id: &str) -> Option<&SerializationLayout> {
        self.serialization.get(id)
    }

    /* Types emitted at top level; union members live inside their parent */
    pub fn top_level_ids(&self) -> impl Iterator<Item = &TypeId> {
        self.types.iter().filter(|(_, decl)| decl.parent.is_none()).map(|(id, _)| id)
    }
}
