//! References to types in the emitted declarations.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Number,
    Boolean,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
}

/// A language-neutral type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeRef {
    /// An external primitive type.
    Primitive(Primitive),
    /// Another emitted declaration, by identifier.
    Named(String),
    /// A string-literal type.
    Literal(String),
    /// A node given only by its `@id`.
    IdReference,
}

impl TypeRef {
    /// Stable structural key used for deduplication and ordering.
    pub fn key(&self) -> String {
        match self {
            TypeRef::Primitive(p) => format!("primitive:{}", p.as_str()),
            TypeRef::Named(name) => format!("named:{name}"),
            TypeRef::Literal(text) => format!("literal:{text}"),
            TypeRef::IdReference => "id-reference".to_string(),
        }
    }
}

/// Sort by structural key and drop duplicates.
pub fn dedup_by_key(types: &mut Vec<TypeRef>) {
    types.sort_by_cached_key(TypeRef::key);
    types.dedup_by(|a, b| a.key() == b.key());
}
