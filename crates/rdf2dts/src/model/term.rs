//! RDF terms and statements.

use std::fmt;

use serde::Serialize;

use super::iri;
use super::ontology::namespace_for_prefix;

/// An IRI-named resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NamedEntity {
    iri: String,
}

impl NamedEntity {
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// Decoded local name (`Thing` for `https://schema.org/Thing`).
    pub fn local_name(&self) -> String {
        iri::local_name(&self.iri)
    }
}

impl fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

impl From<&str> for NamedEntity {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

impl From<String> for NamedEntity {
    fn from(iri: String) -> Self {
        Self::new(iri)
    }
}

/// The object position of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    NamedEntity(NamedEntity),
    StringLiteral {
        value: String,
        language: Option<String>,
    },
    /// A `prefix:local` reference that was never expanded (`rdfs:Class`).
    CompactRelativeRef {
        namespace: String,
        local: String,
    },
}

impl Term {
    pub fn entity(iri: impl Into<String>) -> Self {
        Term::NamedEntity(NamedEntity::new(iri))
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::StringLiteral {
            value: value.into(),
            language: None,
        }
    }

    pub fn compact(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Term::CompactRelativeRef {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// The full IRI this term names, if it names anything.
    ///
    /// Compact references expand only for known prefixes.
    pub fn as_iri(&self) -> Option<String> {
        match self {
            Term::NamedEntity(entity) => Some(entity.iri.clone()),
            Term::CompactRelativeRef { namespace, local } => {
                namespace_for_prefix(namespace).map(|ns| format!("{ns}{local}"))
            }
            Term::StringLiteral { .. } => None,
        }
    }

    /// The term as a [`NamedEntity`], expanding compact references.
    pub fn to_entity(&self) -> Option<NamedEntity> {
        self.as_iri().map(NamedEntity::new)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedEntity(entity) => write!(f, "{entity}"),
            Term::StringLiteral {
                value,
                language: Some(lang),
            } => write!(f, "{value:?}@{lang}"),
            Term::StringLiteral { value, language: None } => write!(f, "{value:?}"),
            Term::CompactRelativeRef { namespace, local } => write!(f, "{namespace}:{local}"),
        }
    }
}

/// A single `(subject, predicate, object)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: NamedEntity,
    pub predicate: NamedEntity,
    pub object: Term,
}

impl Statement {
    pub fn new(subject: impl Into<NamedEntity>, predicate: impl Into<NamedEntity>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
