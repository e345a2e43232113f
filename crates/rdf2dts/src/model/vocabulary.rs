//! Well-known predicate and type recognition.
//!
//! Everything here is a pure function of a single statement or term, so it
//! works on any ontology that reuses the RDFS and schema.org meta-vocabulary.

use crate::error::CompileError;

use super::ontology::{schema, standard};
use super::term::{NamedEntity, Statement, Term};

/// The predicates the compiler consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownPredicate {
    Comment,
    SubClassOf,
    DomainIncludes,
    RangeIncludes,
    SupersededBy,
    Type,
    Other,
}

/// Classify a predicate IRI.
pub fn classify_predicate(predicate: &NamedEntity) -> WellKnownPredicate {
    let iri = predicate.iri();
    match iri {
        standard::RDFS_COMMENT => WellKnownPredicate::Comment,
        standard::RDFS_SUBCLASS_OF => WellKnownPredicate::SubClassOf,
        standard::RDF_TYPE => WellKnownPredicate::Type,
        _ => match schema::local(iri) {
            Some(schema::DOMAIN_INCLUDES) => WellKnownPredicate::DomainIncludes,
            Some(schema::RANGE_INCLUDES) => WellKnownPredicate::RangeIncludes,
            Some(schema::SUPERSEDED_BY) => WellKnownPredicate::SupersededBy,
            _ => WellKnownPredicate::Other,
        },
    }
}

pub fn is_comment(statement: &Statement) -> bool {
    classify_predicate(&statement.predicate) == WellKnownPredicate::Comment
}

pub fn is_sub_class_of(statement: &Statement) -> bool {
    classify_predicate(&statement.predicate) == WellKnownPredicate::SubClassOf
}

pub fn is_domain_includes(statement: &Statement) -> bool {
    classify_predicate(&statement.predicate) == WellKnownPredicate::DomainIncludes
}

pub fn is_range_includes(statement: &Statement) -> bool {
    classify_predicate(&statement.predicate) == WellKnownPredicate::RangeIncludes
}

pub fn is_superseded_by(statement: &Statement) -> bool {
    classify_predicate(&statement.predicate) == WellKnownPredicate::SupersededBy
}

pub fn is_rdf_type(statement: &Statement) -> bool {
    classify_predicate(&statement.predicate) == WellKnownPredicate::Type
}

/// `rdfs:Class`, in full or compact form.
pub fn is_class_type(term: &Term) -> bool {
    term.as_iri().as_deref() == Some(standard::RDFS_CLASS)
}

/// `rdf:Property`, in full or compact form.
pub fn is_property_type(term: &Term) -> bool {
    term.as_iri().as_deref() == Some(standard::RDF_PROPERTY)
}

/// `schema:DataType` under either scheme.
pub fn is_data_type(term: &Term) -> bool {
    term.as_iri()
        .is_some_and(|iri| schema::is(&iri, schema::DATA_TYPE))
}

/// True if `ty` is one of the meta types (Class, Property, DataType).
pub fn is_meta_type(ty: &NamedEntity) -> bool {
    let iri = ty.iri();
    iri == standard::RDFS_CLASS
        || iri == standard::RDF_PROPERTY
        || schema::is(iri, schema::DATA_TYPE)
}

/// True iff at least one declared type is not a meta type.
///
/// This is the only signal used to decide a subject is an enumeration value.
pub fn has_enum_type(declared_types: &[NamedEntity]) -> bool {
    declared_types.iter().any(|ty| !is_meta_type(ty))
}

/// Extract the text of a comment statement.
///
/// Returns `Ok(None)` for non-comment statements. A comment whose object is
/// not a string literal is malformed input.
pub fn get_comment(statement: &Statement) -> Result<Option<&str>, CompileError> {
    if !is_comment(statement) {
        return Ok(None);
    }
    match &statement.object {
        Term::StringLiteral { value, .. } => Ok(Some(value.as_str())),
        Term::NamedEntity(_) | Term::CompactRelativeRef { .. } => {
            Err(CompileError::malformed(statement, "comment must be a string literal"))
        }
    }
}
