//! Two-pass construction of the class hierarchy.
//!
//! 1. [`forward_declare`] creates one empty node per class topic, after
//!    seeding the builtin data types and the synthetic `DataType` union.
//! 2. [`link_classes`] replays every class topic's statements: comments,
//!    `rdfs:subClassOf` edges, supersession and explicit `rdfs:Class` marks.
//!
//! [`validate`] then requires every node to be marked as a class, directly
//! or through an ancestor.

use std::collections::HashSet;

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::model::ontology::schema;
use crate::model::term::{NamedEntity, Statement, Term};
use crate::model::topic::Topic;
use crate::model::type_ref::{Primitive, TypeRef};
use crate::model::vocabulary::{
    classify_predicate, get_comment, is_class_type, is_sub_class_of, WellKnownPredicate,
};

use super::class_map::{ClassKind, ClassMap, ClassNode};
use super::{record_comment, report_unrecognized};

/// Builtin data types seeded before any topic is read.
pub const BUILTINS: &[(&str, Primitive)] = &[
    (schema::TEXT, Primitive::String),
    (schema::NUMBER, Primitive::Number),
    (schema::BOOLEAN, Primitive::Boolean),
    (schema::DATE, Primitive::String),
    (schema::DATE_TIME, Primitive::String),
    (schema::TIME, Primitive::String),
];

/// Build, link and validate the class graph.
pub fn build_class_map(
    topics: &[Topic],
    diagnostics: &mut Diagnostics,
) -> Result<ClassMap, CompileError> {
    let mut classes = forward_declare(topics);
    link_classes(topics, &mut classes, diagnostics)?;
    validate(&classes)?;
    tracing::debug!(classes = classes.len(), "class graph built");
    Ok(classes)
}

/// The schema.org namespace the input is written in.
///
/// The first schema.org IRI seen decides; `https:` when there is none.
pub fn detect_schema_namespace(topics: &[Topic]) -> &'static str {
    let is_http = |iri: &str| iri.starts_with(schema::HTTP_NS);
    let is_schema = |iri: &str| schema::local(iri).is_some();

    for statement in topics.iter().flat_map(|t| &t.statements) {
        let object = statement.object.as_iri();
        let candidates = [
            Some(statement.subject.iri()),
            Some(statement.predicate.iri()),
            object.as_deref(),
        ];
        if let Some(iri) = candidates.into_iter().flatten().find(|&iri| is_schema(iri)) {
            return if is_http(iri) {
                schema::HTTP_NS
            } else {
                schema::HTTPS_NS
            };
        };
    }
    schema::HTTPS_NS
}

/// Topics that describe classes.
///
/// A topic qualifies if it is declared `rdfs:Class` or `schema:DataType`,
/// has its own `rdfs:subClassOf` statement, or is the target of one.
pub fn class_topics(topics: &[Topic]) -> Vec<&Topic> {
    let sub_class_targets: HashSet<String> = topics
        .iter()
        .flat_map(|t| &t.statements)
        .filter(|s| is_sub_class_of(s) && !is_class_type(&s.object))
        .filter_map(|s| s.object.as_iri())
        .collect();

    topics
        .iter()
        .filter(|topic| {
            topic.is_class()
                || topic.is_data_type()
                || topic.has_sub_class_of()
                || sub_class_targets.contains(topic.subject.iri())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pass 1: forward declaration
// ---------------------------------------------------------------------------

pub fn forward_declare(topics: &[Topic]) -> ClassMap {
    let ns = detect_schema_namespace(topics);
    let mut classes = ClassMap::new();

    let mut builtins = Vec::with_capacity(BUILTINS.len());
    for (local, primitive) in BUILTINS {
        let subject = NamedEntity::new(format!("{ns}{local}"));
        builtins.push(classes.insert(ClassNode::builtin(subject, TypeRef::Primitive(*primitive))));
    }
    let union = classes.insert(ClassNode::new(
        NamedEntity::new(format!("{ns}{}", schema::DATA_TYPE)),
        ClassKind::DataTypeUnion,
    ));
    for builtin in builtins {
        classes.add_union_member(union, builtin);
    }

    for topic in class_topics(topics) {
        if classes.get(topic.subject.iri()).is_some() {
            continue;
        }
        if topic.is_data_type() {
            let alias = ClassNode::builtin(topic.subject.clone(), TypeRef::Primitive(Primitive::String));
            let id = classes.insert(alias);
            classes.add_union_member(union, id);
        } else {
            classes.insert(ClassNode::new(topic.subject.clone(), ClassKind::Class));
        }
    }

    classes
}

// ---------------------------------------------------------------------------
// Pass 2: linking
// ---------------------------------------------------------------------------

pub fn link_classes(
    topics: &[Topic],
    classes: &mut ClassMap,
    diagnostics: &mut Diagnostics,
) -> Result<(), CompileError> {
    for topic in class_topics(topics) {
        for statement in &topic.statements {
            link_statement(classes, statement, diagnostics)?;
        }
    }
    Ok(())
}

fn link_statement(
    classes: &mut ClassMap,
    statement: &Statement,
    diagnostics: &mut Diagnostics,
) -> Result<(), CompileError> {
    let Some(id) = classes.get(statement.subject.iri()) else {
        return Ok(());
    };

    match classify_predicate(&statement.predicate) {
        WellKnownPredicate::Comment => {
            if let Some(text) = get_comment(statement)? {
                record_comment(&mut classes.node_mut(id).comment, text, statement, diagnostics);
            }
        }
        WellKnownPredicate::SubClassOf => {
            // `DataType rdfs:subClassOf rdfs:Class`: meta-level, not an edge.
            if is_class_type(&statement.object) {
                return Ok(());
            }
            let parent = classes.resolve_object(statement)?;
            classes.add_parent(id, parent);
        }
        WellKnownPredicate::SupersededBy => {
            let successor = classes.resolve_object(statement)?;
            classes.add_superseded_by(id, successor);
        }
        WellKnownPredicate::Type => match &statement.object {
            object if is_class_type(object) => classes.node_mut(id).explicitly_class = true,
            // Other types are the enumeration facet of the same subject.
            Term::NamedEntity(_) | Term::CompactRelativeRef { .. } => {}
            Term::StringLiteral { .. } => report_unrecognized(diagnostics, statement),
        },
        WellKnownPredicate::DomainIncludes
        | WellKnownPredicate::RangeIncludes
        | WellKnownPredicate::Other => report_unrecognized(diagnostics, statement),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Every class must be an `rdfs:Class` directly or through an ancestor.
pub fn validate(classes: &ClassMap) -> Result<(), CompileError> {
    for (id, node) in classes.iter() {
        if !classes.is_marked_class(id) {
            return Err(CompileError::UnclassifiedClass(node.subject.iri().to_string()));
        }
    }
    Ok(())
}
