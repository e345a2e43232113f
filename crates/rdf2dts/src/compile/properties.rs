//! Property definitions and their attachment to owning classes.

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::model::term::Term;
use crate::model::topic::Topic;
use crate::model::type_ref::TypeRef;
use crate::model::vocabulary::{classify_predicate, get_comment, WellKnownPredicate};

use super::class_map::{ClassMap, PropertyBinding, PropertyDef, PropertyId};
use super::{record_comment, report_unrecognized};

/// Build one [`PropertyDef`] per `rdf:Property` topic and bind it to every
/// class named by its `domainIncludes` statements.
pub fn bind_properties(
    topics: &[Topic],
    classes: &mut ClassMap,
    diagnostics: &mut Diagnostics,
) -> Result<(), CompileError> {
    let mut bound = 0usize;
    for topic in topics.iter().filter(|t| t.is_property()) {
        let id = classes.add_property(PropertyDef::new(topic.subject.clone()));

        for statement in &topic.statements {
            match classify_predicate(&statement.predicate) {
                WellKnownPredicate::Comment => {
                    if let Some(text) = get_comment(statement)? {
                        let slot = &mut classes.property_mut(id).comment;
                        record_comment(slot, text, statement, diagnostics);
                    }
                }
                WellKnownPredicate::RangeIncludes => {
                    let range = classes.resolve_object(statement)?;
                    let ranges = &mut classes.property_mut(id).range_classes;
                    if !ranges.contains(&range) {
                        ranges.push(range);
                    }
                }
                WellKnownPredicate::DomainIncludes => {
                    let owner = classes.resolve_object(statement)?;
                    classes.bind_property(
                        owner,
                        PropertyBinding {
                            key: topic.subject.clone(),
                            def: id,
                        },
                    );
                    bound += 1;
                }
                WellKnownPredicate::SupersededBy => {
                    classes
                        .property_mut(id)
                        .superseded_by
                        .push(statement.object.clone());
                }
                WellKnownPredicate::Type
                    if !matches!(statement.object, Term::StringLiteral { .. }) => {}
                WellKnownPredicate::Type
                | WellKnownPredicate::SubClassOf
                | WellKnownPredicate::Other => report_unrecognized(diagnostics, statement),
            }
        }
    }
    tracing::debug!(bindings = bound, "properties bound");
    Ok(())
}

/// Value type of a property: its range classes sorted by identifier, plus
/// [`TypeRef::IdReference`] when any range is a node type (such values may
/// be embedded or referenced by `@id`).
pub fn scalar_type(classes: &ClassMap, id: PropertyId) -> Vec<TypeRef> {
    let ranges = &classes.property(id).range_classes;

    let mut names: Vec<String> = ranges.iter().map(|&c| classes.identifier(c)).collect();
    names.sort();
    names.dedup();

    let mut types: Vec<TypeRef> = names.into_iter().map(TypeRef::Named).collect();
    if ranges.iter().any(|&c| classes.is_node_type(c)) {
        types.push(TypeRef::IdReference);
    }
    types
}
