//! Enumeration values.
//!
//! Any subject typed with something other than the meta types is a member of
//! each class it is typed with. A subject can be a class and an enumeration
//! value at the same time; both facets are kept.

use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use crate::model::ontology::standard;
use crate::model::topic::Topic;
use crate::model::vocabulary::{classify_predicate, get_comment, is_meta_type, WellKnownPredicate};

use super::class_map::{ClassMap, EnumValue};
use super::{record_comment, report_unrecognized};

pub fn bind_enum_values(
    topics: &[Topic],
    classes: &mut ClassMap,
    diagnostics: &mut Diagnostics,
) -> Result<(), CompileError> {
    for topic in topics.iter().filter(|t| t.has_enum_type()) {
        let id = classes.add_enum_value(EnumValue::new(topic.subject.clone()));

        for ty in topic.declared_types.iter().filter(|ty| !is_meta_type(ty)) {
            let owner = classes
                .get(ty.iri())
                .ok_or_else(|| CompileError::DanglingReference {
                    subject: topic.subject.to_string(),
                    predicate: format!("<{}>", standard::RDF_TYPE),
                    object: ty.to_string(),
                })?;
            classes.add_enum_member(owner, id);
        }

        // Statements of a class or property facet are consumed elsewhere.
        let other_facet = classes.get(topic.subject.iri()).is_some() || topic.is_property();

        for statement in &topic.statements {
            match classify_predicate(&statement.predicate) {
                WellKnownPredicate::Comment => {
                    if let Some(text) = get_comment(statement)? {
                        let slot = &mut classes.enum_value_mut(id).comment;
                        record_comment(slot, text, statement, diagnostics);
                    }
                }
                WellKnownPredicate::Type => {}
                _ if other_facet => {}
                _ => report_unrecognized(diagnostics, statement),
            }
        }
    }
    Ok(())
}
