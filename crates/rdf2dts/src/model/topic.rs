//! Grouping of statements by subject.

use std::collections::HashMap;

use super::ontology::{schema, standard};
use super::term::{NamedEntity, Statement};
use super::vocabulary::{self, is_rdf_type};

/// All statements about one subject, plus its declared `rdf:type`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub subject: NamedEntity,
    pub statements: Vec<Statement>,
    pub declared_types: Vec<NamedEntity>,
}

impl Topic {
    fn new(subject: NamedEntity) -> Self {
        Self {
            subject,
            statements: Vec::new(),
            declared_types: Vec::new(),
        }
    }

    /// Declares `rdfs:Class`.
    pub fn is_class(&self) -> bool {
        self.declared_types
            .iter()
            .any(|ty| ty.iri() == standard::RDFS_CLASS)
    }

    /// Declares `rdf:Property`.
    pub fn is_property(&self) -> bool {
        self.declared_types
            .iter()
            .any(|ty| ty.iri() == standard::RDF_PROPERTY)
    }

    /// Declares `schema:DataType`.
    pub fn is_data_type(&self) -> bool {
        self.declared_types
            .iter()
            .any(|ty| schema::is(ty.iri(), schema::DATA_TYPE))
    }

    /// Carries at least one declared type beyond the meta types.
    pub fn has_enum_type(&self) -> bool {
        vocabulary::has_enum_type(&self.declared_types)
    }

    /// Has its own `rdfs:subClassOf` statement.
    pub fn has_sub_class_of(&self) -> bool {
        self.statements.iter().any(vocabulary::is_sub_class_of)
    }
}

/// Group statements by subject, preserving first-appearance order.
pub fn group_topics(statements: impl IntoIterator<Item = Statement>) -> Vec<Topic> {
    let mut topics: Vec<Topic> = Vec::new();
    let mut index: HashMap<NamedEntity, usize> = HashMap::new();

    for statement in statements {
        let slot = *index.entry(statement.subject.clone()).or_insert_with(|| {
            topics.push(Topic::new(statement.subject.clone()));
            topics.len() - 1
        });
        let topic = &mut topics[slot];

        if is_rdf_type(&statement) {
            if let Some(ty) = statement.object.to_entity() {
                if !topic.declared_types.contains(&ty) {
                    topic.declared_types.push(ty);
                }
            }
        }
        topic.statements.push(statement);
    }

    topics
}
