//! Helper declarations emitted ahead of the entities.

use serde::Serialize;
use serde_json::Value;

use crate::model::context::NamingContext;
use crate::model::ontology::schema;

use super::class_map::{ClassKind, ClassMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HelperKind {
    /// A property value: absent, one value, or an array of values.
    SchemaValue,
    /// A node given only by its `@id`.
    IdReference,
    /// A top-level object carrying `@context`.
    WithContext,
    /// A JSON-LD `@graph` document.
    Graph,
}

impl HelperKind {
    pub const ALL: [HelperKind; 4] = [
        HelperKind::SchemaValue,
        HelperKind::IdReference,
        HelperKind::WithContext,
        HelperKind::Graph,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelperSet {
    pub kinds: Vec<HelperKind>,
    /// The model contains `schema:Role`, so values may be Role-wrapped.
    pub has_role: bool,
    /// JSON-LD `@context` value.
    pub context: Value,
    /// Identifier of the root object type, if present.
    pub root: Option<String>,
}

impl HelperSet {
    pub fn for_model(classes: &ClassMap, context: &NamingContext) -> Self {
        let has_role = classes
            .iter()
            .any(|(_, node)| schema::is(node.subject.iri(), schema::ROLE));
        let root = classes
            .iter()
            .find(|(_, node)| {
                node.kind == ClassKind::Class && schema::is(node.subject.iri(), schema::THING)
            })
            .map(|(id, _)| classes.identifier(id));

        Self {
            kinds: HelperKind::ALL.to_vec(),
            has_role,
            context: context.context_value(),
            root,
        }
    }
}
