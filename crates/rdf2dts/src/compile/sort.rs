//! Total ordering of emitted entities.
//!
//! Builtins come first, then the `DataType` union, then classes. Within a
//! rank entities are ordered by local name, then by full IRI.

use std::cmp::Ordering;

use super::class_map::{ClassId, ClassKind, ClassMap};

fn rank(kind: ClassKind) -> u8 {
    match kind {
        ClassKind::Builtin => 0,
        ClassKind::DataTypeUnion => 1,
        ClassKind::Class => 2,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey<'a> {
    pub kind: ClassKind,
    pub local_name: &'a str,
    pub iri: &'a str,
}

impl<'a> SortKey<'a> {
    pub fn new(kind: ClassKind, local_name: &'a str, iri: &'a str) -> Self {
        Self {
            kind,
            local_name,
            iri,
        }
    }

    pub fn compare(&self, other: &SortKey<'_>) -> Ordering {
        match rank(self.kind).cmp(&rank(other.kind)) {
            Ordering::Equal if self.kind == ClassKind::DataTypeUnion => Ordering::Equal,
            Ordering::Equal => self
                .local_name
                .cmp(other.local_name)
                .then_with(|| self.iri.cmp(other.iri)),
            unequal => unequal,
        }
    }
}

pub fn compare_classes(classes: &ClassMap, a: ClassId, b: ClassId) -> Ordering {
    let (a, b) = (classes.node(a), classes.node(b));
    let (local_a, local_b) = (a.subject.local_name(), b.subject.local_name());
    let key_a = SortKey::new(a.kind, &local_a, a.subject.iri());
    let key_b = SortKey::new(b.kind, &local_b, b.subject.iri());
    key_a.compare(&key_b)
}

/// Every class id in emission order.
pub fn sorted_ids(classes: &ClassMap) -> Vec<ClassId> {
    let mut ids: Vec<ClassId> = classes.iter().map(|(id, _)| id).collect();
    ids.sort_by(|&a, &b| compare_classes(classes, a, b));
    ids
}
