//! The class graph arena and its derived predicates.
//!
//! Classes, properties and enumeration values live in flat arenas owned by a
//! single [`ClassMap`] and refer to each other by id. The subclass graph may
//! be cyclic on pathological input, so every traversal threads a visited set.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CompileError;
use crate::model::term::{NamedEntity, Statement, Term};
use crate::model::type_ref::{dedup_by_key, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    /// A primitive alias such as `Text = string`.
    Builtin,
    /// The synthetic union of every builtin.
    DataTypeUnion,
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClassNode {
    pub subject: NamedEntity,
    pub kind: ClassKind,
    pub comment: Option<String>,
    /// Own external-type aliases; see [`ClassMap::typedefs`] for the inherited set.
    pub typedefs: Vec<TypeRef>,
    pub explicitly_class: bool,
    pub parents: Vec<ClassId>,
    pub children: Vec<ClassId>,
    pub properties: Vec<PropertyBinding>,
    pub enum_values: Vec<EnumId>,
    pub superseded_by: Vec<ClassId>,
    /// Constituents of a [`ClassKind::DataTypeUnion`].
    pub union_members: Vec<ClassId>,
}

impl ClassNode {
    pub fn new(subject: NamedEntity, kind: ClassKind) -> Self {
        Self {
            subject,
            kind,
            comment: None,
            typedefs: Vec::new(),
            explicitly_class: kind != ClassKind::Class,
            parents: Vec::new(),
            children: Vec::new(),
            properties: Vec::new(),
            enum_values: Vec::new(),
            superseded_by: Vec::new(),
            union_members: Vec::new(),
        }
    }

    pub fn builtin(subject: NamedEntity, alias: TypeRef) -> Self {
        let mut node = Self::new(subject, ClassKind::Builtin);
        node.typedefs.push(alias);
        node
    }

    pub fn is_deprecated(&self) -> bool {
        !self.superseded_by.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub subject: NamedEntity,
    pub range_classes: Vec<ClassId>,
    pub comment: Option<String>,
    pub superseded_by: Vec<Term>,
}

impl PropertyDef {
    pub fn new(subject: NamedEntity) -> Self {
        Self {
            subject,
            range_classes: Vec::new(),
            comment: None,
            superseded_by: Vec::new(),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        !self.superseded_by.is_empty()
    }
}

/// Attachment of a property to one owning class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    pub key: NamedEntity,
    pub def: PropertyId,
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    pub subject: NamedEntity,
    pub comment: Option<String>,
    /// Classes this value is a member of.
    pub owners: Vec<ClassId>,
}

impl EnumValue {
    pub fn new(subject: NamedEntity) -> Self {
        Self {
            subject,
            comment: None,
            owners: Vec::new(),
        }
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Declaration identifier for an entity: its local name with every
/// character outside `[A-Za-z0-9_]` replaced by `_`.
pub fn identifier_for(entity: &NamedEntity) -> String {
    let mut ident: String = entity
        .local_name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

// ---------------------------------------------------------------------------
// ClassMap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    nodes: Vec<ClassNode>,
    index: HashMap<String, ClassId>,
    properties: Vec<PropertyDef>,
    enum_values: Vec<EnumValue>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the existing id if the IRI is already present.
    pub fn insert(&mut self, node: ClassNode) -> ClassId {
        if let Some(id) = self.get(node.subject.iri()) {
            return id;
        }
        let id = ClassId(self.nodes.len());
        self.index.insert(node.subject.iri().to_string(), id);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, iri: &str) -> Option<ClassId> {
        self.index.get(iri).copied()
    }

    pub fn node(&self, id: ClassId) -> &ClassNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: ClassId) -> &mut ClassNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (ClassId(i), node))
    }

    /// Resolve the object of `statement` to a class.
    pub fn resolve_object(&self, statement: &Statement) -> Result<ClassId, CompileError> {
        let iri = statement
            .object
            .as_iri()
            .ok_or_else(|| CompileError::malformed(statement, "expected a class reference"))?;
        self.get(&iri).ok_or_else(|| CompileError::dangling(statement))
    }

    pub fn add_parent(&mut self, child: ClassId, parent: ClassId) {
        push_unique(&mut self.nodes[child.0].parents, parent);
        push_unique(&mut self.nodes[parent.0].children, child);
    }

    pub fn add_superseded_by(&mut self, id: ClassId, successor: ClassId) {
        push_unique(&mut self.nodes[id.0].superseded_by, successor);
    }

    pub fn add_union_member(&mut self, union: ClassId, member: ClassId) {
        push_unique(&mut self.nodes[union.0].union_members, member);
    }

    // -----------------------------------------------------------------------
    // Properties and enumeration values
    // -----------------------------------------------------------------------

    pub fn add_property(&mut self, def: PropertyDef) -> PropertyId {
        self.properties.push(def);
        PropertyId(self.properties.len() - 1)
    }

    pub fn property(&self, id: PropertyId) -> &PropertyDef {
        &self.properties[id.0]
    }

    pub fn property_mut(&mut self, id: PropertyId) -> &mut PropertyDef {
        &mut self.properties[id.0]
    }

    pub fn properties(&self) -> impl Iterator<Item = (PropertyId, &PropertyDef)> {
        self.properties
            .iter()
            .enumerate()
            .map(|(i, def)| (PropertyId(i), def))
    }

    /// Attach a property to its owning class; one binding per pair.
    pub fn bind_property(&mut self, owner: ClassId, binding: PropertyBinding) {
        let bindings = &mut self.nodes[owner.0].properties;
        if !bindings.iter().any(|b| b.def == binding.def) {
            bindings.push(binding);
        }
    }

    pub fn add_enum_value(&mut self, value: EnumValue) -> EnumId {
        self.enum_values.push(value);
        EnumId(self.enum_values.len() - 1)
    }

    pub fn enum_value(&self, id: EnumId) -> &EnumValue {
        &self.enum_values[id.0]
    }

    pub fn enum_value_mut(&mut self, id: EnumId) -> &mut EnumValue {
        &mut self.enum_values[id.0]
    }

    pub fn enum_values(&self) -> impl Iterator<Item = (EnumId, &EnumValue)> {
        self.enum_values
            .iter()
            .enumerate()
            .map(|(i, value)| (EnumId(i), value))
    }

    /// Register `value` as a member of `owner`.
    pub fn add_enum_member(&mut self, owner: ClassId, value: EnumId) {
        push_unique(&mut self.nodes[owner.0].enum_values, value);
        push_unique(&mut self.enum_values[value.0].owners, owner);
    }

    // -----------------------------------------------------------------------
    // Derived predicates
    // -----------------------------------------------------------------------

    pub fn identifier(&self, id: ClassId) -> String {
        identifier_for(&self.node(id).subject)
    }

    /// True if the class, or any ancestor, was declared `rdfs:Class`.
    pub fn is_marked_class(&self, id: ClassId) -> bool {
        let mut visited = HashSet::new();
        self.is_marked_class_inner(id, &mut visited)
    }

    fn is_marked_class_inner(&self, id: ClassId, visited: &mut HashSet<ClassId>) -> bool {
        if !visited.insert(id) {
            return false;
        }
        let node = self.node(id);
        node.explicitly_class
            || node
                .parents
                .iter()
                .any(|&parent| self.is_marked_class_inner(parent, visited))
    }

    /// True if the class is an addressable, property-bearing object rather
    /// than a plain value union.
    pub fn is_node_type(&self, id: ClassId) -> bool {
        let mut visited = HashSet::new();
        self.is_node_type_inner(id, &mut visited)
    }

    fn is_node_type_inner(&self, id: ClassId, visited: &mut HashSet<ClassId>) -> bool {
        let node = self.node(id);
        if node.kind != ClassKind::Class {
            return false;
        }
        if !node.properties.is_empty() {
            return true;
        }
        // A revisit is neutral: a `false` anywhere has already short-circuited.
        if !visited.insert(id) {
            return true;
        }
        node.parents
            .iter()
            .all(|&parent| self.is_node_type_inner(parent, visited))
    }

    /// Base and leaf naming for every class, computed in one pass.
    pub fn layout(&self) -> BaseLayout {
        LayoutBuilder::new(self).build()
    }

    /// Own and inherited typedefs, deduplicated and sorted by structural key.
    pub fn typedefs(&self, id: ClassId) -> Vec<TypeRef> {
        let mut visited = HashSet::new();
        let mut typedefs = Vec::new();
        self.collect_typedefs(id, &mut visited, &mut typedefs);
        dedup_by_key(&mut typedefs);
        typedefs
    }

    fn collect_typedefs(&self, id: ClassId, visited: &mut HashSet<ClassId>, out: &mut Vec<TypeRef>) {
        if !visited.insert(id) {
            return;
        }
        let node = self.node(id);
        out.extend(node.typedefs.iter().cloned());
        for &parent in &node.parents {
            self.collect_typedefs(parent, visited, out);
        }
    }
}

// ---------------------------------------------------------------------------
// Base layout
// ---------------------------------------------------------------------------

/// Which base and leaf declarations each class gets.
///
/// A class inherits one base per parent chain; a parent that skips its own
/// base contributes its named parents instead. Named parents are sorted.
#[derive(Debug, Clone)]
pub struct BaseLayout {
    idents: Vec<String>,
    node_type: Vec<bool>,
    named_parents: Vec<Vec<String>>,
    skip_base: Vec<bool>,
}

impl BaseLayout {
    pub fn is_node_type(&self, id: ClassId) -> bool {
        self.node_type[id.0]
    }

    pub fn named_parents(&self, id: ClassId) -> &[String] {
        &self.named_parents[id.0]
    }

    /// True if no separate base declaration is emitted for the class.
    pub fn skip_base(&self, id: ClassId) -> bool {
        self.skip_base[id.0]
    }

    pub fn base_name(&self, id: ClassId) -> Option<String> {
        (!self.skip_base(id)).then(|| format!("{}Base", self.idents[id.0]))
    }

    pub fn leaf_name(&self, id: ClassId) -> Option<String> {
        let has_leaf = self.is_node_type(id) || !self.named_parents(id).is_empty();
        has_leaf.then(|| format!("{}Leaf", self.idents[id.0]))
    }
}

/// Memoized walk behind [`ClassMap::layout`].
///
/// Classes are visited in identifier order so cyclic input resolves the
/// same way whatever order its statements came in.
struct LayoutBuilder<'a> {
    classes: &'a ClassMap,
    idents: Vec<String>,
    node_type: Vec<bool>,
    named: Vec<Option<Vec<String>>>,
    refs: Vec<Option<Vec<String>>>,
    on_path: Vec<bool>,
}

impl<'a> LayoutBuilder<'a> {
    fn new(classes: &'a ClassMap) -> Self {
        let ids: Vec<ClassId> = classes.iter().map(|(id, _)| id).collect();
        Self {
            classes,
            idents: ids.iter().map(|&id| classes.identifier(id)).collect(),
            node_type: ids.iter().map(|&id| classes.is_node_type(id)).collect(),
            named: vec![None; ids.len()],
            refs: vec![None; ids.len()],
            on_path: vec![false; ids.len()],
        }
    }

    fn ordered(&self, ids: &[ClassId]) -> Vec<ClassId> {
        let mut ids = ids.to_vec();
        ids.sort_by(|a, b| {
            self.idents[a.0]
                .cmp(&self.idents[b.0])
                .then_with(|| self.classes.node(*a).subject.cmp(&self.classes.node(*b).subject))
        });
        ids
    }

    fn build(mut self) -> BaseLayout {
        let all: Vec<ClassId> = self.classes.iter().map(|(id, _)| id).collect();
        for id in self.ordered(&all) {
            self.named_parents(id);
        }

        let named_parents: Vec<Vec<String>> = self.named.into_iter().map(Option::unwrap_or_default).collect();
        let skip_base = all
            .iter()
            .map(|&id| skip_base_given(self.classes, self.node_type[id.0], id, &named_parents[id.0]))
            .collect();
        BaseLayout {
            idents: self.idents,
            node_type: self.node_type,
            named_parents,
            skip_base,
        }
    }

    fn named_parents(&mut self, id: ClassId) -> Vec<String> {
        if let Some(names) = &self.named[id.0] {
            return names.clone();
        }
        self.on_path[id.0] = true;
        let mut names = Vec::new();
        for parent in self.ordered(&self.classes.node(id).parents) {
            names.extend(self.base_refs(parent));
        }
        names.sort();
        names.dedup();
        self.on_path[id.0] = false;
        self.named[id.0] = Some(names.clone());
        names
    }

    // A class already on the current descent closes a cycle and contributes
    // nothing.
    fn base_refs(&mut self, id: ClassId) -> Vec<String> {
        if let Some(refs) = &self.refs[id.0] {
            return refs.clone();
        }
        if self.on_path[id.0] {
            return Vec::new();
        }
        let named = self.named_parents(id);
        let refs = if skip_base_given(self.classes, self.node_type[id.0], id, &named) {
            named
        } else {
            vec![format!("{}Base", self.idents[id.0])]
        };
        self.refs[id.0] = Some(refs.clone());
        refs
    }
}

fn skip_base_given(classes: &ClassMap, node_type: bool, id: ClassId, named_parents: &[String]) -> bool {
    !node_type || (named_parents.len() == 1 && classes.node(id).properties.is_empty())
}
