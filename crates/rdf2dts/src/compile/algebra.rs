//! Language-neutral declarations resolved from the class graph.
//!
//! Each class becomes an [`EntityDecl`] made of up to three parts:
//!
//! - a *base* holding the properties, extending the named parents;
//! - a *leaf* adding the `@type` discriminator to the base;
//! - a *total* union of enumeration literals, the leaf, every child class
//!   and the inherited typedefs.
//!
//! Backends in [`crate::emitter`] only print what is resolved here.

use serde::Serialize;

use crate::model::context::NamingContext;
use crate::model::term::{NamedEntity, Term};
use crate::model::type_ref::TypeRef;

use super::class_map::{BaseLayout, ClassId, ClassKind, ClassMap, ClassNode, EnumId};
use super::properties::scalar_type;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDecl {
    pub iri: String,
    pub scoped_name: String,
    pub ident: String,
    pub kind: ClassKind,
    pub comment: Option<String>,
    pub deprecated: bool,
    /// Scoped names of the direct parents, sorted.
    pub parents: Vec<String>,
    pub base: Option<BaseDecl>,
    pub leaf: Option<LeafDecl>,
    /// Empty means the bottom type.
    pub total: Vec<TypeRef>,
    pub enum_members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "names", rename_all = "snake_case")]
pub enum Heritage {
    /// Intersection of the named parents' bases.
    Parents(Vec<String>),
    /// No named parent: the object may be given by `@id` alone.
    Referenceable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseDecl {
    pub name: String,
    pub heritage: Heritage,
    pub members: Vec<PropertyMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafDecl {
    pub name: String,
    pub extends: Vec<String>,
    /// Value of the `@type` field.
    pub type_discriminator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyMember {
    pub iri: String,
    pub key: String,
    pub comment: Option<String>,
    pub deprecated: bool,
    pub range: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub iri: String,
    pub scoped_name: String,
    pub comment: Option<String>,
    pub literals: Vec<String>,
}

/// `@deprecated Use A or B instead.` for sorted successor names.
pub fn deprecation_note(mut successors: Vec<String>) -> String {
    successors.sort();
    successors.dedup();
    format!("@deprecated Use {} instead.", successors.join(" or "))
}

fn append_note(comment: Option<&str>, note: Option<String>) -> Option<String> {
    match (comment, note) {
        (Some(comment), Some(note)) => Some(format!("{comment}\n{note}")),
        (Some(comment), None) => Some(comment.to_string()),
        (None, note) => note,
    }
}

pub struct TypeAlgebra<'a> {
    classes: &'a ClassMap,
    layout: BaseLayout,
    context: &'a NamingContext,
    include_deprecated: bool,
}

impl<'a> TypeAlgebra<'a> {
    pub fn new(classes: &'a ClassMap, context: &'a NamingContext, include_deprecated: bool) -> Self {
        Self {
            classes,
            layout: classes.layout(),
            context,
            include_deprecated,
        }
    }

    fn scoped(&self, entity: &NamedEntity) -> String {
        self.context.scoped_name(entity)
    }

    fn visible(&self, node: &ClassNode) -> bool {
        self.include_deprecated || !node.is_deprecated()
    }

    pub fn resolve(&self, id: ClassId) -> EntityDecl {
        let node = self.classes.node(id);

        let mut parents: Vec<String> = node
            .parents
            .iter()
            .map(|&p| self.scoped(&self.classes.node(p).subject))
            .collect();
        parents.sort();

        let (base, leaf, total) = match node.kind {
            ClassKind::DataTypeUnion => (None, None, self.union_total(node)),
            ClassKind::Class | ClassKind::Builtin => {
                let base = self.base(id);
                let leaf = self.leaf(id, base.as_ref());
                let total = self.total(id, leaf.as_ref());
                (base, leaf, total)
            }
        };

        EntityDecl {
            iri: node.subject.iri().to_string(),
            scoped_name: self.scoped(&node.subject),
            ident: self.classes.identifier(id),
            kind: node.kind,
            comment: self.class_comment(node),
            deprecated: node.is_deprecated(),
            parents,
            base,
            leaf,
            total,
            enum_members: self.enum_members(node),
        }
    }

    fn class_comment(&self, node: &ClassNode) -> Option<String> {
        let note = node.is_deprecated().then(|| {
            let successors = node
                .superseded_by
                .iter()
                .map(|&s| self.scoped(&self.classes.node(s).subject))
                .collect();
            deprecation_note(successors)
        });
        append_note(node.comment.as_deref(), note)
    }

    // -----------------------------------------------------------------------
    // Base and leaf
    // -----------------------------------------------------------------------

    fn base(&self, id: ClassId) -> Option<BaseDecl> {
        let name = self.layout.base_name(id)?;
        let named_parents = self.layout.named_parents(id).to_vec();
        let heritage = if named_parents.is_empty() {
            Heritage::Referenceable
        } else {
            Heritage::Parents(named_parents)
        };
        Some(BaseDecl {
            name,
            heritage,
            members: self.members(id),
        })
    }

    fn members(&self, id: ClassId) -> Vec<PropertyMember> {
        let mut members: Vec<PropertyMember> = self
            .classes
            .node(id)
            .properties
            .iter()
            .filter_map(|binding| {
                let def = self.classes.property(binding.def);
                if def.is_deprecated() && !self.include_deprecated {
                    return None;
                }
                let note = def.is_deprecated().then(|| {
                    deprecation_note(def.superseded_by.iter().map(|t| self.term_name(t)).collect())
                });
                Some(PropertyMember {
                    iri: def.subject.iri().to_string(),
                    key: self.scoped(&binding.key),
                    comment: append_note(def.comment.as_deref(), note),
                    deprecated: def.is_deprecated(),
                    range: scalar_type(self.classes, binding.def),
                })
            })
            .collect();
        members.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.iri.cmp(&b.iri)));
        members
    }

    fn term_name(&self, term: &Term) -> String {
        match term {
            Term::NamedEntity(entity) => self.scoped(entity),
            Term::CompactRelativeRef { .. } => match term.to_entity() {
                Some(entity) => self.scoped(&entity),
                None => term.to_string(),
            },
            Term::StringLiteral { value, .. } => value.clone(),
        }
    }

    fn leaf(&self, id: ClassId, base: Option<&BaseDecl>) -> Option<LeafDecl> {
        let name = self.layout.leaf_name(id)?;
        let extends = match base {
            Some(base) => vec![base.name.clone()],
            None => self.layout.named_parents(id).to_vec(),
        };
        Some(LeafDecl {
            name,
            extends,
            type_discriminator: self.scoped(&self.classes.node(id).subject),
        })
    }

    // -----------------------------------------------------------------------
    // Total type
    // -----------------------------------------------------------------------

    fn total(&self, id: ClassId, leaf: Option<&LeafDecl>) -> Vec<TypeRef> {
        let node = self.classes.node(id);
        let mut total = Vec::new();

        let mut literals: Vec<String> = node
            .enum_values
            .iter()
            .flat_map(|&e| self.enum_literals(e))
            .collect();
        literals.sort();
        literals.dedup();
        total.extend(literals.into_iter().map(TypeRef::Literal));

        if let Some(leaf) = leaf {
            total.push(TypeRef::Named(leaf.name.clone()));
        }

        let mut children: Vec<String> = node
            .children
            .iter()
            .filter(|&&c| self.visible(self.classes.node(c)))
            .map(|&c| self.classes.identifier(c))
            .collect();
        children.sort();
        children.dedup();
        total.extend(children.into_iter().map(TypeRef::Named));

        total.extend(self.classes.typedefs(id));
        total
    }

    fn union_total(&self, node: &ClassNode) -> Vec<TypeRef> {
        let mut members: Vec<String> = node
            .union_members
            .iter()
            .map(|&m| self.classes.identifier(m))
            .collect();
        members.sort();
        members.dedup();
        members.into_iter().map(TypeRef::Named).collect()
    }

    // -----------------------------------------------------------------------
    // Enumeration values
    // -----------------------------------------------------------------------

    /// The literal IRI, its `https:` form when it is `http:`, and its scoped
    /// name; sorted and deduplicated.
    pub fn enum_literals(&self, id: EnumId) -> Vec<String> {
        let subject = &self.classes.enum_value(id).subject;
        let iri = subject.iri();
        let mut literals = vec![iri.to_string()];
        if let Some(rest) = iri.strip_prefix("http:") {
            literals.push(format!("https:{rest}"));
        }
        literals.push(self.scoped(subject));
        literals.sort();
        literals.dedup();
        literals
    }

    fn enum_members(&self, node: &ClassNode) -> Vec<EnumMember> {
        let mut members: Vec<EnumMember> = node
            .enum_values
            .iter()
            .map(|&e| {
                let value = self.classes.enum_value(e);
                EnumMember {
                    iri: value.subject.iri().to_string(),
                    scoped_name: self.scoped(&value.subject),
                    comment: value.comment.clone(),
                    literals: self.enum_literals(e),
                }
            })
            .collect();
        members.sort_by(|a, b| a.scoped_name.cmp(&b.scoped_name).then_with(|| a.iri.cmp(&b.iri)));
        members
    }
}
