//! The ontology compiler.
//!
//! Pipeline: statements are grouped into topics, the class graph is built and
//! validated, properties and enumeration values are bound onto it, and every
//! visible class is resolved to an [`EntityDecl`] in sort order.

pub mod algebra;
pub mod class_graph;
pub mod class_map;
pub mod enums;
pub mod helpers;
pub mod properties;
pub mod sort;

use std::collections::HashMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::CompileError;
use crate::model::context::NamingContext;
use crate::model::term::Statement;
use crate::model::topic::group_topics;

use self::algebra::{EntityDecl, TypeAlgebra};
use self::class_map::ClassMap;
use self::helpers::HelperSet;

/// Options controlling compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Emit superseded classes and properties too.
    pub include_deprecated: bool,
    /// Context used to shorten IRIs into scoped names.
    pub context: NamingContext,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include_deprecated: false,
            context: NamingContext::with_default("https://schema.org"),
        }
    }
}

/// The result of one compilation run.
#[derive(Debug, Clone)]
pub struct CompiledOntology {
    pub classes: ClassMap,
    pub helpers: HelperSet,
    /// Visible entities, in sort order.
    pub declarations: Vec<EntityDecl>,
    pub diagnostics: Diagnostics,
}

impl CompiledOntology {
    pub fn declaration(&self, ident: &str) -> Option<&EntityDecl> {
        self.declarations.iter().find(|d| d.ident == ident)
    }
}

pub struct OntologyCompiler {
    options: CompileOptions,
}

impl OntologyCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn compile(&self, statements: Vec<Statement>) -> Result<CompiledOntology, CompileError> {
        self.options.context.validate()?;
        let mut diagnostics = Diagnostics::new();

        let topics = group_topics(statements);
        tracing::debug!(topics = topics.len(), "statements grouped");

        let mut classes = class_graph::build_class_map(&topics, &mut diagnostics)?;
        properties::bind_properties(&topics, &mut classes, &mut diagnostics)?;
        enums::bind_enum_values(&topics, &mut classes, &mut diagnostics)?;

        let declarations = self.resolve_declarations(&classes, &mut diagnostics);
        let helpers = HelperSet::for_model(&classes, &self.options.context);

        tracing::info!(
            classes = classes.len(),
            declarations = declarations.len(),
            diagnostics = diagnostics.len(),
            "ontology compiled"
        );

        Ok(CompiledOntology {
            classes,
            helpers,
            declarations,
            diagnostics,
        })
    }

    fn resolve_declarations(&self, classes: &ClassMap, diagnostics: &mut Diagnostics) -> Vec<EntityDecl> {
        let algebra = TypeAlgebra::new(classes, &self.options.context, self.options.include_deprecated);
        let mut scoped_names: HashMap<String, String> = HashMap::new();
        let mut idents: HashMap<String, String> = HashMap::new();
        let mut declarations = Vec::new();

        for id in sort::sorted_ids(classes) {
            let node = classes.node(id);
            if node.is_deprecated() && !self.options.include_deprecated {
                continue;
            }
            let decl = algebra.resolve(id);
            let scoped_clash = scoped_names.insert(decl.scoped_name.clone(), decl.iri.clone());
            let ident_clash = idents.insert(decl.ident.clone(), decl.iri.clone());
            if let Some(previous) = scoped_clash {
                diagnostics.report(
                    DiagnosticKind::NameCollision,
                    &decl.iri,
                    format!("scoped name {:?} is also used by <{previous}>", decl.scoped_name),
                );
            } else if let Some(previous) = ident_clash {
                diagnostics.report(
                    DiagnosticKind::NameCollision,
                    &decl.iri,
                    format!("identifier {:?} is also used by <{previous}>", decl.ident),
                );
            }
            declarations.push(decl);
        }
        declarations
    }
}

/// Compile `statements` with `options`.
pub fn compile(statements: Vec<Statement>, options: &CompileOptions) -> Result<CompiledOntology, CompileError> {
    OntologyCompiler::new(options.clone()).compile(statements)
}

pub(crate) fn record_comment(
    slot: &mut Option<String>,
    text: &str,
    statement: &Statement,
    diagnostics: &mut Diagnostics,
) {
    if slot.is_some() {
        diagnostics.report(
            DiagnosticKind::DuplicateComment,
            statement.subject.iri(),
            "comment overwritten",
        );
    }
    *slot = Some(text.to_string());
}

pub(crate) fn report_unrecognized(diagnostics: &mut Diagnostics, statement: &Statement) {
    diagnostics.report(
        DiagnosticKind::UnrecognizedStatement,
        statement.subject.iri(),
        format!("did not consume {} {}", statement.predicate, statement.object),
    );
}
