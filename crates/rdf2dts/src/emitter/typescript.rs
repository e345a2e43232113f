use std::io::{self, Write};

use super::DeclarationEmitter;
use crate::compile::algebra::{BaseDecl, EntityDecl, Heritage, LeafDecl, PropertyMember};
use crate::compile::helpers::{HelperKind, HelperSet};
use crate::model::type_ref::TypeRef;

/// TypeScript declaration (`.d.ts`-style) emitter.
pub struct TypeScriptEmitter<W: Write> {
    writer: W,
    count: u64,
    has_role: bool,
}

impl<W: Write> TypeScriptEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            has_role: false,
        }
    }

    fn write_doc(&mut self, comment: Option<&str>, indent: &str) -> io::Result<()> {
        let Some(comment) = comment else {
            return Ok(());
        };
        let comment = comment.replace("*/", "*\\/");
        let lines: Vec<&str> = comment.lines().collect();
        if let [line] = lines.as_slice() {
            return writeln!(self.writer, "{indent}/** {line} */");
        }
        writeln!(self.writer, "{indent}/**")?;
        for line in lines {
            if line.is_empty() {
                writeln!(self.writer, "{indent} *")?;
            } else {
                writeln!(self.writer, "{indent} * {line}")?;
            }
        }
        writeln!(self.writer, "{indent} */")
    }

    fn write_helper(&mut self, kind: HelperKind, helpers: &HelperSet) -> io::Result<()> {
        let context = helpers.context.to_string();
        let root = helpers.root.as_deref().unwrap_or("object");
        match kind {
            HelperKind::SchemaValue if self.has_role => {
                writeln!(
                    self.writer,
                    "type RoleValue<TContent, TProperty extends string> = Role & {{ [key in TProperty]?: TContent }};"
                )?;
                writeln!(
                    self.writer,
                    "type SchemaValue<T, TProperty extends string> = T | RoleValue<T, TProperty> | readonly (T | RoleValue<T, TProperty>)[];"
                )
            }
            HelperKind::SchemaValue => {
                writeln!(self.writer, "type SchemaValue<T> = T | readonly T[];")
            }
            HelperKind::IdReference => writeln!(
                self.writer,
                "type IdReference = {{\n    /** IRI identifying the canonical address of this object. */\n    \"@id\": string;\n}};"
            ),
            HelperKind::WithContext => {
                writeln!(
                    self.writer,
                    "/** Used at the top-level node to indicate the context for the JSON-LD objects used. */"
                )?;
                writeln!(
                    self.writer,
                    "export type WithContext<T extends {root}> = T & {{\n    \"@context\": {context};\n}};"
                )
            }
            HelperKind::Graph => writeln!(
                self.writer,
                "export interface Graph {{\n    \"@context\": {context};\n    \"@graph\": readonly {root}[];\n}}"
            ),
        }
    }

    fn write_base(&mut self, base: &BaseDecl) -> io::Result<()> {
        let heritage = match &base.heritage {
            Heritage::Referenceable => "Partial<IdReference>".to_string(),
            Heritage::Parents(names) => names.join(", "),
        };
        writeln!(self.writer, "interface {} extends {heritage} {{", base.name)?;
        for member in &base.members {
            self.write_member(member)?;
        }
        writeln!(self.writer, "}}")
    }

    fn write_member(&mut self, member: &PropertyMember) -> io::Result<()> {
        self.write_doc(member.comment.as_deref(), "    ")?;
        let key = quote(&member.key);
        let range = union(&member.range);
        if self.has_role {
            writeln!(self.writer, "    {key}?: SchemaValue<{range}, {key}>;")
        } else {
            writeln!(self.writer, "    {key}?: SchemaValue<{range}>;")
        }
    }

    fn write_leaf(&mut self, leaf: &LeafDecl) -> io::Result<()> {
        if leaf.extends.is_empty() {
            writeln!(self.writer, "interface {} {{", leaf.name)?;
        } else {
            writeln!(self.writer, "interface {} extends {} {{", leaf.name, leaf.extends.join(", "))?;
        }
        writeln!(self.writer, "    \"@type\": {};", quote(&leaf.type_discriminator))?;
        writeln!(self.writer, "}}")
    }
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

fn type_ref(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(p) => p.as_str().to_string(),
        TypeRef::Named(name) => name.clone(),
        TypeRef::Literal(text) => quote(text),
        TypeRef::IdReference => "IdReference".to_string(),
    }
}

fn union(types: &[TypeRef]) -> String {
    if types.is_empty() {
        return "never".to_string();
    }
    types.iter().map(type_ref).collect::<Vec<_>>().join(" | ")
}

impl<W: Write> DeclarationEmitter for TypeScriptEmitter<W> {
    fn emit_helpers(&mut self, helpers: &HelperSet) -> io::Result<()> {
        self.has_role = helpers.has_role;
        for &kind in &helpers.kinds {
            self.write_helper(kind, helpers)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn emit_declaration(&mut self, decl: &EntityDecl) -> io::Result<()> {
        if let Some(base) = &decl.base {
            self.write_base(base)?;
        }
        if let Some(leaf) = &decl.leaf {
            self.write_leaf(leaf)?;
        }
        self.write_doc(decl.comment.as_deref(), "")?;
        writeln!(self.writer, "export type {} = {};", decl.ident, union(&decl.total))?;
        writeln!(self.writer)?;
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn declaration_count(&self) -> u64 {
        self.count
    }
}
