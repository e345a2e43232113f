use std::io::{self, Write};

use serde_json::json;

use super::DeclarationEmitter;
use crate::compile::algebra::EntityDecl;
use crate::compile::helpers::HelperSet;

/// JSON-lines emitter: a `{"helpers": ...}` line, then one declaration per line.
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    fn write_line(&mut self, value: &impl serde::Serialize) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        writeln!(self.writer)
    }
}

impl<W: Write> DeclarationEmitter for JsonLinesEmitter<W> {
    fn emit_helpers(&mut self, helpers: &HelperSet) -> io::Result<()> {
        self.write_line(&json!({ "helpers": helpers }))
    }

    fn emit_declaration(&mut self, decl: &EntityDecl) -> io::Result<()> {
        self.write_line(decl)?;
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
