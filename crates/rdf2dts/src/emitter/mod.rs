pub mod json;
pub mod typescript;

use std::io;

use crate::compile::algebra::EntityDecl;
use crate::compile::helpers::HelperSet;
use crate::compile::CompiledOntology;

/// Trait for writing compiled declarations in a target syntax.
pub trait DeclarationEmitter {
    /// Write the helper declarations; called once, before any entity.
    fn emit_helpers(&mut self, helpers: &HelperSet) -> io::Result<()>;
    /// Write one entity declaration.
    fn emit_declaration(&mut self, decl: &EntityDecl) -> io::Result<()>;
    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()>;
    /// Return the number of declarations emitted so far.
    fn declaration_count(&self) -> u64;
}

/// Write helpers, then every declaration in order, then flush.
pub fn emit<E: DeclarationEmitter + ?Sized>(
    compiled: &CompiledOntology,
    emitter: &mut E,
) -> io::Result<()> {
    emitter.emit_helpers(&compiled.helpers)?;
    for decl in &compiled.declarations {
        emitter.emit_declaration(decl)?;
    }
    emitter.flush()
}
