//! Reading ontology statements from disk.

pub mod ntriples;

use std::path::Path;

use crate::error::LoadError;
use crate::model::term::Statement;

pub use self::ntriples::parse_ntriples;

/// Load an N-Triples file from disk.
pub fn load_file(path: &Path) -> Result<Vec<Statement>, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_ntriples(&content)
}
