//! Error types for loading and compiling ontologies.

use thiserror::Error;

use crate::model::term::Statement;

/// Fatal conditions that abort a compilation run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("malformed input: {subject} {predicate} {object}: {message}")]
    MalformedInput {
        subject: String,
        predicate: String,
        object: String,
        message: String,
    },

    #[error("dangling reference: {subject} {predicate} {object} does not name a known class")]
    DanglingReference {
        subject: String,
        predicate: String,
        object: String,
    },

    #[error("class <{0}> is not marked as an rdfs:Class, and neither are any of its parents")]
    UnclassifiedClass(String),

    #[error("invalid naming context: {0}")]
    InvalidContext(String),
}

impl CompileError {
    pub fn malformed(statement: &Statement, message: &str) -> Self {
        CompileError::MalformedInput {
            subject: statement.subject.to_string(),
            predicate: statement.predicate.to_string(),
            object: statement.object.to_string(),
            message: message.to_string(),
        }
    }

    pub fn dangling(statement: &Statement) -> Self {
        CompileError::DanglingReference {
            subject: statement.subject.to_string(),
            predicate: statement.predicate.to_string(),
            object: statement.object.to_string(),
        }
    }
}

/// Errors that can occur while reading an ontology file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}
