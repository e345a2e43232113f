//! N-Triples input.
//!
//! Lines are parsed with [`oxttl::NTriplesParser`] and mapped onto the
//! compiler's [`Term`] model. Literal datatypes are dropped and blank nodes
//! are rejected. IRIs written as `<prefix:local>` with a known vocabulary
//! prefix are treated as compact references.

use oxrdf::{Literal, NamedNode, Subject, Term as RdfTerm, Triple};
use oxttl::NTriplesParser;

use crate::error::LoadError;
use crate::model::ontology::namespace_for_prefix;
use crate::model::term::{NamedEntity, Statement, Term};

/// Parse a whole N-Triples document.
///
/// N-Triples is line based, so each line is parsed on its own and errors
/// carry the 1-based line they occur on.
pub fn parse_ntriples(input: &str) -> Result<Vec<Statement>, LoadError> {
    let mut statements = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        for triple in NTriplesParser::new().for_slice(line.as_bytes()) {
            let triple = triple.map_err(|e| syntax(line_number, e.to_string()))?;
            statements.push(statement(triple, line_number)?);
        }
    }
    tracing::debug!(statements = statements.len(), "parsed N-Triples");
    Ok(statements)
}

fn syntax(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Syntax {
        line,
        message: message.into(),
    }
}

fn statement(triple: Triple, line: usize) -> Result<Statement, LoadError> {
    let subject = match triple.subject {
        Subject::NamedNode(node) => entity(node),
        other => return Err(syntax(line, format!("unsupported subject {other}"))),
    };
    Ok(Statement {
        subject,
        predicate: entity(triple.predicate),
        object: object(triple.object, line)?,
    })
}

/// A subject or predicate; compact references are expanded.
fn entity(node: NamedNode) -> NamedEntity {
    let iri = node.into_string();
    let expanded = compact_parts(&iri)
        .and_then(|(prefix, local)| namespace_for_prefix(prefix).map(|ns| format!("{ns}{local}")));
    NamedEntity::new(expanded.unwrap_or(iri))
}

fn object(term: RdfTerm, line: usize) -> Result<Term, LoadError> {
    match term {
        RdfTerm::NamedNode(node) => {
            let iri = node.into_string();
            Ok(match compact_parts(&iri) {
                Some((prefix, local)) => Term::compact(prefix, local),
                None => Term::entity(iri),
            })
        }
        RdfTerm::Literal(literal) => Ok(literal_term(literal)),
        other => Err(syntax(line, format!("unsupported object {other}"))),
    }
}

fn literal_term(literal: Literal) -> Term {
    let language = literal.language().map(str::to_string);
    Term::StringLiteral {
        value: literal.value().to_string(),
        language,
    }
}

/// Splits `prefix:local` when `prefix` is a known vocabulary prefix.
fn compact_parts(iri: &str) -> Option<(&str, &str)> {
    let (prefix, local) = iri.split_once(':')?;
    if local.starts_with("//") || namespace_for_prefix(prefix).is_none() {
        return None;
    }
    Some((prefix, local))
}
