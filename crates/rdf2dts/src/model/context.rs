//! Naming contexts: mapping entity IRIs to scoped short names.
//!
//! A context is an ordered list of `(prefix, base URL)` entries. The empty
//! prefix is the unscoped default and may only appear alone:
//!
//! - `https://schema.org` -- `Thing`
//! - `schema:https://schema.org/,rdfs:http://www.w3.org/2000/01/rdf-schema#` -- `schema:Thing`

use serde_json::{Map, Value};

use crate::error::CompileError;

use super::iri;
use super::term::NamedEntity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub prefix: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamingContext {
    entries: Vec<ContextEntry>,
}

impl NamingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with a single unscoped default entry.
    pub fn with_default(url: &str) -> Self {
        let mut context = Self::new();
        context.set_default(url);
        context
    }

    pub fn set_default(&mut self, url: &str) {
        self.add_named("", url);
    }

    pub fn add_named(&mut self, prefix: &str, url: &str) {
        self.entries.push(ContextEntry {
            prefix: prefix.to_string(),
            url: url.to_string(),
        });
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    /// Parse `url` or `prefix:url,prefix:url,...`.
    ///
    /// An entry is named when the text after its first `:` is itself a URL
    /// (`schema:https://...`). The result is validated.
    pub fn parse(text: &str) -> Result<Self, CompileError> {
        let mut context = Self::new();
        let raw: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty())
            .collect();

        for entry in &raw {
            match entry.split_once(':') {
                Some((prefix, url)) if url.contains("://") => {
                    if !is_valid_prefix(prefix) {
                        return Err(CompileError::InvalidContext(format!(
                            "invalid prefix {prefix:?} in entry {entry:?}"
                        )));
                    }
                    context.add_named(prefix, url);
                }
                _ => context.set_default(entry),
            }
        }

        context.validate()?;
        Ok(context)
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        if self.entries.is_empty() {
            return Err(CompileError::InvalidContext(
                "context must have at least one entry".to_string(),
            ));
        }
        for entry in &self.entries {
            if iri::parse_base(&entry.url).is_none() {
                return Err(CompileError::InvalidContext(format!(
                    "{:?} is not an absolute URL",
                    entry.url
                )));
            }
        }
        if self.entries.len() > 1 {
            for (i, entry) in self.entries.iter().enumerate() {
                if entry.prefix.is_empty() {
                    return Err(CompileError::InvalidContext(
                        "a default (unprefixed) entry cannot be combined with other entries"
                            .to_string(),
                    ));
                }
                if self.entries[..i].iter().any(|e| e.prefix == entry.prefix) {
                    return Err(CompileError::InvalidContext(format!(
                        "duplicate prefix {:?}",
                        entry.prefix
                    )));
                }
            }
        }
        Ok(())
    }

    /// Short name of `entity` under this context, or its full IRI.
    pub fn scoped_name(&self, entity: &NamedEntity) -> String {
        let Some(parts) = iri::split(entity.iri()) else {
            return entity.iri().to_string();
        };
        if parts.local_name.is_empty() {
            return entity.iri().to_string();
        }
        for entry in &self.entries {
            let Some(base) = iri::parse_base(&entry.url) else {
                continue;
            };
            if parts.same_namespace(&base) {
                let local = iri::decode(parts.local_name);
                return if entry.prefix.is_empty() {
                    local
                } else {
                    format!("{}:{local}", entry.prefix)
                };
            }
        }
        entity.iri().to_string()
    }

    /// The JSON-LD `@context` value for this context.
    pub fn context_value(&self) -> Value {
        match self.entries.as_slice() {
            [single] if single.prefix.is_empty() => Value::String(single.url.clone()),
            entries => {
                let mut map = Map::new();
                for entry in entries {
                    map.insert(entry.prefix.clone(), Value::String(entry.url.clone()));
                }
                Value::Object(map)
            }
        }
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
