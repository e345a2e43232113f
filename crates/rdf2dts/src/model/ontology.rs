//! RDF vocabulary constants consumed by the compiler.
//!
//! - `rdf:` / `rdfs:` -- W3C core vocabulary
//! - `schema:` -- schema.org, published under both `http:` and `https:`

/// Standard RDF/RDFS namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
}

/// schema.org vocabulary (`schema:` prefix).
///
/// Terms are stored as local names; the namespace is either
/// [`HTTP_NS`](schema::HTTP_NS) or [`HTTPS_NS`](schema::HTTPS_NS) depending on
/// which serialization of the ontology is being compiled.
pub mod schema {
    pub const PREFIX: &str = "schema";
    pub const HTTP_NS: &str = "http://schema.org/";
    pub const HTTPS_NS: &str = "https://schema.org/";

    // Classes
    pub const DATA_TYPE: &str = "DataType";
    pub const ROLE: &str = "Role";
    pub const THING: &str = "Thing";

    // Builtin data types
    pub const TEXT: &str = "Text";
    pub const NUMBER: &str = "Number";
    pub const BOOLEAN: &str = "Boolean";
    pub const DATE: &str = "Date";
    pub const DATE_TIME: &str = "DateTime";
    pub const TIME: &str = "Time";

    // Predicates
    pub const DOMAIN_INCLUDES: &str = "domainIncludes";
    pub const RANGE_INCLUDES: &str = "rangeIncludes";
    pub const SUPERSEDED_BY: &str = "supersededBy";

    /// Returns the local name if `iri` is a schema.org term under either scheme.
    pub fn local(iri: &str) -> Option<&str> {
        iri.strip_prefix(HTTPS_NS)
            .or_else(|| iri.strip_prefix(HTTP_NS))
    }

    /// True if `iri` names the schema.org term `name` under either scheme.
    pub fn is(iri: &str, name: &str) -> bool {
        local(iri) == Some(name)
    }
}

/// Prefixes recognised in compact (`prefix:local`) references.
pub const KNOWN_PREFIXES: &[(&str, &str)] = &[
    ("rdf", standard::RDF),
    ("rdfs", standard::RDFS),
    ("owl", standard::OWL),
    ("xsd", standard::XSD),
    (schema::PREFIX, schema::HTTPS_NS),
];

/// Look up the namespace IRI registered for a compact prefix.
pub fn namespace_for_prefix(prefix: &str) -> Option<&'static str> {
    KNOWN_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, ns)| *ns)
}
