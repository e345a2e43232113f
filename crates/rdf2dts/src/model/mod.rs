pub mod context;
pub mod iri;
pub mod ontology;
pub mod term;
pub mod topic;
pub mod type_ref;
pub mod vocabulary;
