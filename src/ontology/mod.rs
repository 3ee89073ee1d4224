//! Ontology graph access
//!
//! - **graph** - triple-pattern queries over an oxigraph store ([`TripleSource`])
//! - **context** - namespace compaction of absolute identifiers ([`Context`])
//! - **vocab** - the RDF, RDFS, OWL and SHACL terms the model builder reads
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ontology_ir::ontology::{load_store_from_path, NamespaceContext};
//!
//! let store = load_store_from_path(Path::new("model.ttl"))?;
//! let mut context = NamespaceContext::with_common_prefixes();
//! context.register("ex", "http://example.org/")?;
//! ```

pub mod context;
pub mod graph;
pub mod vocab;

pub use context::{Context, ContextError, IdentityContext, NamespaceContext};
pub use graph::{GraphError, Node, TripleSource, load_store, load_store_from_path, load_turtle};
pub use vocab::MetadataVocab;
