//! Triple-pattern access to an immutable ontology graph.
//!
//! Model construction only ever asks three kinds of question of the graph:
//! who has `(predicate, object)`, what does a subject point to through a
//! predicate, and is a given triple asserted. [`TripleSource`] is that seam;
//! the oxigraph [`Store`] implementation reads the default graph.
//!
//! ```rust,ignore
//! use ontology_ir::ontology::graph::{load_turtle, Node, TripleSource};
//!
//! let store = load_turtle("@prefix : <http://ex/> . :a :p :b .")?;
//! let objects = store.objects(&Node::iri("http://ex/a"), "http://ex/p")?;
//! assert_eq!(objects, vec![Node::iri("http://ex/b")]);
//! ```

use oxigraph::io::RdfFormat;
use oxigraph::model::{BlankNodeRef, GraphNameRef, NamedNodeRef, Quad, Term};
use oxigraph::store::{LoaderError, StorageError, Store};
use std::fmt;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("graph storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to parse graph: {0}")]
    Load(#[from] LoaderError),

    #[error("failed to read graph file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Node
// =============================================================================

/// A graph term as seen by the model builder.
///
/// Literals keep their lexical form only; every value the builder reads from
/// a literal (labels, names, counts, patterns) is interpreted from that form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    Iri(String),
    Blank(String),
    Literal(String),
}

impl Node {
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// IRI, blank node id or literal value, without any decoration.
    pub fn lexical(&self) -> &str {
        match self {
            Node::Iri(value) | Node::Blank(value) | Node::Literal(value) => value,
        }
    }

    fn from_term(term: Term) -> Option<Self> {
        #[allow(unreachable_patterns)]
        match term {
            Term::NamedNode(node) => Some(Node::Iri(node.into_string())),
            Term::BlankNode(node) => Some(Node::Blank(node.as_str().to_owned())),
            Term::Literal(literal) => Some(Node::Literal(literal.value().to_owned())),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Blank(id) => write!(f, "_:{}", id),
            other => f.write_str(other.lexical()),
        }
    }
}

// =============================================================================
// TripleSource
// =============================================================================

/// Read-only triple-pattern queries. Results are sorted and deduplicated.
pub trait TripleSource {
    /// Every `s` such that `(s, predicate, object)` is asserted.
    fn subjects(&self, predicate: &str, object: &Node) -> Result<Vec<Node>, GraphError>;

    /// Every `o` such that `(subject, predicate, o)` is asserted.
    fn objects(&self, subject: &Node, predicate: &str) -> Result<Vec<Node>, GraphError>;

    /// Whether `(subject, predicate, object)` is asserted.
    fn asserts(&self, subject: &Node, predicate: &str, object: &Node) -> Result<bool, GraphError> {
        Ok(self.objects(subject, predicate)?.contains(object))
    }

    /// A single object for `(subject, predicate)`, the smallest one when the
    /// graph asserts several.
    fn value(&self, subject: &Node, predicate: &str) -> Result<Option<Node>, GraphError> {
        Ok(self.objects(subject, predicate)?.into_iter().next())
    }
}

impl TripleSource for Store {
    fn subjects(&self, predicate: &str, object: &Node) -> Result<Vec<Node>, GraphError> {
        let predicate = NamedNodeRef::new_unchecked(predicate);
        let graph = Some(GraphNameRef::DefaultGraph);
        let quads = match object {
            Node::Iri(iri) => self.quads_for_pattern(
                None,
                Some(predicate),
                Some(NamedNodeRef::new_unchecked(iri).into()),
                graph,
            ),
            Node::Blank(id) => self.quads_for_pattern(
                None,
                Some(predicate),
                Some(BlankNodeRef::new_unchecked(id).into()),
                graph,
            ),
            // literal datatypes are not tracked, so a literal object cannot be matched exactly
            Node::Literal(_) => return Ok(Vec::new()),
        };
        collect_nodes(quads.map(|quad| quad.map(|quad: Quad| Term::from(quad.subject))))
    }

    fn objects(&self, subject: &Node, predicate: &str) -> Result<Vec<Node>, GraphError> {
        let predicate = NamedNodeRef::new_unchecked(predicate);
        let graph = Some(GraphNameRef::DefaultGraph);
        let quads = match subject {
            Node::Iri(iri) => self.quads_for_pattern(
                Some(NamedNodeRef::new_unchecked(iri).into()),
                Some(predicate),
                None,
                graph,
            ),
            Node::Blank(id) => self.quads_for_pattern(
                Some(BlankNodeRef::new_unchecked(id).into()),
                Some(predicate),
                None,
                graph,
            ),
            Node::Literal(_) => return Ok(Vec::new()),
        };
        collect_nodes(quads.map(|quad| quad.map(|quad: Quad| quad.object)))
    }
}

fn collect_nodes(
    terms: impl Iterator<Item = Result<Term, StorageError>>,
) -> Result<Vec<Node>, GraphError> {
    let mut nodes = Vec::new();
    for term in terms {
        if let Some(node) = Node::from_term(term?) {
            nodes.push(node);
        }
    }
    nodes.sort();
    nodes.dedup();
    Ok(nodes)
}

// =============================================================================
// Loading
// =============================================================================

/// Parse `reader` into a fresh in-memory store.
pub fn load_store(reader: impl Read, format: RdfFormat) -> Result<Store, GraphError> {
    let store = Store::new()?;
    store.load_from_reader(format, reader)?;
    Ok(store)
}

pub fn load_turtle(turtle: &str) -> Result<Store, GraphError> {
    load_store(turtle.as_bytes(), RdfFormat::Turtle)
}

/// Load a graph file, picking the syntax from its extension (Turtle otherwise).
pub fn load_store_from_path(path: &Path) -> Result<Store, GraphError> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::Turtle);

    let file = std::fs::File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), format = ?format, "loading graph");
    load_store(BufReader::new(file), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: &str = r#"
        @prefix ex: <http://example.org/> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        ex:b ex:p ex:x .
        ex:a ex:p ex:x ;
            rdfs:label "Alpha" ;
            ex:shape [ ex:q "inner" ] ;
            ex:many ex:z, ex:y .
    "#;

    fn store() -> Store {
        load_turtle(TTL).unwrap()
    }

    #[test]
    fn test_subjects_are_sorted() {
        let subjects = store()
            .subjects("http://example.org/p", &Node::iri("http://example.org/x"))
            .unwrap();
        assert_eq!(
            subjects,
            vec![Node::iri("http://example.org/a"), Node::iri("http://example.org/b")]
        );
    }

    #[test]
    fn test_objects_and_value() {
        let store = store();
        let a = Node::iri("http://example.org/a");

        let many = store.objects(&a, "http://example.org/many").unwrap();
        assert_eq!(
            many,
            vec![Node::iri("http://example.org/y"), Node::iri("http://example.org/z")]
        );

        let value = store.value(&a, "http://example.org/many").unwrap();
        assert_eq!(value, Some(Node::iri("http://example.org/y")));

        let label = store
            .value(&a, "http://www.w3.org/2000/01/rdf-schema#label")
            .unwrap();
        assert_eq!(label, Some(Node::Literal("Alpha".to_string())));

        assert_eq!(store.value(&a, "http://example.org/missing").unwrap(), None);
    }

    #[test]
    fn test_blank_node_subjects_are_queryable() {
        let store = store();
        let a = Node::iri("http://example.org/a");

        let shape = store.value(&a, "http://example.org/shape").unwrap().unwrap();
        assert!(matches!(shape, Node::Blank(_)));

        let inner = store.value(&shape, "http://example.org/q").unwrap();
        assert_eq!(inner, Some(Node::Literal("inner".to_string())));
    }

    #[test]
    fn test_asserts() {
        let store = store();
        let a = Node::iri("http://example.org/a");
        assert!(
            store
                .asserts(&a, "http://example.org/p", &Node::iri("http://example.org/x"))
                .unwrap()
        );
        assert!(
            !store
                .asserts(&a, "http://example.org/p", &Node::iri("http://example.org/y"))
                .unwrap()
        );
    }

    #[test]
    fn test_invalid_turtle_is_a_load_error() {
        let err = load_turtle("this is not turtle").err().expect("expected load error");
        assert!(matches!(err, GraphError::Load(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_store_from_path(Path::new("/nonexistent/graph.ttl")).err().expect("expected io error");
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
