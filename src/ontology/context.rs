//! Namespace compaction contexts.
//!
//! A [`Context`] maps a long absolute identifier to the short prefixed form
//! used for display and for deriving code identifiers. The model builder
//! memoizes compactions itself, so implementations only need to be pure.

use crate::ontology::vocab::{OWL_NS, RDF_NS, RDFS_NS, SH_NS, XSD_NS};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("prefix '{prefix}' is already bound to <{existing}>, cannot rebind to <{requested}>")]
    PrefixCollision {
        prefix: String,
        existing: String,
        requested: String,
    },

    #[error("invalid JSON-LD context: {0}")]
    InvalidDocument(String),
}

/// Compacts absolute identifiers. Must be deterministic and side-effect free.
pub trait Context {
    fn compact(&self, iri: &str) -> String;
}

/// Context that leaves every identifier as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityContext;

impl Context for IdentityContext {
    fn compact(&self, iri: &str) -> String {
        iri.to_string()
    }
}

// =============================================================================
// NamespaceContext
// =============================================================================

/// Prefix-based compaction with an optional default vocabulary.
///
/// When several namespaces match, the longest one wins, so nested namespaces
/// compact the same way regardless of registration order.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    namespaces: IndexMap<String, String>,
    vocab: Option<String>,
}

impl NamespaceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context preloaded with the rdf, rdfs, owl, sh and xsd prefixes.
    pub fn with_common_prefixes() -> Self {
        let mut context = Self::new();
        for (prefix, iri) in [
            ("rdf", RDF_NS),
            ("rdfs", RDFS_NS),
            ("owl", OWL_NS),
            ("sh", SH_NS),
            ("xsd", XSD_NS),
        ] {
            context.namespaces.insert(prefix.to_string(), iri.to_string());
        }
        context
    }

    pub fn register(&mut self, prefix: &str, iri: &str) -> Result<(), ContextError> {
        if let Some(existing) = self.namespaces.get(prefix) {
            if existing != iri {
                return Err(ContextError::PrefixCollision {
                    prefix: prefix.to_string(),
                    existing: existing.clone(),
                    requested: iri.to_string(),
                });
            }
        }
        self.namespaces.insert(prefix.to_string(), iri.to_string());
        Ok(())
    }

    pub fn set_vocab(&mut self, iri: &str) {
        self.vocab = Some(iri.to_string());
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    pub fn vocab(&self) -> Option<&str> {
        self.vocab.as_deref()
    }

    /// Register every prefix of `other`, keeping its vocabulary if it has one.
    pub fn merge(&mut self, other: &NamespaceContext) -> Result<(), ContextError> {
        for (prefix, iri) in &other.namespaces {
            self.register(prefix, iri)?;
        }
        if let Some(vocab) = other.vocab.as_deref() {
            self.set_vocab(vocab);
        }
        Ok(())
    }

    /// Read the `@context` of a JSON-LD document.
    ///
    /// String-valued terms are taken as prefixes and `@vocab` as the default
    /// vocabulary. Term definitions given as objects are not namespaces and are
    /// skipped. An array of contexts is applied in order.
    pub fn from_jsonld(document: &JsonValue) -> Result<Self, ContextError> {
        let mut context = Self::new();
        let root = document.get("@context").unwrap_or(document);
        context.merge_jsonld(root)?;
        Ok(context)
    }

    fn merge_jsonld(&mut self, value: &JsonValue) -> Result<(), ContextError> {
        match value {
            JsonValue::Array(items) => {
                for item in items {
                    self.merge_jsonld(item)?;
                }
                Ok(())
            }
            JsonValue::Object(terms) => {
                for (term, definition) in terms {
                    match (term.as_str(), definition) {
                        ("@vocab", JsonValue::String(iri)) => self.set_vocab(iri),
                        (term, _) if term.starts_with('@') => {}
                        // keyword aliases such as "id": "@id"
                        (_, JsonValue::String(iri)) if iri.starts_with('@') => {}
                        (term, JsonValue::String(iri)) => self.register(term, iri)?,
                        _ => {}
                    }
                }
                Ok(())
            }
            // remote context references cannot be followed here
            JsonValue::String(_) | JsonValue::Null => Ok(()),
            other => Err(ContextError::InvalidDocument(format!(
                "expected an object or array, found {}",
                other
            ))),
        }
    }
}

impl Context for NamespaceContext {
    fn compact(&self, iri: &str) -> String {
        let best = self
            .namespaces
            .iter()
            .filter(|(_, ns)| !ns.is_empty() && iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len());

        if let Some((prefix, ns)) = best {
            return format!("{}:{}", prefix, &iri[ns.len()..]);
        }

        if let Some(vocab) = &self.vocab {
            if !vocab.is_empty() && iri.starts_with(vocab.as_str()) && iri.len() > vocab.len() {
                return iri[vocab.len()..].to_string();
            }
        }

        iri.to_string()
    }
}
