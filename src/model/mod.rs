//! Code-generation model built from an ontology graph
//!
//! Construction is a single synchronous pass over an immutable graph:
//!
//! ```text
//! graph ─► classify ─┬─► enums (sorted by id)
//!                    └─► classes ─► derived links ─► dependency order
//! ```
//!
//! Any error aborts the pass; no partially built [`Model`] is ever returned.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ontology_ir::model::Model;
//! use ontology_ir::ontology::{load_turtle, NamespaceContext};
//!
//! let store = load_turtle(ttl)?;
//! let context = NamespaceContext::with_common_prefixes();
//! let model = Model::build(&store, &context)?;
//!
//! for class in model.classes() {
//!     println!("{} <- {:?}", class.class_name, class.parent_ids);
//! }
//! ```

pub mod class;
pub mod classify;
pub mod names;
pub mod order;
pub mod property;
pub mod types;

pub use classify::Classification;
pub use names::{NameResolver, common_prefix, remove_common_prefix};
pub use types::{Class, Enum, EnumValue, Property, PropertyRange, Refable};

use crate::error::ModelResult;
use crate::ontology::vocab::{DEFAULT_METADATA_NS, MetadataVocab};
use crate::ontology::{Context, Node, TripleSource};
use serde::Serialize;

/// Options that change how the graph is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOptions {
    /// Namespace of the `referenceable` and `idPropertyName` predicates
    pub metadata_namespace: String,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            metadata_namespace: DEFAULT_METADATA_NS.to_string(),
        }
    }
}

/// Ordered enumerations and classes, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model {
    enums: Vec<Enum>,
    classes: Vec<Class>,
}

impl Model {
    pub fn build(graph: &dyn TripleSource, context: &dyn Context) -> ModelResult<Self> {
        Self::build_with(graph, context, &ModelOptions::default())
    }

    pub fn build_with(
        graph: &dyn TripleSource,
        context: &dyn Context,
        options: &ModelOptions,
    ) -> ModelResult<Self> {
        let span = tracing::info_span!("build_model");
        let _enter = span.enter();

        let vocab = MetadataVocab::new(&options.metadata_namespace);
        let mut names = NameResolver::new(context);

        let kinds = classify::classify(graph, &mut names)?;
        let mut classes = class::build_classes(graph, &mut names, &kinds, &vocab)?;
        class::link_derived(&mut classes);
        let classes = order::order_classes(classes)?;

        tracing::info!(
            enums = kinds.enums.len(),
            classes = classes.len(),
            compacted_ids = names.cached_len(),
            "model constructed"
        );

        Ok(Self {
            enums: kinds.enums,
            classes,
        })
    }

    /// Enumerations, ascending by id.
    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    /// Classes in dependency order: parents precede children.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn enum_by_id(&self, id: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.id == id)
    }

    pub fn class_by_id(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }
}

/// Lexical value of `(node, predicate)`, or an empty string.
pub(crate) fn text_or_empty(
    graph: &dyn TripleSource,
    node: &Node,
    predicate: &str,
) -> ModelResult<String> {
    Ok(graph
        .value(node, predicate)?
        .map(|value| value.lexical().to_string())
        .unwrap_or_default())
}
