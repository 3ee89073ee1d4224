//! Errors raised while building the model.
//!
//! Every error is fatal: construction stops at the point of detection and no
//! partial model is returned.

use crate::ontology::GraphError;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("class {class} has unknown referenceable value '{value}'")]
    UnknownReferenceableValue { class: String, value: String },

    #[error("property {property} of class {class} has unknown class restriction {target}")]
    UnknownRangeRestriction {
        class: String,
        property: String,
        target: String,
    },

    #[error("property '{property}' of class {class} is missing range")]
    MissingPropertyRange { class: String, property: String },

    #[error("property shape {shape} of class {class} has no sh:path")]
    MissingPropertyPath { class: String, shape: String },

    #[error("property {property} of class {class} has invalid {predicate} value '{value}'")]
    InvalidCardinality {
        class: String,
        property: String,
        predicate: String,
        value: String,
    },

    #[error("cyclic class hierarchy: {}", cycle.join(" -> "))]
    CyclicClassHierarchy { cycle: Vec<String> },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ModelError {
    /// Stable identifier of the error kind, for logs and reports.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::UnknownReferenceableValue { .. } => "unknown_referenceable_value",
            ModelError::UnknownRangeRestriction { .. } => "unknown_range_restriction",
            ModelError::MissingPropertyRange { .. } => "missing_property_range",
            ModelError::MissingPropertyPath { .. } => "missing_property_path",
            ModelError::InvalidCardinality { .. } => "invalid_cardinality",
            ModelError::CyclicClassHierarchy { .. } => "cyclic_class_hierarchy",
            ModelError::Graph(_) => "graph_error",
        }
    }
}
