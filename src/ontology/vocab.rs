//! Predicate and class IRIs read while building the model.

// =============================================================================
// Namespace Constants
// =============================================================================

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const SH_NS: &str = "http://www.w3.org/ns/shacl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// Default namespace of the class-level metadata predicates.
pub const DEFAULT_METADATA_NS: &str = "https://rdf.spdx.org/ns/schema#";

// =============================================================================
// Terms
// =============================================================================

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";

pub const SH_PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
pub const SH_PATH: &str = "http://www.w3.org/ns/shacl#path";
pub const SH_NAME: &str = "http://www.w3.org/ns/shacl#name";
pub const SH_CLASS: &str = "http://www.w3.org/ns/shacl#class";
pub const SH_DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
pub const SH_PATTERN: &str = "http://www.w3.org/ns/shacl#pattern";
pub const SH_MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
pub const SH_MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";

/// The two private metadata predicates, resolved against a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataVocab {
    pub referenceable: String,
    pub id_property_name: String,
}

impl MetadataVocab {
    pub fn new(namespace: &str) -> Self {
        Self {
            referenceable: format!("{}referenceable", namespace),
            id_property_name: format!("{}idPropertyName", namespace),
        }
    }
}

impl Default for MetadataVocab {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_NS)
    }
}
