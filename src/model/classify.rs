//! Splits declared classes into enumerations and structural classes.
//!
//! A class is an enumeration when at least one of its instances is also
//! asserted to be an `owl:NamedIndividual`. Those individuals become the
//! enumeration's values; every other class is structural.

use super::names::{NameResolver, remove_common_prefix};
use super::text_or_empty;
use super::types::{Enum, EnumValue};
use crate::error::ModelResult;
use crate::ontology::vocab::{OWL_CLASS, OWL_NAMED_INDIVIDUAL, RDF_TYPE, RDFS_COMMENT, RDFS_LABEL};
use crate::ontology::{Node, TripleSource};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Ascending by id
    pub enums: Vec<Enum>,
    pub enum_ids: BTreeSet<String>,
    pub class_ids: BTreeSet<String>,
}

impl Classification {
    pub fn is_enum(&self, id: &str) -> bool {
        self.enum_ids.contains(id)
    }

    pub fn is_class(&self, id: &str) -> bool {
        self.class_ids.contains(id)
    }
}

pub fn classify(
    graph: &dyn TripleSource,
    names: &mut NameResolver<'_>,
) -> ModelResult<Classification> {
    let mut classification = Classification::default();
    let owl_class = Node::iri(OWL_CLASS);

    for class in graph.subjects(RDF_TYPE, &owl_class)? {
        let Node::Iri(class_id) = &class else {
            tracing::debug!(node = %class, "skipping anonymous class expression");
            continue;
        };

        let values = enum_values(graph, &class, class_id)?;
        if values.is_empty() {
            tracing::debug!(class = %class_id, "structural class");
            classification.class_ids.insert(class_id.clone());
            continue;
        }

        tracing::debug!(class = %class_id, values = values.len(), "enumeration class");
        classification.enums.push(Enum {
            id: class_id.clone(),
            class_name: names.class_name(class_id),
            values,
            comment: text_or_empty(graph, &class, RDFS_COMMENT)?,
        });
        classification.enum_ids.insert(class_id.clone());
    }

    classification.enums.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(classification)
}

fn enum_values(
    graph: &dyn TripleSource,
    class: &Node,
    class_id: &str,
) -> ModelResult<Vec<EnumValue>> {
    let named_individual = Node::iri(OWL_NAMED_INDIVIDUAL);
    let mut values = Vec::new();

    for instance in graph.subjects(RDF_TYPE, class)? {
        if !graph.asserts(&instance, RDF_TYPE, &named_individual)? {
            continue;
        }
        let Node::Iri(value_id) = &instance else {
            continue;
        };

        let name = match graph.value(&instance, RDFS_LABEL)? {
            Some(label) => label.lexical().to_string(),
            None => remove_common_prefix(value_id, &[class_id]).to_string(),
        };

        values.push(EnumValue {
            id: value_id.clone(),
            name,
            comment: text_or_empty(graph, &instance, RDFS_COMMENT)?,
        });
    }

    values.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(values)
}
