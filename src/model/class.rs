//! Structural class records and their derived-class backlinks.

use super::classify::Classification;
use super::names::NameResolver;
use super::property::PropertyResolver;
use super::text_or_empty;
use super::types::{Class, Refable};
use crate::error::{ModelError, ModelResult};
use crate::ontology::vocab::{MetadataVocab, RDFS_COMMENT, RDFS_SUB_CLASS_OF};
use crate::ontology::{Node, TripleSource};
use std::collections::HashMap;

/// Builds one [`Class`] per structural class id, ascending by id.
pub fn build_classes(
    graph: &dyn TripleSource,
    names: &mut NameResolver<'_>,
    kinds: &Classification,
    vocab: &MetadataVocab,
) -> ModelResult<Vec<Class>> {
    kinds
        .class_ids
        .iter()
        .map(|class_id| build_class(graph, names, kinds, vocab, class_id))
        .collect()
}

pub fn build_class(
    graph: &dyn TripleSource,
    names: &mut NameResolver<'_>,
    kinds: &Classification,
    vocab: &MetadataVocab,
    class_id: &str,
) -> ModelResult<Class> {
    let class = Node::iri(class_id);

    let refable = match graph.value(&class, &vocab.referenceable)? {
        Some(value) => value
            .lexical()
            .parse::<Refable>()
            .map_err(|err| err.for_class(class_id))?,
        None => Refable::default(),
    };
    let id_property = graph
        .value(&class, &vocab.id_property_name)?
        .map(|value| value.lexical().to_string());

    let parent_ids = parent_ids(graph, kinds, &class, class_id)?;
    let properties = PropertyResolver::new(graph, kinds, names).resolve_all(class_id)?;

    Ok(Class {
        id: class_id.to_string(),
        class_name: names.class_name(class_id),
        parent_ids,
        derived_ids: Vec::new(),
        properties,
        comment: text_or_empty(graph, &class, RDFS_COMMENT)?,
        id_property,
        refable,
    })
}

/// Declared superclasses that are themselves structural classes. Enumerations
/// and undeclared superclasses are dropped.
fn parent_ids(
    graph: &dyn TripleSource,
    kinds: &Classification,
    class: &Node,
    class_id: &str,
) -> ModelResult<Vec<String>> {
    let mut parents = Vec::new();
    for parent in graph.objects(class, RDFS_SUB_CLASS_OF)? {
        let Some(parent_id) = parent.as_iri() else {
            continue;
        };
        if !kinds.is_class(parent_id) {
            tracing::debug!(class = %class_id, parent = %parent_id, "ignoring non-structural superclass");
            continue;
        }
        if parent_id == class_id {
            return Err(ModelError::CyclicClassHierarchy {
                cycle: vec![class_id.to_string(), class_id.to_string()],
            });
        }
        parents.push(parent_id.to_string());
    }
    parents.sort();
    parents.dedup();
    Ok(parents)
}

/// Fill every class's `derived_ids` from the other classes' `parent_ids`.
pub fn link_derived(classes: &mut [Class]) {
    let index: HashMap<String, usize> = classes
        .iter()
        .enumerate()
        .map(|(idx, class)| (class.id.clone(), idx))
        .collect();

    let edges: Vec<(usize, String)> = classes
        .iter()
        .flat_map(|child| {
            child
                .parent_ids
                .iter()
                .filter_map(|parent| index.get(parent).map(|&idx| (idx, child.id.clone())))
        })
        .collect();

    for class in classes.iter_mut() {
        class.derived_ids.clear();
    }
    for (parent_idx, child_id) in edges {
        classes[parent_idx].derived_ids.push(child_id);
    }
    for class in classes.iter_mut() {
        class.derived_ids.sort();
        class.derived_ids.dedup();
    }
}
