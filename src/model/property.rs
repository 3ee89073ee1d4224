//! Resolves the property shapes attached to a structural class.
//!
//! The value type of a property is taken from the first source that applies:
//!
//! 1. `sh:class` on the shape (must name a known enumeration or class)
//! 2. `sh:datatype` on the shape, together with `sh:pattern`
//! 3. `rdfs:range` on the property itself (unknown ranges are datatypes)

use super::classify::Classification;
use super::names::{NameResolver, remove_common_prefix};
use super::text_or_empty;
use super::types::{Property, PropertyRange};
use crate::error::{ModelError, ModelResult};
use crate::ontology::vocab::{
    RDFS_COMMENT, RDFS_RANGE, SH_CLASS, SH_DATATYPE, SH_MAX_COUNT, SH_MIN_COUNT, SH_NAME,
    SH_PATH, SH_PATTERN, SH_PROPERTY,
};
use crate::ontology::{Node, TripleSource};

pub struct PropertyResolver<'a, 'c> {
    graph: &'a dyn TripleSource,
    kinds: &'a Classification,
    names: &'a mut NameResolver<'c>,
}

impl<'a, 'c> PropertyResolver<'a, 'c> {
    pub fn new(
        graph: &'a dyn TripleSource,
        kinds: &'a Classification,
        names: &'a mut NameResolver<'c>,
    ) -> Self {
        Self { graph, kinds, names }
    }

    /// All properties declared on `class_id`, ascending by path.
    pub fn resolve_all(&mut self, class_id: &str) -> ModelResult<Vec<Property>> {
        let class = Node::iri(class_id);
        let mut properties = Vec::new();

        for shape in self.graph.objects(&class, SH_PROPERTY)? {
            properties.push(self.resolve(class_id, &shape)?);
        }

        properties.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.name.cmp(&b.name)));
        Ok(properties)
    }

    pub fn resolve(&mut self, class_id: &str, shape: &Node) -> ModelResult<Property> {
        let path = match self.graph.value(shape, SH_PATH)? {
            Some(Node::Iri(path)) => path,
            _ => {
                return Err(ModelError::MissingPropertyPath {
                    class: class_id.to_string(),
                    shape: shape.to_string(),
                });
            }
        };
        let path_node = Node::iri(path.as_str());

        let name = match self.graph.value(shape, SH_NAME)? {
            Some(name) => name.lexical().to_string(),
            None => {
                let fallback = remove_common_prefix(&path, &[class_id]);
                self.names.compact_or(&path, fallback)
            }
        };

        let range = self.resolve_range(class_id, shape, &path, &path_node)?;
        tracing::debug!(class = %class_id, property = %path, range = ?range, "resolved property");

        Ok(Property {
            comment: text_or_empty(self.graph, &path_node, RDFS_COMMENT)?,
            min_count: self.count(class_id, shape, &path, SH_MIN_COUNT)?,
            max_count: self.count(class_id, shape, &path, SH_MAX_COUNT)?,
            path,
            name,
            range,
        })
    }

    fn resolve_range(
        &self,
        class_id: &str,
        shape: &Node,
        path: &str,
        path_node: &Node,
    ) -> ModelResult<PropertyRange> {
        if let Some(target) = self.graph.value(shape, SH_CLASS)? {
            let target = target.lexical();
            return self
                .reference(target)
                .ok_or_else(|| ModelError::UnknownRangeRestriction {
                    class: class_id.to_string(),
                    property: path.to_string(),
                    target: target.to_string(),
                });
        }

        if let Some(datatype) = self.graph.value(shape, SH_DATATYPE)? {
            let pattern = self
                .graph
                .value(shape, SH_PATTERN)?
                .map(|pattern| pattern.lexical().to_string());
            return Ok(PropertyRange::Datatype {
                datatype: datatype.lexical().to_string(),
                pattern,
            });
        }

        if let Some(range) = self.graph.value(path_node, RDFS_RANGE)? {
            let range = range.lexical();
            return Ok(self.reference(range).unwrap_or_else(|| PropertyRange::Datatype {
                datatype: range.to_string(),
                pattern: None,
            }));
        }

        Err(ModelError::MissingPropertyRange {
            class: class_id.to_string(),
            property: path.to_string(),
        })
    }

    fn reference(&self, id: &str) -> Option<PropertyRange> {
        if self.kinds.is_enum(id) {
            Some(PropertyRange::EnumRef {
                enum_id: id.to_string(),
            })
        } else if self.kinds.is_class(id) {
            Some(PropertyRange::ClassRef {
                class_id: id.to_string(),
            })
        } else {
            None
        }
    }

    fn count(
        &self,
        class_id: &str,
        shape: &Node,
        path: &str,
        predicate: &str,
    ) -> ModelResult<Option<u64>> {
        let Some(value) = self.graph.value(shape, predicate)? else {
            return Ok(None);
        };
        value
            .lexical()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ModelError::InvalidCardinality {
                class: class_id.to_string(),
                property: path.to_string(),
                predicate: predicate.to_string(),
                value: value.lexical().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classify::classify;
    use crate::ontology::{NamespaceContext, load_turtle};
    use assert_matches::assert_matches;
    use oxigraph::store::Store;

    const PREFIXES: &str = r#"
        @prefix ex: <http://example.org/> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        ex:Color a owl:Class .
        ex:red a owl:NamedIndividual, ex:Color .
        ex:Other a owl:Class .
    "#;

    fn store(body: &str) -> Store {
        load_turtle(&format!("{}\n{}", PREFIXES, body)).unwrap()
    }

    fn resolve(store: &Store, context: &NamespaceContext) -> ModelResult<Vec<Property>> {
        let mut names = NameResolver::new(context);
        let kinds = classify(store, &mut names)?;
        PropertyResolver::new(store, &kinds, &mut names).resolve_all("http://example.org/Thing")
    }

    fn resolve_one(body: &str) -> ModelResult<Property> {
        let store = store(body);
        let properties = resolve(&store, &NamespaceContext::new())?;
        assert_eq!(properties.len(), 1);
        Ok(properties.into_iter().next().unwrap())
    }

    #[test]
    fn test_datatype_restriction() {
        let property = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:name ; sh:datatype xsd:string ] .
            "#,
        )
        .unwrap();

        assert_eq!(
            property.range,
            PropertyRange::Datatype {
                datatype: "http://www.w3.org/2001/XMLSchema#string".into(),
                pattern: None,
            }
        );
        assert_eq!(property.min_count, None);
        assert_eq!(property.max_count, None);
    }

    #[test]
    fn test_datatype_with_pattern_and_counts() {
        let property = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [
                    sh:path ex:code ;
                    sh:datatype xsd:string ;
                    sh:pattern "^[A-Z]+$" ;
                    sh:minCount 0 ;
                    sh:maxCount 1
                ] .
            "#,
        )
        .unwrap();

        assert_eq!(
            property.range,
            PropertyRange::Datatype {
                datatype: "http://www.w3.org/2001/XMLSchema#string".into(),
                pattern: Some("^[A-Z]+$".into()),
            }
        );
        assert_eq!(property.min_count, Some(0));
        assert_eq!(property.max_count, Some(1));
    }

    #[test]
    fn test_class_restriction_wins_over_datatype() {
        let property = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:color ; sh:class ex:Color ; sh:datatype xsd:string ] .
            "#,
        )
        .unwrap();

        assert_eq!(
            property.range,
            PropertyRange::EnumRef {
                enum_id: "http://example.org/Color".into()
            }
        );
    }

    #[test]
    fn test_class_restriction_to_structural_class() {
        let property = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:other ; sh:class ex:Other ] .
            "#,
        )
        .unwrap();

        assert_eq!(property.range.class_id(), Some("http://example.org/Other"));
    }

    #[test]
    fn test_unknown_class_restriction() {
        let err = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:other ; sh:class ex:Nowhere ] .
            "#,
        )
        .unwrap_err();

        assert_matches!(
            err,
            ModelError::UnknownRangeRestriction { target, .. } if target == "http://example.org/Nowhere"
        );
    }

    #[test]
    fn test_declared_range_fallbacks() {
        let store = store(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:a ], [ sh:path ex:b ], [ sh:path ex:c ] .
            ex:a rdfs:range ex:Color .
            ex:b rdfs:range ex:Other .
            ex:c rdfs:range xsd:dateTime ; rdfs:comment "When" .
            "#,
        );
        let properties = resolve(&store, &NamespaceContext::new()).unwrap();

        assert_eq!(properties.len(), 3);
        assert_eq!(properties[0].range.enum_id(), Some("http://example.org/Color"));
        assert_eq!(properties[1].range.class_id(), Some("http://example.org/Other"));
        assert_eq!(
            properties[2].range,
            PropertyRange::Datatype {
                datatype: "http://www.w3.org/2001/XMLSchema#dateTime".into(),
                pattern: None,
            }
        );
        assert_eq!(properties[2].comment, "When");
    }

    #[test]
    fn test_shape_restrictions_win_over_declared_range() {
        let store = store(
            r#"
            ex:Thing a owl:Class ;
                sh:property
                    [ sh:path ex:p ; sh:datatype xsd:string ],
                    [ sh:path ex:q ; sh:class ex:Other ],
                    [ sh:path ex:r ; sh:pattern "^[a-z]+$" ] .
            ex:p rdfs:range ex:Color .
            ex:q rdfs:range ex:Color .
            ex:r rdfs:range xsd:token .
            "#,
        );
        let properties = resolve(&store, &NamespaceContext::new()).unwrap();

        assert_eq!(properties.len(), 3);
        assert_eq!(
            properties[0].range,
            PropertyRange::Datatype {
                datatype: "http://www.w3.org/2001/XMLSchema#string".into(),
                pattern: None,
            }
        );
        assert_eq!(
            properties[1].range,
            PropertyRange::ClassRef {
                class_id: "http://example.org/Other".into()
            }
        );
        // sh:pattern only applies together with sh:datatype
        assert_eq!(
            properties[2].range,
            PropertyRange::Datatype {
                datatype: "http://www.w3.org/2001/XMLSchema#token".into(),
                pattern: None,
            }
        );
    }

    #[test]
    fn test_missing_range() {
        let err = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:orphan ] .
            "#,
        )
        .unwrap_err();

        assert_matches!(err, ModelError::MissingPropertyRange { property, .. } if property == "http://example.org/orphan");
    }

    #[test]
    fn test_missing_path() {
        let err = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:datatype xsd:string ] .
            "#,
        )
        .unwrap_err();

        assert_matches!(err, ModelError::MissingPropertyPath { .. });
    }

    #[test]
    fn test_invalid_cardinality() {
        let err = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:n ; sh:datatype xsd:string ; sh:maxCount "many" ] .
            "#,
        )
        .unwrap_err();

        assert_matches!(err, ModelError::InvalidCardinality { value, .. } if value == "many");
    }

    #[test]
    fn test_padded_cardinality_is_invalid() {
        let err = resolve_one(
            r#"
            ex:Thing a owl:Class ;
                sh:property [ sh:path ex:n ; sh:datatype xsd:string ; sh:minCount " 1 " ] .
            "#,
        )
        .unwrap_err();

        assert_matches!(
            err,
            ModelError::InvalidCardinality { predicate, value, .. }
                if predicate == "http://www.w3.org/ns/shacl#minCount" && value == " 1 "
        );
    }

    #[test]
    fn test_names() {
        let store = store(
            r#"
            ex:Thing a owl:Class ;
                sh:property
                    [ sh:path ex:explicit ; sh:name "given" ; sh:datatype xsd:string ],
                    [ sh:path ex:compacted ; sh:datatype xsd:string ],
                    [ sh:path <urn:other:thingSize> ; sh:datatype xsd:string ] .
            "#,
        );

        let mut context = NamespaceContext::new();
        context.register("ex", "http://example.org/").unwrap();
        let properties = resolve(&store, &context).unwrap();

        let names: Vec<_> = properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ex:compacted", "given", "urn:other:thingSize"]);

        // without prefixes the fallback strips what the path shares with the class id
        let bare = resolve(&store, &NamespaceContext::new()).unwrap();
        let names: Vec<_> = bare.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["compacted", "given", "urn:other:thingSize"]);
    }
}
