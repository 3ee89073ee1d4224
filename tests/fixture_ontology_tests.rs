//! Builds the model of the bundled core ontology fixture.

use anyhow::Result;
use ontology_ir::model::{Model, PropertyRange, Refable};
use ontology_ir::ontology::{Context, NamespaceContext, load_store_from_path};
use ontology_ir::{CliArgs, GeneratorConfig, generate};
use std::path::PathBuf;

const CORE: &str = "https://example.org/model/Core/";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/ontology")
        .join(name)
}

fn core(local: &str) -> String {
    format!("{CORE}{local}")
}

fn core_model() -> Result<Model> {
    let config = GeneratorConfig::from_args(CliArgs {
        input: Some(fixture("core.ttl")),
        context: Some(fixture("context.jsonld")),
        ..CliArgs::default()
    })?;
    generate(&config)
}

#[test]
fn test_fixture_class_order() -> Result<()> {
    let model = core_model()?;

    let order: Vec<_> = model.classes().iter().map(|c| c.class_name.as_str()).collect();
    assert_eq!(
        order,
        vec!["core_Element", "core_Hash", "core_Artifact", "core_Package"]
    );

    let element = model.class_by_id(&core("Element")).unwrap();
    assert_eq!(element.derived_ids, vec![core("Artifact")]);
    let package = model.class_by_id(&core("Package")).unwrap();
    assert_eq!(package.parent_ids, vec![core("Artifact")]);
    Ok(())
}

#[test]
fn test_fixture_enumeration() -> Result<()> {
    let model = core_model()?;
    assert_eq!(model.enums().len(), 1);

    let algorithm = &model.enums()[0];
    assert_eq!(algorithm.class_name, "core_HashAlgorithm");
    assert!(algorithm.comment.starts_with("A mathematical algorithm"));

    let values: Vec<_> = algorithm
        .values
        .iter()
        .map(|v| (v.name.as_str(), v.comment.is_empty()))
        .collect();
    assert_eq!(values, vec![("md5", true), ("/sha256", false)]);
    Ok(())
}

#[test]
fn test_fixture_metadata_and_properties() -> Result<()> {
    let model = core_model()?;

    let element = model.class_by_id(&core("Element")).unwrap();
    assert_eq!(element.refable, Refable::Always);
    assert_eq!(element.id_property.as_deref(), Some("spdxId"));
    assert_eq!(element.properties[0].name, "core:name");
    assert_eq!(element.properties[0].comment, "Identifies the name of an element.");
    assert_eq!(element.properties[0].max_count, Some(1));

    let hash = model.class_by_id(&core("Hash")).unwrap();
    assert_eq!(hash.refable, Refable::No);
    assert_eq!(hash.properties.len(), 2);
    assert_eq!(
        hash.properties[0].range,
        PropertyRange::EnumRef {
            enum_id: core("HashAlgorithm")
        }
    );
    assert_eq!(
        hash.properties[1].range,
        PropertyRange::Datatype {
            datatype: "http://www.w3.org/2001/XMLSchema#string".to_string(),
            pattern: Some("^[0-9a-f]+$".to_string()),
        }
    );

    let artifact = model.class_by_id(&core("Artifact")).unwrap();
    assert_eq!(artifact.refable, Refable::Optional);
    assert_eq!(artifact.properties[0].range.class_id(), Some(core("Hash").as_str()));

    let package = model.class_by_id(&core("Package")).unwrap();
    assert_eq!(
        package.properties[0].range.datatype(),
        Some("http://www.w3.org/2001/XMLSchema#anyURI")
    );
    Ok(())
}

#[test]
fn test_fixture_context_document() -> Result<()> {
    let contents = std::fs::read_to_string(fixture("context.jsonld"))?;
    let context = NamespaceContext::from_jsonld(&serde_json::from_str(&contents)?)?;
    assert_eq!(context.compact(&core("Element")), "core:Element");

    let store = load_store_from_path(&fixture("core.ttl"))?;
    let model = Model::build(&store, &context)?;
    assert_eq!(model.classes().len(), 4);
    Ok(())
}
