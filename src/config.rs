use crate::model::ModelOptions;
use crate::ontology::NamespaceContext;
use crate::ontology::vocab::DEFAULT_METADATA_NS;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    #[value(alias = "yml")]
    #[serde(alias = "yml")]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub metadata_namespace: String,
    /// JSON-LD context document, applied before `prefixes`
    pub context: Option<PathBuf>,
    pub prefixes: IndexMap<String, String>,
    pub vocab: Option<String>,
}

impl GeneratorConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            input: cli_input,
            context: cli_context,
            metadata_namespace: cli_metadata_namespace,
            format: cli_format,
            output: cli_output,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            input: file_input,
            prefixes,
            vocab,
            metadata_namespace: file_metadata_namespace,
            context: file_context,
            format: file_format,
        } = file_config;

        let input = cli_input
            .or(file_input)
            .context("no input ontology given (use --input or `input` in the config file)")?;
        anyhow::ensure!(input.exists(), "input ontology {:?} does not exist", input);
        anyhow::ensure!(input.is_file(), "input ontology {:?} is not a file", input);

        let metadata_namespace = cli_metadata_namespace
            .or(file_metadata_namespace)
            .unwrap_or_else(|| DEFAULT_METADATA_NS.to_string());
        anyhow::ensure!(
            metadata_namespace.ends_with('#') || metadata_namespace.ends_with('/'),
            "metadata namespace {:?} must end with '#' or '/'",
            metadata_namespace
        );

        let context = cli_context.or(file_context);
        if let Some(path) = context.as_ref() {
            anyhow::ensure!(path.is_file(), "context document {:?} is not a file", path);
        }

        for (prefix, iri) in &prefixes {
            anyhow::ensure!(!prefix.is_empty(), "empty prefix mapped to {:?}", iri);
            anyhow::ensure!(!iri.is_empty(), "prefix {:?} maps to an empty IRI", prefix);
        }

        Ok(Self {
            input,
            output: cli_output,
            format: cli_format.or(file_format).unwrap_or_default(),
            metadata_namespace,
            context,
            prefixes,
            vocab,
        })
    }

    /// Common prefixes, then the JSON-LD context, then configured prefixes
    /// and vocabulary. A prefix bound twice to different IRIs is an error.
    pub fn build_context(&self) -> Result<NamespaceContext> {
        let mut context = NamespaceContext::with_common_prefixes();

        if let Some(path) = self.context.as_ref() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read context document {:?}", path))?;
            let document: serde_json::Value = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse context document {:?}", path))?;
            let loaded = NamespaceContext::from_jsonld(&document)
                .with_context(|| format!("invalid context document {:?}", path))?;
            context
                .merge(&loaded)
                .with_context(|| format!("context document {:?} conflicts", path))?;
        }

        for (prefix, iri) in &self.prefixes {
            context
                .register(prefix, iri)
                .with_context(|| format!("configured prefix {:?} conflicts", prefix))?;
        }
        if let Some(vocab) = self.vocab.as_ref() {
            context.set_vocab(vocab);
        }

        Ok(context)
    }

    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            metadata_namespace: self.metadata_namespace.clone(),
        }
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "ontology-ir",
    about = "Build a code-generation model from an RDF ontology",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        short = 'i',
        env = "ONTOLOGY_IR_INPUT",
        value_name = "FILE",
        help = "Ontology to read (Turtle, N-Triples, RDF/XML, ...)"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        long,
        env = "ONTOLOGY_IR_CONTEXT",
        value_name = "FILE",
        help = "JSON-LD context used to compact identifiers"
    )]
    pub context: Option<PathBuf>,

    #[arg(
        long,
        env = "ONTOLOGY_IR_METADATA_NAMESPACE",
        value_name = "IRI",
        help = "Namespace of the referenceable and idPropertyName predicates"
    )]
    pub metadata_namespace: Option<String>,

    #[arg(
        long,
        env = "ONTOLOGY_IR_FORMAT",
        value_enum,
        value_name = "FORMAT",
        help = "Output format (json or yaml)"
    )]
    pub format: Option<OutputFormat>,

    #[arg(
        long,
        short = 'o',
        env = "ONTOLOGY_IR_OUTPUT",
        value_name = "FILE",
        help = "Write the model here instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    input: Option<PathBuf>,
    #[serde(default)]
    prefixes: IndexMap<String, String>,
    vocab: Option<String>,
    metadata_namespace: Option<String>,
    context: Option<PathBuf>,
    format: Option<OutputFormat>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
