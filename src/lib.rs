pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod ontology;

pub use config::{CliArgs, GeneratorConfig, OutputFormat};
pub use error::{ModelError, ModelResult};
pub use logging::{LoggingConfig, init_logging};
pub use model::{Model, ModelOptions};

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;

/// Load the configured ontology and build its model.
pub fn generate(config: &GeneratorConfig) -> Result<Model> {
    let context = config.build_context()?;
    let store = ontology::load_store_from_path(&config.input)?;
    let model = Model::build_with(&store, &context, &config.model_options())?;
    Ok(model)
}

pub fn render(model: &Model, format: OutputFormat) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(model).context("failed to serialize model as JSON")?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(model).context("failed to serialize model as YAML")?
        }
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Build the model and write it to the configured output, or stdout.
pub fn run(config: GeneratorConfig) -> Result<()> {
    tracing::info!(
        input = %config.input.display(),
        format = %config.format,
        "generating model"
    );

    let model = generate(&config).inspect_err(|err| {
        if let Some(model_err) = err.downcast_ref::<ModelError>() {
            tracing::error!(code = model_err.code(), error = %model_err, "model construction failed");
        }
    })?;
    let rendered = render(&model, config.format)?;

    match config.output.as_ref() {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write model to {:?}", path))?;
            tracing::info!(output = %path.display(), "model written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write model to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    Ok(())
}
