use clap::Parser;
use ontology_ir::{CliArgs, GeneratorConfig, LoggingConfig, init_logging, run};

fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env();
    init_logging(logging_config)?;

    let cli = CliArgs::parse();
    let config = GeneratorConfig::from_args(cli)?;

    run(config)
}
