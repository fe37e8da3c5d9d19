//! Print which configuration keys are set, with secrets redacted
//!
//! Usage: `kg-config [ENV_FILE]`. Without an argument `.env` is searched for
//! in the current directory and its parents.

use std::io::{self, Write};

use kg_config::{Config, DefinitionsSource, Provider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kg_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let definitions = std::env::args_os()
        .nth(1)
        .map(DefinitionsSource::file)
        .unwrap_or_default();

    let (config, ingestion) = Config::load_reporting(&definitions);
    tracing::info!(?ingestion, "definitions file");

    for provider in Provider::ALL {
        let settings = config.llm(provider);
        tracing::info!(
            provider = provider.name(),
            configured = settings.is_configured(),
            "llm provider"
        );
    }
    match config.neo4j() {
        Some(neo4j) => tracing::info!(uri = neo4j.uri, "neo4j configured"),
        None => tracing::info!("neo4j not configured"),
    }

    let summary = config.summary();
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &summary)?;
    writeln!(stdout)?;

    Ok(())
}
