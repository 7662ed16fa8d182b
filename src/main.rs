use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use affiliate_linker::config;
use affiliate_linker::prelude::*;
use affiliate_linker::telemetry::init_tracing;

/// Reads one message from stdin and prints it with converted links.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let repository = Arc::new(JsonFileMappingRepository::new(&config.mappings_path));
    let mut converter = LinkConverter::initialize(config.ids.clone(), repository).await;

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read stdin")?;

    let report = converter.convert_all(&input).await;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(report.text.as_bytes()).await?;
    stdout.flush().await?;

    tracing::info!(
        converted = report.delta.total,
        mappings = converter.mappings().len(),
        "Done"
    );

    Ok(())
}
