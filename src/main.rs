//! Catalog Service
//!
//! Serves the book and author catalog over standard I/O: one JSON request per
//! input line, one JSON response per output line.
//!
//! ## Example
//!
//! ```text
//! {"operation":"createAuthor","name":"George Orwell"}
//! {"data":{"books":[],"id":"3","name":"George Orwell"}}
//! ```

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use catalog_service::{
    catalog::CatalogStore, config::AppConfig, error::AppResult, tracing::tracer::Tracer,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::get();

    Tracer::install(config)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    if let Err(err) = start(config).await {
        err.report();
        return Err(err);
    }

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<()> {
    let store = CatalogStore::from_config(&config.catalog);

    info!(
        seed = config.catalog.seed,
        author_delete_policy = ?config.catalog.author_delete_policy,
        "Catalog ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = store.dispatch_line(line).await;
        let mut output = serde_json::to_vec(&response)?;
        output.push(b'\n');
        stdout.write_all(&output).await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");

    Ok(())
}
