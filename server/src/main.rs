//! `octolens` entry point.
//!
//! Bootstrap order matters: the history store is opened (and its schema
//! applied) before the listener binds, so no request ever races schema
//! setup. A store failure here is fatal; after this point store writes are
//! best-effort.

use std::sync::Arc;

use anyhow::Context;
use octolens_core::github::GithubClient;
use octolens_core::history::HistoryStore;
use octolens_server::config::ServerConfig;
use octolens_server::handlers::App;

/// Listener threads; each one owns a full request-response cycle.
const WORKERS: usize = 4;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("octolens v{} starting", env!("CARGO_PKG_VERSION"));

    let store = HistoryStore::open(&config.db_path)
        .with_context(|| format!("failed to open history store at {}", config.db_path.display()))?;
    tracing::info!("history store at {}", config.db_path.display());

    tracing::info!("GitHub API base: {}", config.api_base_url);
    let client =
        GithubClient::new(config.api_base_url).context("failed to build GitHub client")?;

    let server = tiny_http::Server::http(&config.bind_addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", config.bind_addr))?;
    tracing::info!("listening on http://{}", config.bind_addr);

    octolens_server::server::serve(server, Arc::new(App::new(client, store)), WORKERS);
    Ok(())
}
