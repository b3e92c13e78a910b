//! mend-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! JSON-file store, and serves the mend REST API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::http::{HeaderValue, Method, header};
use clap::Parser;
use mend_api::ServerConfig;
use mend_store_json::JsonStore;
use tokio::net::TcpListener;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "mend health-tracking server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("MEND"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the JSON-file store.
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = JsonStore::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = mend_api::router(Arc::new(store))
    .layer(cors_layer(&server_cfg)?)
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Allow the configured browser origins; wide open when none are listed.
fn cors_layer(cfg: &ServerConfig) -> anyhow::Result<CorsLayer> {
  let layer = CorsLayer::new()
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE]);

  if cfg.cors_origins.is_empty() {
    return Ok(layer.allow_origin(Any));
  }

  let origins = cfg
    .cors_origins
    .iter()
    .map(|origin| {
      origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {origin:?}"))
    })
    .collect::<anyhow::Result<Vec<_>>>()?;
  Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
