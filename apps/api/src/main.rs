mod config;
mod errors;
mod llm_client;
mod persona;
mod reddit;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::persona::builder::PersonaSettings;
use crate::persona::render::load_template;
use crate::reddit::RedditClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Persona API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Reddit client
    let reddit = RedditClient::new(
        config.reddit.clone(),
        config.reddit_auth_url.clone(),
        config.reddit_api_url.clone(),
    )
    .context("Failed to build Reddit client")?;
    info!("Reddit client initialized ({})", config.reddit_api_url);

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openrouter_api_key.clone(),
        config.openrouter_base_url.clone(),
    )
    .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Report template and output location
    let template = load_template(config.template_path.as_deref())?;
    let settings = PersonaSettings {
        output_dir: config.output_dir.clone(),
        template,
    };
    info!("Persona reports will be written to {}", settings.output_dir.display());

    // Build app state
    let state = AppState {
        posts: Arc::new(reddit),
        llm: Arc::new(llm),
        settings: Arc::new(settings),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
