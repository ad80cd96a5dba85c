use std::sync::Arc;

use anyhow::{Context, Result};
use askdb::{agent::QuestionAnswerer, cli::Cli, config::Settings, web::create_router};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("askdb=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    cli.apply_to(&mut settings);
    settings.validate()?;

    let answerer = QuestionAnswerer::new(&settings);
    if !answerer.has_api_key() {
        tracing::warn!("OPENAI_API_KEY is not set, questions will fail until it is provided");
    }

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("AI Database Q&A Agent listening on http://{addr}");

    axum::serve(listener, create_router(Arc::new(answerer)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
    tracing::info!("shutting down");
}
