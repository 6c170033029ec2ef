mod agents;
mod config;
mod db;
mod errors;
mod integrations;
mod llm_client;
mod models;
mod routes;
mod state;
mod synthesis;
mod workflow;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tokio::sync::watch;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::integrations::{
    PgVerdictSink, RedisIdempotencyStore, S3DocumentSource, WebhookNotifier,
};
use crate::llm_client::{CompletionClient, HttpChatBackend, RetryPolicy};
use crate::routes::build_router;
use crate::state::AppState;
use crate::synthesis::RelevanceSynthesizer;
use crate::workflow::{run_poller, Collaborators, WorkflowOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL: verdict sink and dashboard reads
    let db = create_pool(&config.database_url).await?;

    // Redis: processed-resume sets
    let redis = redis::Client::open(config.redis_url.clone())?;
    let store = Arc::new(RedisIdempotencyStore::connect(&redis).await?);
    info!("Redis idempotency store connected");

    // S3 / MinIO: campaign documents
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let backend = HttpChatBackend::new(
        config.llm_provider,
        &config.llm_model,
        config.llm_api_key.clone(),
        config.llm_base_url.clone(),
    )
    .context("Building completion backend")?;
    info!("Completion backend: {}", backend.describe());
    let llm = Arc::new(CompletionClient::new(Arc::new(backend), RetryPolicy::default()));

    let collaborators = Collaborators {
        source: Arc::new(
            S3DocumentSource::new(s3, config.s3_bucket.clone(), config.s3_prefix.clone())
                .with_processed_index(store.clone()),
        ),
        store,
        sink: Arc::new(PgVerdictSink::new(db.clone())),
        notifier: Arc::new(WebhookNotifier::new(
            config.notify_webhook_url.clone(),
            config.reviewer_email.clone(),
        )),
    };
    let orchestrator = WorkflowOrchestrator::new(
        llm,
        RelevanceSynthesizer::new(config.relevance_threshold),
        collaborators,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = tokio::spawn(run_poller(orchestrator, config.poll_interval, shutdown_rx));
    info!("Polling every {}s", config.poll_interval.as_secs());

    let state = AppState {
        db,
        config: config.clone(),
    };
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The poller finishes its current tick before returning.
    let _ = shutdown_tx.send(true);
    match poller.await {
        Ok(ticks) => info!("Poller stopped after {ticks} ticks"),
        Err(e) => warn!("Poller task ended abnormally: {e}"),
    }

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Could not listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown requested");
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "screener-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
