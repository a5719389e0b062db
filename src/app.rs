/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → dependencies → Router
 * - Middleware (HTTP / CORS / security headers; identity gate is per-route)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    services::{advisory::build_advisory_service, auth::build_identity_provider},
    state::AppState,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,advisory_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting advisory API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // One outbound HTTP client (connection pool) shared by both upstreams.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_seconds))
        .build()
        .context("failed to build http client")?;

    let identity = build_identity_provider(config, http.clone())?;
    let advisory = build_advisory_service(config, http)?;

    Ok(AppState::new(identity, Arc::new(advisory)))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, REQUEST_TIMEOUT)
}
