// Framework bootstrap for the simulation server runtime.

use crate::frameworks::config;
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{SimError, WorldSettings, spawn_world};

use axum::{Router, routing::get};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serves the default world on `listener`.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    run_with_settings(listener, config::world_settings()).await
}

/// Generates a world from `settings` and serves it until the server or the
/// simulation stops.
pub async fn run_with_settings(
    listener: tokio::net::TcpListener,
    settings: WorldSettings,
) -> Result<()> {
    let address = listener.local_addr()?;

    let (world, tasks) = spawn_world(&settings);
    let state = Arc::new(AppState { world });

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // A dead simulation takes the process down with it.
    tokio::select! {
        served = axum::serve(listener, app).into_future() => served.inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        }),
        sim = tasks.game => match sim {
            Ok(Ok(())) => {
                tracing::warn!("world loop ended");
                Ok(())
            }
            Ok(Err(SimError::PhysicsWorkerLost)) => {
                tracing::error!("physics worker lost; shutting down");
                Err(std::io::Error::other("physics worker lost"))
            }
            Err(e) => {
                tracing::error!(error = %e, "world loop panicked");
                Err(std::io::Error::other(format!("world loop failed: {e}")))
            }
        },
    }
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}
