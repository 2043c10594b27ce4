// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{error::Error, net::SocketAddr, sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use thingful_server::{
    api::router,
    auth::{password::hash_password, TokenService},
    config::{Config, LogFormat, SeedUser, DEFAULT_LOG_FILTER},
    models::NewUser,
    state::AppState,
    storage::{Database, InMemoryStore, StoreError, ThingStore, UserStore},
};

/// Time allowed for in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

async fn seed_user(users: &dyn UserStore, seed: &SeedUser) -> Result<(), Box<dyn Error>> {
    if users.find_by_user_name(&seed.user_name).await?.is_some() {
        tracing::info!(user_name = %seed.user_name, "seed user already present");
        return Ok(());
    }

    let password = hash_password(seed.password.clone()).await?;
    match users
        .insert_user(NewUser {
            user_name: seed.user_name.clone(),
            full_name: seed.user_name.clone(),
            nickname: None,
            password,
        })
        .await
    {
        Ok(user) => tracing::info!(user_id = user.id, user_name = %user.user_name, "seed user created"),
        // Another instance sharing the database got there first.
        Err(StoreError::Conflict(_)) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Wait for `shutdown`, then stop accepting connections and give in-flight
/// requests [`SHUTDOWN_GRACE`] to finish.
async fn drain_on_cancel(shutdown: CancellationToken, handle: Handle<SocketAddr>) {
    shutdown.cancelled().await;
    tracing::info!(grace_secs = SHUTDOWN_GRACE.as_secs(), "draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let users: Arc<dyn UserStore>;
    let things: Arc<dyn ThingStore>;
    match &config.database_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening database");
            let db = Arc::new(Database::open(path)?);
            users = db.clone();
            things = db;
        }
        None => {
            tracing::warn!("DATABASE_PATH not set; data is kept in memory only");
            let store = Arc::new(InMemoryStore::new());
            users = store.clone();
            things = store;
        }
    }

    if let Some(seed) = &config.seed_user {
        seed_user(users.as_ref(), seed).await?;
    }

    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.jwt_expiry);
    let state = AppState::new(users, things, tokens);
    let app = router(state, config.auth_scheme);
    let addr = config.bind_addr()?;

    let handle = Handle::new();
    let shutdown = CancellationToken::new();
    tokio::spawn(drain_on_cancel(shutdown.clone(), handle.clone()));
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            tracing::info!("shutdown signal received");
            shutdown.cancel();
        });
    }

    tracing::info!(
        %addr,
        auth_scheme = ?config.auth_scheme,
        tls = config.tls.is_some(),
        "Thingful server listening (docs at /docs)"
    );

    match &config.tls {
        Some(tls) => {
            // Must run before any TLS configuration is built.
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                tracing::debug!("rustls crypto provider already installed");
            }
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    tracing::info!("server stopped");
    Ok(())
}
