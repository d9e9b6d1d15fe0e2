use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use crypto_core::TokenSigner;
use social_post_service::config::{Config, StoreBackend};
use social_post_service::db::{DynStore, MemoryStore, PgStore};
use social_post_service::register_routes;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "social-post-service";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn build_store(backend: StoreBackend) -> anyhow::Result<DynStore> {
    match backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let db_config =
                db_pool::DbConfig::from_env(SERVICE_NAME).map_err(anyhow::Error::msg)?;
            db_config.log_config();

            let pool = db_pool::create_pool(db_config)
                .await
                .context("failed to create database pool")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("database migrations applied");

            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Social Post Service
///
/// # Routes
///
/// - `/api/auth/*` - register and log in (public)
/// - `/api/posts/*` - ranked feed, posts, their comments and likes
/// - `/api/comments/{comment_id}` - read, edit, delete a comment
/// - `/api/health`, `/api/health/live` - health checks (public)
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(env = %config.app.env, store = ?config.store, "configuration loaded");

    let signer = Arc::new(
        TokenSigner::new(&config.jwt.secret, config.jwt.expiry_secs)
            .context("invalid JWT configuration")?,
    );
    let store = build_store(config.store).await?;

    let bind_address = config.app.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_config.origins() {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let store = store.clone();
        let signer = signer.clone();
        App::new()
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(move |cfg| register_routes(cfg, store, signer))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .shutdown_timeout(30)
    .disable_signals()
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received, draining connections");
        handle.stop(true).await;
    });

    server.await.context("HTTP server error")?;
    tracing::info!("{} stopped", SERVICE_NAME);
    Ok(())
}
