use std::env;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use devconnect_backend::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    routes::build_app,
    settings::AppConfig,
    web::build_cors,
    AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    let log_json = env::var("APP_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if log_json {
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

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::new().context("Configuration error")?;
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let app_state = web::Data::new(
        AppState::new(&config, pool).context("Failed to build application state")?
    );

    let server_addr = format!("{}:{}", config.host, config.port);
    let origins = config.cors_origins();

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || build_app(app_state.clone(), build_cors(&origins)))
        .workers(config.worker_count)
        .bind(&server_addr)
        .with_context(|| format!("Failed to bind {}", server_addr))?
        .run();

    tokio::select! {
        res = server => res.context("Server error")?,
        _ = shutdown_signal() => {},
    }

    tracing::info!("Server stopped");
    Ok(())
}
