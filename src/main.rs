//! Churn intake server: HTTP API, web form and optional Telegram bot.

use std::sync::Arc;

use secrecy::ExposeSecret;
use teloxide::Bot;
use tokio::sync::watch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use churn_intake::adapters::http::app_router;
use churn_intake::adapters::storage::{IdleSessionSweeper, IdleSweeperConfig, InMemorySessionStore};
use churn_intake::adapters::telegram::run_bot;
use churn_intake::bootstrap::{build_scorer, build_services, http_settings};
use churn_intake::config::AppConfig;
use churn_intake::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let scorer = build_scorer(&config.scoring)?;
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let services = build_services(scorer, store.clone(), config.scoring.timeout());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper = IdleSessionSweeper::new(
        store,
        IdleSweeperConfig {
            idle_timeout: config.session.idle_timeout(),
            sweep_interval: config.session.sweep_interval(),
        },
    );
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    if config.telegram.enabled {
        if let Some(token) = &config.telegram.bot_token {
            let bot = Bot::new(token.expose_secret());
            tokio::spawn(run_bot(bot, services.telegram.clone()));
        }
    }

    let app = app_router(services.intake, services.form, &http_settings(&config.server));
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tx.send(true).ok();
    sweeper_task.await.ok();
    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
