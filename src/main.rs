mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    router,
    scheduler::countdown,
    service::announcement::AnnouncementService,
    startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let (state, notifications) = startup::load_app_state(&config.data_dir).await?;

    tracing::info!("Starting server");

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, state.clone()).await?;

    AnnouncementService::new(discord_http, state.clone(), config.command_prefix.clone())
        .spawn_dispatcher(notifications);

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let mut scheduler = countdown::start_scheduler(state.clone()).await?;

    let address = {
        let settings = state.settings.read().await;
        format!("{}:{}", settings.api.host, settings.api.port)
    };
    let listener = TcpListener::bind(address.as_str()).await?;
    tracing::info!("REST API listening on http://{}", address);

    axum::serve(listener, router::router().with_state(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Failed to stop scheduler: {}", e);
    }
    startup::save_final_state(&state).await;

    Ok(())
}

/// Resolves once Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
