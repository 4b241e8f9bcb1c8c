use std::sync::Arc;

use poem::{EndpointExt, Route, Server, listener::TcpListener, middleware::Tracing};
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    domain::repositories::DeliveryLogRepository,
    infrastructure::{
        messaging::whatsapp::WhatsAppManagerClient,
        repositories::{
            in_memory::InMemoryDeliveryLogRepository,
            postgres::{self, PostgresDeliveryLogRepository},
        },
    },
    presentation::http::endpoints::root::{ApiState, RelaySettings, build_api},
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("post_relay=info,poem=info")),
        )
        .init();

    let config = Config::try_parse()?;

    let log_repo: Arc<dyn DeliveryLogRepository> = match &config.database_url {
        Some(url) => {
            let pool = postgres::connect(url, config.db_max_connections).await?;
            tracing::info!("delivery log stored in postgres");
            PostgresDeliveryLogRepository::new(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, delivery log kept in memory");
            Arc::new(InMemoryDeliveryLogRepository::new())
        }
    };

    let notifier = WhatsAppManagerClient::new(&config.messenger_url, config.messenger_timeout)?;

    tracing::info!(
        budget = config.retry.budget.as_str(),
        max_rounds = config.retry.max_rounds,
        base_interval = ?config.retry.base_interval,
        "retry policy configured"
    );

    let state = ApiState::new(
        notifier,
        log_repo,
        RelaySettings {
            recipient_number: config.recipient_number.clone(),
            sender_number: config.sender_number.clone(),
            verify_token: config.verify_token.clone(),
            retry: config.retry.clone(),
        },
    );

    let server_url = format!("http://{}:{}", config.host, config.port);
    let api_service = build_api(state).server(server_url.clone());
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/docs", ui)
        .nest("/", api_service)
        .with(Tracing);

    tracing::info!("webhook server listening on {}", server_url);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutdown signal received");
            },
            None,
        )
        .await?;

    Ok(())
}
