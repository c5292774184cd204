use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventbook_web::api::{ApiClient, BookingApi};
use eventbook_web::cache::{start_cache_warmer, AppCache};
use eventbook_web::config::Config;
use eventbook_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventbook_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading configuration")?;
    info!("Booking API venues endpoint: {}", config.api.venues_url);

    let api: Arc<dyn BookingApi> =
        Arc::new(ApiClient::new(config.api.clone()).context("building booking API client")?);
    let cache = AppCache::new(config.cache_ttl);

    tokio::spawn(start_cache_warmer(cache.clone(), api.clone(), config.cache_refresh));

    let state = AppState {
        api,
        cache,
        rules: config.rules.clone(),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
