use std::sync::{Arc, Mutex};

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use concierge_desk::config::AppConfig;
use concierge_desk::db;
use concierge_desk::handlers;
use concierge_desk::services::currency::CurrencyStore;
use concierge_desk::services::preferences::SqlitePreferences;
use concierge_desk::services::price_display::PriceFormatter;
use concierge_desk::services::rates::StaticRates;
use concierge_desk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.prefs_database_url)?;
    let prefs = SqlitePreferences::new(Arc::new(Mutex::new(conn)));

    let currency = Arc::new(CurrencyStore::new(Arc::new(prefs)));
    currency.initialize();
    tracing::info!(currency = currency.get_current().code, "display currency ready");

    let http = reqwest::Client::builder()
        .timeout(config.backend_timeout())
        .build()?;

    let state = Arc::new(AppState {
        config: config.clone(),
        http,
        prices: PriceFormatter::new(Arc::clone(&currency), Arc::new(StaticRates::default())),
        currency,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/notifications/email",
            post(handlers::proxy::forward_email),
        )
        .route(
            "/api/webhooks/message",
            post(handlers::proxy::forward_message),
        )
        .route("/api/currencies", get(handlers::currency::get_currencies))
        .route("/api/currency", post(handlers::currency::set_currency))
        .route("/api/price", get(handlers::currency::get_price))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(backend = %config.backend_url, "starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
