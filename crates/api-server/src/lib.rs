//! HTTP API for the stock dashboard: synthetic analysis, quotes, price
//! history, news, related stocks and symbol search.

use analysis_core::AnalysisError;
use analysis_orchestrator::{AnalysisOrchestrator, CacheConfig, CacheStats};
use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use market_data::MockMarketData;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

pub mod analysis_routes;
pub mod config;
pub mod layers;
pub mod market_routes;
pub mod symbol_routes;

#[cfg(test)]
mod routes_tests;

pub use config::ServerConfig;
pub use layers::{RequestId, SecurityPolicy};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

impl AppState {
    /// State backed by the mock market data provider
    pub fn with_mock_data(cache: CacheConfig) -> Self {
        Self {
            orchestrator: Arc::new(AnalysisOrchestrator::new(
                Arc::new(MockMarketData::new()),
                cache,
            )),
        }
    }
}

/// JSON envelope for every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler error: a status code plus the underlying cause.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    /// Map an analysis-layer error to a status. Upstream failures become 503
    /// with a generic "unavailable" message.
    pub fn from_analysis(context: &str, e: AnalysisError) -> Self {
        match e {
            AnalysisError::InvalidData(_) | AnalysisError::UnsupportedTimeframe(_) => {
                Self::with_status(StatusCode::BAD_REQUEST, e)
            }
            AnalysisError::DataUnavailable(_) => {
                tracing::warn!("{}: {}", context, e);
                Self::with_status(
                    StatusCode::SERVICE_UNAVAILABLE,
                    anyhow::anyhow!("{} unavailable", context),
                )
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed ({}): {:#}", self.status, self.error);
        }
        let body = ApiResponse::<()>::error(self.error.to_string());
        (self.status, Json(body)).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Stock Dashboard API"),
    paths(
        analysis_routes::get_analysis,
        analysis_routes::refresh_analysis,
        market_routes::get_quote,
        market_routes::get_history,
        market_routes::get_news,
        market_routes::get_similar,
        symbol_routes::search_symbols,
    ),
    components(schemas(
        analysis_core::AnalysisReport,
        analysis_core::StockQuote,
        analysis_core::PriceHistory,
        analysis_core::NewsArticle,
        analysis_core::SearchResult,
        analysis_core::Timeframe,
    )),
    tags(
        (name = "Analysis", description = "Synthetic multi-agent analysis"),
        (name = "Market", description = "Quotes, history, news and related stocks"),
        (name = "Screener", description = "Symbol search"),
    )
)]
pub struct ApiDoc;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    cache: CacheStats,
    cache_ttl_secs: CacheConfig,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache: state.orchestrator.cache_stats(),
        cache_ttl_secs: state.orchestrator.config(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi_json))
        .merge(analysis_routes::analysis_routes())
        .merge(market_routes::market_routes())
        .merge(symbol_routes::symbol_routes())
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            SecurityPolicy {
                hsts: config.enable_hsts,
            },
            layers::harden_response,
        ))
        .layer(middleware::from_fn(layers::tag_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Periodically sweep expired cache entries so idle symbols do not pile up.
fn spawn_cache_sweeper(orchestrator: Arc<AnalysisOrchestrator>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = orchestrator.purge_expired();
            if removed > 0 {
                tracing::debug!("Purged {} expired cache entries", removed);
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting stock dashboard API on {}", config.bind_addr());
    tracing::info!(
        "  Cache TTLs (s): analysis {}, quote {}, history {}, news {}, similar {}",
        config.cache.analysis_ttl_secs,
        config.cache.quote_ttl_secs,
        config.cache.history_ttl_secs,
        config.cache.news_ttl_secs,
        config.cache.similar_ttl_secs
    );

    let state = AppState::with_mock_data(config.cache);
    spawn_cache_sweeper(
        state.orchestrator.clone(),
        Duration::from_secs(config.cache_purge_interval_secs),
    );

    let app = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
