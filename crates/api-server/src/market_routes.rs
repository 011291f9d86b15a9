//! Quote, price history, news and related-stock endpoints

use analysis_core::{NewsArticle, PriceHistory, StockQuote, Timeframe};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct HistoryQuery {
    /// One of 1D, 1W, 1M, 3M, 1Y (default 1M)
    #[serde(default)]
    pub timeframe: Option<String>,
}

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/api/quote/:symbol", get(get_quote))
        .route("/api/history/:symbol", get(get_history))
        .route("/api/news/:symbol", get(get_news))
        .route("/api/similar/:symbol", get(get_similar))
}

#[utoipa::path(
    get,
    path = "/api/quote/{symbol}",
    params(("symbol" = String, Path, description = "Stock ticker symbol")),
    responses((status = 200, description = "Latest quote", body = StockQuote)),
    tag = "Market"
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockQuote>>, AppError> {
    let quote = state
        .orchestrator
        .quote(&symbol)
        .await
        .map_err(|e| AppError::from_analysis("Market data", e))?;

    Ok(Json(ApiResponse::success(quote)))
}

#[utoipa::path(
    get,
    path = "/api/history/{symbol}",
    params(("symbol" = String, Path, description = "Stock ticker symbol"), HistoryQuery),
    responses(
        (status = 200, description = "Close prices, oldest first", body = PriceHistory),
        (status = 400, description = "Unsupported timeframe"),
    ),
    tag = "Market"
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<PriceHistory>>, AppError> {
    let timeframe = match query.timeframe.as_deref() {
        Some(raw) => raw
            .parse::<Timeframe>()
            .map_err(|e| AppError::from_analysis("Market data", e))?,
        None => Timeframe::default(),
    };

    let history = state
        .orchestrator
        .price_history(&symbol, timeframe)
        .await
        .map_err(|e| AppError::from_analysis("Market data", e))?;

    Ok(Json(ApiResponse::success(history)))
}

#[utoipa::path(
    get,
    path = "/api/news/{symbol}",
    params(("symbol" = String, Path, description = "Stock ticker symbol")),
    responses((status = 200, description = "Up to five recent articles", body = [NewsArticle])),
    tag = "Market"
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Vec<NewsArticle>>>, AppError> {
    let articles = state
        .orchestrator
        .news(&symbol)
        .await
        .map_err(|e| AppError::from_analysis("News", e))?;

    Ok(Json(ApiResponse::success(articles)))
}

#[utoipa::path(
    get,
    path = "/api/similar/{symbol}",
    params(("symbol" = String, Path, description = "Stock ticker symbol")),
    responses((status = 200, description = "Up to four related stocks", body = [StockQuote])),
    tag = "Market"
)]
pub async fn get_similar(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Vec<StockQuote>>>, AppError> {
    let peers = state
        .orchestrator
        .similar(&symbol)
        .await
        .map_err(|e| AppError::from_analysis("Market data", e))?;

    Ok(Json(ApiResponse::success(peers)))
}
