//! Symbol Search API Routes

use analysis_core::SearchResult;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub fn symbol_routes() -> Router<AppState> {
    Router::new().route("/api/symbols/search", get(search_symbols))
}

#[utoipa::path(
    get,
    path = "/api/symbols/search",
    params(SearchQuery),
    responses((status = 200, description = "Matching ticker symbols", body = [SearchResult])),
    tag = "Screener"
)]
pub async fn search_symbols(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(ApiResponse::success(Vec::new())));
    }

    let mut results = state
        .orchestrator
        .search(q)
        .await
        .map_err(|e| AppError::from_analysis("Search", e))?;

    if let Some(limit) = query.limit {
        results.truncate(limit);
    }

    Ok(Json(ApiResponse::success(results)))
}
