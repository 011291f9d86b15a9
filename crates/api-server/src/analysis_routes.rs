//! Synthetic analysis endpoints

use analysis_core::AnalysisReport;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{ApiResponse, AppError, AppState, RequestId};

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analysis/:symbol", get(get_analysis))
        .route("/api/analysis/:symbol/refresh", post(refresh_analysis))
}

#[utoipa::path(
    get,
    path = "/api/analysis/{symbol}",
    params(("symbol" = String, Path, description = "Stock ticker symbol")),
    responses(
        (status = 200, description = "Analysis report (cached for an hour)", body = AnalysisReport),
        (status = 400, description = "Malformed symbol"),
    ),
    tag = "Analysis"
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<AnalysisReport>>, AppError> {
    tracing::debug!("[{}] analysis requested for {:?}", request_id, symbol);
    let report = state
        .orchestrator
        .analysis(&symbol)
        .map_err(|e| AppError::from_analysis("Analysis", e))?;

    Ok(Json(ApiResponse::success(report)))
}

#[utoipa::path(
    post,
    path = "/api/analysis/{symbol}/refresh",
    params(("symbol" = String, Path, description = "Stock ticker symbol")),
    responses((status = 200, description = "Freshly generated analysis report", body = AnalysisReport)),
    tag = "Analysis"
)]
pub async fn refresh_analysis(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<AnalysisReport>>, AppError> {
    tracing::info!("[{}] forced analysis refresh for {:?}", request_id, symbol);
    let report = state
        .orchestrator
        .refresh_analysis(&symbol)
        .map_err(|e| AppError::from_analysis("Analysis", e))?;

    Ok(Json(ApiResponse::success(report)))
}
