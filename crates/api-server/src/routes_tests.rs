#[cfg(test)]
mod tests {
    use super::super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(
            AppState::with_mock_data(CacheConfig::default()),
            &ServerConfig::default(),
        )
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = send(app(), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cache"]["analysis"], 0);
        assert_eq!(body["cache_ttl_secs"]["analysis_ttl_secs"], 3600);
        assert_eq!(body["cache_ttl_secs"]["quote_ttl_secs"], 60);
    }

    #[tokio::test]
    async fn test_analysis_endpoint() {
        let (status, _, body) = send(app(), "GET", "/api/analysis/aapl").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let data = &body["data"];
        assert_eq!(data["symbol"], "AAPL");
        assert_eq!(data["recommendation"], "Strong Sell");
        let target = data["priceTarget"].as_f64().unwrap();
        assert!((146.016..=219.024).contains(&target));
        assert_eq!(data["technicalAnalysis"]["indicators"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_analysis_is_stable_across_requests() {
        let router = app();
        let (_, _, first) = send(router.clone(), "GET", "/api/analysis/MSFT").await;
        let (_, _, second) = send(router.clone(), "GET", "/api/analysis/MSFT").await;
        let (status, _, refreshed) = send(router, "POST", "/api/analysis/MSFT/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first, refreshed);
    }

    #[tokio::test]
    async fn test_invalid_symbol_is_bad_request() {
        let (status, _, body) = send(app(), "GET", "/api/analysis/WAYTOOLONGSYMBOL").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("symbol"));
    }

    #[tokio::test]
    async fn test_history_timeframes() {
        let (status, _, body) = send(app(), "GET", "/api/history/TSLA?timeframe=1W").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["prices"].as_array().unwrap().len(), 42);
        assert_eq!(body["data"]["timestamps"].as_array().unwrap().len(), 42);

        let (_, _, body) = send(app(), "GET", "/api/history/TSLA").await;
        assert_eq!(body["data"]["prices"].as_array().unwrap().len(), 30);

        let (status, _, _) = send(app(), "GET", "/api/history/TSLA?timeframe=10Y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_quote_news_similar() {
        let (status, _, body) = send(app(), "GET", "/api/quote/GOOGL").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["price"], 174.13);
        assert!(body["data"]["lastUpdated"].is_string());

        let (status, _, body) = send(app(), "GET", "/api/news/AAPL").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().len() <= 5);

        let (status, _, body) = send(app(), "GET", "/api/similar/AAPL").await;
        assert_eq!(status, StatusCode::OK);
        let peers = body["data"].as_array().unwrap();
        assert_eq!(peers.len(), 4);
        assert!(peers.iter().all(|p| p["symbol"] != "AAPL"));
    }

    #[tokio::test]
    async fn test_search() {
        let (status, _, body) = send(app(), "GET", "/api/symbols/search?q=apple").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["symbol"], "AAPL");
        assert_eq!(body["data"][0]["type"], "Equity");

        let (_, _, body) = send(app(), "GET", "/api/symbols/search?q=inc&limit=2").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, _, body) = send(app(), "GET", "/api/symbols/search?q=%20").await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_middleware_headers() {
        let (_, headers, _) = send(app(), "GET", "/health").await;
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(!headers.contains_key("strict-transport-security"));
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (status, _, body) = send(app(), "GET", "/api/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/analysis/{symbol}"].is_object());
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let err = AppError::from_analysis(
            "Analysis",
            AnalysisError::DataUnavailable("timeout".to_string()),
        );
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_every_analysis_error_has_a_status() {
        let cases = [
            (AnalysisError::InvalidData("bad".to_string()), StatusCode::BAD_REQUEST),
            (AnalysisError::UnsupportedTimeframe("10Y".to_string()), StatusCode::BAD_REQUEST),
            (AnalysisError::DataUnavailable("down".to_string()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (error, status) in cases {
            assert_eq!(AppError::from_analysis("Market data", error).status(), status);
        }
    }
}
