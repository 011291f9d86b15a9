use async_trait::async_trait;
use std::collections::HashMap;

use crate::{AnalysisError, NewsArticle, PriceHistory, SearchResult, StockQuote, Timeframe};

/// Reference price source used to anchor a price target.
///
/// Absence is not an error: callers fall back to a default base price.
pub trait PriceLookup: Send + Sync {
    fn price_of(&self, symbol: &str) -> Option<f64>;
}

impl PriceLookup for HashMap<String, f64> {
    fn price_of(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).copied()
    }
}

/// Lookup that knows no prices. Every symbol falls back to the default base.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrices;

impl PriceLookup for NoPrices {
    fn price_of(&self, _symbol: &str) -> Option<f64> {
        None
    }
}

/// Trait for market data backends (quotes, history, news, search)
#[async_trait]
pub trait MarketDataProvider: PriceLookup {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AnalysisError>;

    async fn quote(&self, symbol: &str) -> Result<StockQuote, AnalysisError>;

    async fn price_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<PriceHistory, AnalysisError>;

    async fn news(&self, symbol: &str) -> Result<Vec<NewsArticle>, AnalysisError>;

    async fn similar(&self, symbol: &str) -> Result<Vec<StockQuote>, AnalysisError>;
}
