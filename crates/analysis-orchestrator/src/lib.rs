use analysis_core::{
    AnalysisError, AnalysisReport, MarketDataProvider, NewsArticle, PriceHistory, SearchResult,
    StockQuote, Timeframe,
};
use serde::Serialize;
use std::sync::Arc;
use synthetic_analysis::AnalysisGenerator;

pub mod cache;
pub use cache::TtlCache;

/// Longest ticker accepted at the request boundary
pub const MAX_SYMBOL_LEN: usize = 10;

/// Per-resource cache lifetimes, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheConfig {
    pub analysis_ttl_secs: i64,
    pub quote_ttl_secs: i64,
    pub history_ttl_secs: i64,
    pub news_ttl_secs: i64,
    pub similar_ttl_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            analysis_ttl_secs: 3600,
            quote_ttl_secs: 60,
            history_ttl_secs: 300,
            news_ttl_secs: 300,
            similar_ttl_secs: 3600,
        }
    }
}

/// Entry counts per cache, for the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub analysis: usize,
    pub quotes: usize,
    pub history: usize,
    pub news: usize,
    pub similar: usize,
}

/// Trim and uppercase a requested ticker, rejecting anything that cannot be one.
pub fn normalize_symbol(raw: &str) -> Result<String, AnalysisError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AnalysisError::InvalidData("symbol must not be empty".to_string()));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(AnalysisError::InvalidData(format!(
            "symbol longer than {} characters: {}",
            MAX_SYMBOL_LEN, symbol
        )));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(AnalysisError::InvalidData(format!("invalid symbol: {}", symbol)));
    }
    Ok(symbol)
}

/// Fetch/cache boundary in front of the analysis generator and the market data
/// provider. Each resource is served from its cache until the entry expires.
pub struct AnalysisOrchestrator {
    provider: Arc<dyn MarketDataProvider>,
    generator: AnalysisGenerator,
    config: CacheConfig,
    analysis_cache: TtlCache<AnalysisReport>,
    quote_cache: TtlCache<StockQuote>,
    /// Keyed by "SYMBOL:timeframe"
    history_cache: TtlCache<PriceHistory>,
    news_cache: TtlCache<Vec<NewsArticle>>,
    similar_cache: TtlCache<Vec<StockQuote>>,
}

impl AnalysisOrchestrator {
    pub fn new<P>(provider: Arc<P>, config: CacheConfig) -> Self
    where
        P: MarketDataProvider + 'static,
    {
        Self {
            generator: AnalysisGenerator::new(provider.clone()),
            provider,
            config,
            analysis_cache: TtlCache::new(config.analysis_ttl_secs),
            quote_cache: TtlCache::new(config.quote_ttl_secs),
            history_cache: TtlCache::new(config.history_ttl_secs),
            news_cache: TtlCache::new(config.news_ttl_secs),
            similar_cache: TtlCache::new(config.similar_ttl_secs),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Synthetic analysis for a symbol (cached, default 1h TTL)
    pub fn analysis(&self, symbol: &str) -> Result<AnalysisReport, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        let (report, hit) = self
            .analysis_cache
            .get_or_insert_with(&symbol, || self.generator.generate(&symbol));
        if hit {
            tracing::debug!("Analysis cache hit for {}", symbol);
        } else {
            tracing::info!(
                "Generated analysis for {}: {} (confidence {}%)",
                symbol,
                report.recommendation.to_label(),
                report.confidence
            );
        }
        Ok(report)
    }

    /// Drop the cached analysis and generate a fresh one.
    pub fn refresh_analysis(&self, symbol: &str) -> Result<AnalysisReport, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        self.analysis_cache.remove(&symbol);
        tracing::info!("Refreshing analysis for {}", symbol);
        self.analysis(&symbol)
    }

    /// Latest quote (cached, default 1-min TTL)
    pub async fn quote(&self, symbol: &str) -> Result<StockQuote, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        let (quote, _) = self
            .quote_cache
            .get_or_try_fetch(&symbol, || self.provider.quote(&symbol))
            .await?;
        Ok(quote)
    }

    /// Price history for a chart range (cached, default 5-min TTL)
    pub async fn price_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<PriceHistory, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        let cache_key = format!("{}:{}", symbol, timeframe);
        let (history, hit) = self
            .history_cache
            .get_or_try_fetch(&cache_key, || self.provider.price_history(&symbol, timeframe))
            .await?;
        if !hit {
            tracing::debug!("Fetched {} history points for {}", history.prices.len(), cache_key);
        }
        Ok(history)
    }

    /// News articles for a symbol (cached, default 5-min TTL)
    pub async fn news(&self, symbol: &str) -> Result<Vec<NewsArticle>, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        let (articles, _) = self
            .news_cache
            .get_or_try_fetch(&symbol, || self.provider.news(&symbol))
            .await?;
        Ok(articles)
    }

    /// Related stocks (cached, default 1h TTL)
    pub async fn similar(&self, symbol: &str) -> Result<Vec<StockQuote>, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        let (peers, _) = self
            .similar_cache
            .get_or_try_fetch(&symbol, || self.provider.similar(&symbol))
            .await?;
        Ok(peers)
    }

    /// Symbol search. Not cached: every keystroke is a new query.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AnalysisError> {
        self.provider.search(query.trim()).await
    }

    /// Evict every cached resource for a symbol.
    pub fn invalidate(&self, symbol: &str) -> Result<(), AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        self.analysis_cache.remove(&symbol);
        self.quote_cache.remove(&symbol);
        self.history_cache.remove_prefix(&format!("{}:", symbol));
        self.news_cache.remove(&symbol);
        self.similar_cache.remove(&symbol);
        tracing::info!("Invalidated cached data for {}", symbol);
        Ok(())
    }

    /// Drop expired entries from every cache; returns the number removed.
    pub fn purge_expired(&self) -> usize {
        self.analysis_cache.purge_expired()
            + self.quote_cache.purge_expired()
            + self.history_cache.purge_expired()
            + self.news_cache.purge_expired()
            + self.similar_cache.purge_expired()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            analysis: self.analysis_cache.len(),
            quotes: self.quote_cache.len(),
            history: self.history_cache.len(),
            news: self.news_cache.len(),
            similar: self.similar_cache.len(),
        }
    }
}
