//! Mock market data backend.
//!
//! Serves quotes, search hits and news from fixed tables, invents quotes for
//! unknown symbols and simulates price history with a random walk. Used in
//! place of a live vendor so the dashboard works without API keys.

use analysis_core::{
    AnalysisError, MarketDataProvider, NewsArticle, PriceHistory, PriceLookup, SearchResult,
    StockQuote, Timeframe,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub mod tables;

use tables::{find_stock, NewsRow, StockRow, NEWS_TABLE, SEARCH_TABLE, STOCK_TABLE};

pub const MAX_SEARCH_RESULTS: usize = 5;
pub const MAX_NEWS_ARTICLES: usize = 5;
pub const MAX_SIMILAR_STOCKS: usize = 4;

/// Random walk starting level for simulated history
const HISTORY_BASE_PRICE: f64 = 100.0;
/// Per-step drift: moves are drawn from (u - 0.48) * 2 percent
const HISTORY_DRIFT: f64 = 0.48;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockMarketData;

impl MockMarketData {
    pub fn new() -> Self {
        Self
    }
}

fn table_quote(row: &StockRow, now: DateTime<Utc>) -> StockQuote {
    StockQuote {
        symbol: row.symbol.to_string(),
        name: row.name.to_string(),
        price: row.price,
        change: row.change,
        change_percent: row.change_percent,
        open: row.open,
        high: row.high,
        low: row.low,
        volume: row.volume,
        last_updated: now,
    }
}

fn random_quote(symbol: &str, rng: &mut impl Rng, now: DateTime<Utc>) -> StockQuote {
    StockQuote {
        symbol: symbol.to_string(),
        name: format!("{} Inc.", symbol),
        price: rng.gen::<f64>() * 1000.0 + 50.0,
        change: rng.gen::<f64>() * 20.0 - 10.0,
        change_percent: rng.gen::<f64>() * 5.0 - 2.5,
        open: rng.gen::<f64>() * 1000.0 + 45.0,
        high: rng.gen::<f64>() * 1000.0 + 55.0,
        low: rng.gen::<f64>() * 1000.0 + 40.0,
        volume: rng.gen_range(0..10_000_000),
        last_updated: now,
    }
}

fn news_article(row: &NewsRow) -> NewsArticle {
    NewsArticle {
        id: row.id.to_string(),
        title: row.title.to_string(),
        summary: row.summary.to_string(),
        url: row.url.to_string(),
        source: row.source.to_string(),
        published_at: DateTime::from_timestamp(row.published_at, 0).unwrap_or_default(),
        sentiment: row.sentiment,
        symbols: row.symbols.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn search_table(query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    SEARCH_TABLE
        .iter()
        .filter(|entry| {
            entry.symbol.to_lowercase().contains(&needle)
                || entry.name.to_lowercase().contains(&needle)
        })
        .take(MAX_SEARCH_RESULTS)
        .map(|entry| SearchResult {
            symbol: entry.symbol.to_string(),
            name: entry.name.to_string(),
            security_type: entry.security_type.to_string(),
            region: entry.region.to_string(),
        })
        .collect()
}

/// Random walk of `timeframe.data_points()` closes ending at `now`, oldest first.
pub fn simulate_history(timeframe: Timeframe, rng: &mut impl Rng, now: DateTime<Utc>) -> PriceHistory {
    let points = timeframe.data_points();
    let step = timeframe.step();

    let mut prices = Vec::with_capacity(points);
    let mut timestamps = Vec::with_capacity(points);
    let mut level = HISTORY_BASE_PRICE;

    // Walk backwards from now, then flip into chronological order
    for i in 0..points {
        let change = (rng.gen::<f64>() - HISTORY_DRIFT) * 2.0;
        level *= 1.0 + change / 100.0;
        prices.push(level);
        timestamps.push(now - step * i as i32);
    }
    prices.reverse();
    timestamps.reverse();

    PriceHistory { prices, timestamps }
}

fn pick_news(symbol: &str, rng: &mut impl Rng) -> Vec<NewsArticle> {
    NEWS_TABLE
        .iter()
        .filter(|row| row.symbols.iter().any(|s| *s == symbol) || rng.gen_bool(0.5))
        .take(MAX_NEWS_ARTICLES)
        .map(news_article)
        .collect()
}

fn pick_similar(symbol: &str, rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<StockQuote> {
    let mut peers: Vec<&StockRow> = STOCK_TABLE.iter().filter(|row| row.symbol != symbol).collect();
    peers.shuffle(rng);
    peers
        .into_iter()
        .take(MAX_SIMILAR_STOCKS)
        .map(|row| table_quote(row, now))
        .collect()
}

impl PriceLookup for MockMarketData {
    fn price_of(&self, symbol: &str) -> Option<f64> {
        find_stock(symbol).map(|row| row.price)
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketData {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AnalysisError> {
        let results = search_table(query);
        tracing::debug!("Mock search for {:?}: {} hits", query, results.len());
        Ok(results)
    }

    async fn quote(&self, symbol: &str) -> Result<StockQuote, AnalysisError> {
        let now = Utc::now();
        match find_stock(symbol) {
            Some(row) => Ok(table_quote(row, now)),
            None => {
                tracing::debug!("No table quote for {}, generating one", symbol);
                Ok(random_quote(symbol, &mut rand::thread_rng(), now))
            }
        }
    }

    async fn price_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<PriceHistory, AnalysisError> {
        tracing::debug!("Simulating {} history for {}", timeframe, symbol);
        Ok(simulate_history(timeframe, &mut rand::thread_rng(), Utc::now()))
    }

    async fn news(&self, symbol: &str) -> Result<Vec<NewsArticle>, AnalysisError> {
        Ok(pick_news(symbol, &mut rand::thread_rng()))
    }

    async fn similar(&self, symbol: &str) -> Result<Vec<StockQuote>, AnalysisError> {
        Ok(pick_similar(symbol, &mut rand::thread_rng(), Utc::now()))
    }
}
