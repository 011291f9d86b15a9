use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AnalysisError;

/// Overall call on a symbol, ordered from most bullish to most bearish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Hold,
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Recommendation {
    pub const ALL: [Recommendation; 5] = [
        Recommendation::StrongBuy,
        Recommendation::Buy,
        Recommendation::Hold,
        Recommendation::Sell,
        Recommendation::StrongSell,
    ];

    /// Index into `ALL`; out-of-range indices clamp to the last variant.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        }
    }
}

/// Per-indicator trading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    /// How many readings carry this signal.
    pub fn count_in(self, readings: &[IndicatorReading]) -> usize {
        readings.iter().filter(|r| r.signal == self).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TimeHorizon {
    #[serde(rename = "Short-term")]
    Short,
    #[serde(rename = "Medium-term")]
    Medium,
    #[serde(rename = "Long-term")]
    Long,
}

impl TimeHorizon {
    pub fn to_label(&self) -> &'static str {
        match self {
            TimeHorizon::Short => "Short-term",
            TimeHorizon::Medium => "Medium-term",
            TimeHorizon::Long => "Long-term",
        }
    }
}

/// Low/Medium/High bucket shared by risk factors and the overall risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const LOW_CEILING: u32 = 33;
    pub const MEDIUM_CEILING: u32 = 66;

    /// Bucket a 0-99 risk score: <33 Low, <66 Medium, else High.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s < Self::LOW_CEILING => RiskLevel::Low,
            s if s < Self::MEDIUM_CEILING => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

/// Technical indicator catalog, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Indicator {
    #[serde(rename = "Moving Average (50)")]
    MovingAverage50,
    #[serde(rename = "RSI (14)")]
    Rsi14,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "Bollinger Bands")]
    BollingerBands,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::MovingAverage50,
        Indicator::Rsi14,
        Indicator::Macd,
        Indicator::BollingerBands,
    ];
}

/// Sentiment source catalog, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SentimentChannel {
    #[serde(rename = "News Articles")]
    News,
    #[serde(rename = "Social Media")]
    Social,
    #[serde(rename = "Analyst Ratings")]
    Analyst,
    #[serde(rename = "Insider Trading")]
    Insider,
}

impl SentimentChannel {
    pub const ALL: [SentimentChannel; 4] = [
        SentimentChannel::News,
        SentimentChannel::Social,
        SentimentChannel::Analyst,
        SentimentChannel::Insider,
    ];
}

/// Risk factor catalog, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RiskCategory {
    #[serde(rename = "Market Volatility")]
    MarketVolatility,
    #[serde(rename = "Sector Performance")]
    SectorPerformance,
    #[serde(rename = "Financial Health")]
    FinancialHealth,
    Competition,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::MarketVolatility,
        RiskCategory::SectorPerformance,
        RiskCategory::FinancialHealth,
        RiskCategory::Competition,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IndicatorReading {
    pub name: Indicator,
    pub value: String,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentSource {
    pub name: SentimentChannel,
    /// -1.0 (bearish) to 1.0 (bullish)
    pub sentiment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskFactor {
    pub name: RiskCategory,
    pub level: RiskLevel,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TechnicalAnalysis {
    pub summary: String,
    pub indicators: Vec<IndicatorReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentAnalysis {
    pub summary: String,
    /// Mean of `sources`
    pub score: f64,
    pub sources: Vec<SentimentSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskAnalysis {
    pub summary: String,
    pub overall_risk: RiskLevel,
    /// 0 to 99
    pub risk_score: u32,
    pub risk_factors: Vec<RiskFactor>,
}

/// Synthetic multi-section analysis for one symbol.
///
/// Produced fresh per request and never mutated afterwards. The serialized
/// shape is the interchange format consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisReport {
    pub symbol: String,
    pub summary: String,
    pub recommendation: Recommendation,
    pub recommendation_reason: String,
    pub price_target: f64,
    /// 60 to 99
    pub confidence: u32,
    pub time_horizon: TimeHorizon,
    pub technical_analysis: TechnicalAnalysis,
    pub sentiment_analysis: SentimentAnalysis,
    pub risk_analysis: RiskAnalysis,
}

/// Latest quote for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub last_updated: DateTime<Utc>,
}

/// Symbol search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub security_type: String,
    pub region: String,
}

/// Close prices with matching timestamps, oldest first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PriceHistory {
    pub prices: Vec<f64>,
    pub timestamps: Vec<DateTime<Utc>>,
}

/// News article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    /// -1.0 to 1.0
    pub sentiment: f64,
    pub symbols: Vec<String>,
}

/// Chart range selectable in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Timeframe {
    #[serde(rename = "1D")]
    Day1,
    #[serde(rename = "1W")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
    #[serde(rename = "3M")]
    Month3,
    #[serde(rename = "1Y")]
    Year1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Day1,
        Timeframe::Week1,
        Timeframe::Month1,
        Timeframe::Month3,
        Timeframe::Year1,
    ];

    /// Number of points plotted for the range
    pub fn data_points(&self) -> usize {
        match self {
            Timeframe::Day1 => 78, // 6.5 trading hours of 5-minute bars
            Timeframe::Week1 => 42,
            Timeframe::Month1 => 30,
            Timeframe::Month3 => 30,
            Timeframe::Year1 => 52,
        }
    }

    /// Spacing between consecutive points
    pub fn step(&self) -> Duration {
        match self {
            Timeframe::Day1 => Duration::minutes(5),
            Timeframe::Week1 => Duration::hours(4),
            Timeframe::Month1 => Duration::days(1),
            Timeframe::Month3 => Duration::days(3),
            Timeframe::Year1 => Duration::days(7),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Day1 => "1D",
            Timeframe::Week1 => "1W",
            Timeframe::Month1 => "1M",
            Timeframe::Month3 => "3M",
            Timeframe::Year1 => "1Y",
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Month1
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalysisError::UnsupportedTimeframe(s.to_string()))
    }
}
