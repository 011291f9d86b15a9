use analysis_core::{
    Indicator, IndicatorReading, Recommendation, RiskCategory, RiskLevel, SentimentChannel,
    SentimentSource, Signal, TimeHorizon,
};

use crate::SeededSequence;

/// Base price used when the lookup has no usable price for a symbol.
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Price targets land within ±20% of the base price.
pub const PRICE_TARGET_BAND: f64 = 0.2;

pub const SECTORS: [&str; 10] = [
    "Technology",
    "Healthcare",
    "Financial",
    "Consumer Discretionary",
    "Energy",
    "Industrial",
    "Communication Services",
    "Materials",
    "Utilities",
    "Real Estate",
];

/// Two-threshold bucketing over draws.
///
/// The first draw is compared against `upper`. On fallthrough a fresh draw is
/// compared against `lower`, so a bucket consumes one or two draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cascade {
    pub upper: f64,
    pub lower: f64,
}

impl Cascade {
    pub const WIDE: Cascade = Cascade { upper: 0.5, lower: 0.3 };
    pub const NARROW: Cascade = Cascade { upper: 0.6, lower: 0.4 };
    pub const TIERED: Cascade = Cascade { upper: 0.6, lower: 0.3 };

    pub fn pick<T>(&self, seq: &mut SeededSequence, high: T, mid: T, low: T) -> T {
        if seq.next_draw() > self.upper {
            high
        } else if seq.next_draw() > self.lower {
            mid
        } else {
            low
        }
    }
}

fn signal_cascade(indicator: Indicator) -> Cascade {
    match indicator {
        Indicator::MovingAverage50 | Indicator::Macd => Cascade::WIDE,
        Indicator::Rsi14 | Indicator::BollingerBands => Cascade::NARROW,
    }
}

/// Drawn inputs behind a risk factor's description text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskDetail {
    MarketVolatility,
    SectorPerformance { sector: &'static str, outperforming: bool },
    FinancialHealth { strong: bool },
    Competition { significant: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnRisk {
    pub category: RiskCategory,
    pub level: RiskLevel,
    pub detail: RiskDetail,
}

/// Every numeric and enum field of a report, before any text is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub base_price: f64,
    pub recommendation: Recommendation,
    pub price_target: f64,
    pub indicators: Vec<IndicatorReading>,
    pub sentiment_sources: Vec<SentimentSource>,
    pub sentiment_score: f64,
    pub confidence: u32,
    pub time_horizon: TimeHorizon,
    pub risks: Vec<DrawnRisk>,
    pub risk_score: u32,
    pub overall_risk: RiskLevel,
}

/// Consume draws in the fixed report order and derive every metric.
///
/// Order: recommendation, price target, indicators, sentiment sources,
/// confidence, time horizon, risk factors, risk score. Reordering any step
/// changes every value after it.
pub fn derive_metrics(seq: &mut SeededSequence, base_price: f64) -> DerivedMetrics {
    let recommendation = draw_recommendation(seq);
    let price_target = draw_price_target(seq, base_price);

    let indicators = Indicator::ALL
        .into_iter()
        .map(|indicator| draw_indicator(seq, indicator, base_price))
        .collect();

    let sentiment_sources: Vec<SentimentSource> = SentimentChannel::ALL
        .into_iter()
        .map(|name| SentimentSource {
            name,
            sentiment: seq.next_draw() * 2.0 - 1.0,
        })
        .collect();
    let sentiment_score = mean_sentiment(&sentiment_sources);

    let confidence = (seq.next_draw() * 40.0).floor() as u32 + 60;
    let time_horizon = Cascade::TIERED.pick(seq, TimeHorizon::Long, TimeHorizon::Medium, TimeHorizon::Short);

    let risks = RiskCategory::ALL
        .into_iter()
        .map(|category| draw_risk(seq, category))
        .collect();

    let risk_score = (seq.next_draw() * 100.0).floor() as u32;

    DerivedMetrics {
        base_price,
        recommendation,
        price_target,
        indicators,
        sentiment_sources,
        sentiment_score,
        confidence,
        time_horizon,
        risks,
        risk_score,
        overall_risk: RiskLevel::from_score(risk_score),
    }
}

pub fn draw_recommendation(seq: &mut SeededSequence) -> Recommendation {
    let index = (seq.next_draw() * Recommendation::ALL.len() as f64).floor() as usize;
    Recommendation::from_index(index)
}

pub fn draw_price_target(seq: &mut SeededSequence, base_price: f64) -> f64 {
    let offset = seq.next_draw() * (2.0 * PRICE_TARGET_BAND) - PRICE_TARGET_BAND;
    base_price * (1.0 + offset)
}

/// One draw for the displayed value (two for Bollinger's band cascade), then
/// the signal cascade.
pub fn draw_indicator(seq: &mut SeededSequence, indicator: Indicator, base_price: f64) -> IndicatorReading {
    let value = match indicator {
        Indicator::MovingAverage50 => {
            let average = base_price * (1.0 + (seq.next_draw() * 0.1 - 0.05));
            format!("${:.2}", average)
        }
        Indicator::Rsi14 => format!("{}", (seq.next_draw() * 100.0).floor() as u32),
        Indicator::Macd => format!("{:.2}", seq.next_draw() * 2.0 - 1.0),
        Indicator::BollingerBands => Cascade::WIDE.pick(seq, "Upper", "Middle", "Lower").to_string(),
    };
    let signal = signal_cascade(indicator).pick(seq, Signal::Buy, Signal::Hold, Signal::Sell);

    IndicatorReading {
        name: indicator,
        value,
        signal,
    }
}

/// Level cascade first, then whatever the category's description needs.
pub fn draw_risk(seq: &mut SeededSequence, category: RiskCategory) -> DrawnRisk {
    let level = Cascade::TIERED.pick(seq, RiskLevel::High, RiskLevel::Medium, RiskLevel::Low);
    let detail = match category {
        RiskCategory::MarketVolatility => RiskDetail::MarketVolatility,
        RiskCategory::SectorPerformance => {
            let index = (seq.next_draw() * SECTORS.len() as f64).floor() as usize;
            RiskDetail::SectorPerformance {
                sector: SECTORS[index.min(SECTORS.len() - 1)],
                outperforming: seq.next_draw() > 0.5,
            }
        }
        RiskCategory::FinancialHealth => RiskDetail::FinancialHealth {
            strong: seq.next_draw() > 0.5,
        },
        RiskCategory::Competition => RiskDetail::Competition {
            significant: seq.next_draw() > 0.5,
        },
    };

    DrawnRisk { category, level, detail }
}

pub fn mean_sentiment(sources: &[SentimentSource]) -> f64 {
    if sources.is_empty() {
        return 0.0;
    }
    sources.iter().map(|s| s.sentiment).sum::<f64>() / sources.len() as f64
}
