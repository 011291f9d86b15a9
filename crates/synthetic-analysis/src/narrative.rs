//! Template text for reports.
//!
//! Each function selects prose from values that were already drawn. Nothing
//! here touches the draw sequence.

use analysis_core::{IndicatorReading, Recommendation, RiskLevel, Signal};

use crate::RiskDetail;

/// Cosmetic word choices with no bearing on structured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flavor {
    pub strong_fundamentals: bool,
    pub positive_technicals: bool,
    pub firm_trend: bool,
}

/// Direction of the technical narrative, from Buy vs Sell counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechnicalTone {
    Bullish,
    Bearish,
    Mixed,
}

impl TechnicalTone {
    pub fn of(indicators: &[IndicatorReading]) -> Self {
        Self::from_counts(Signal::Buy.count_in(indicators), Signal::Sell.count_in(indicators))
    }

    pub fn from_counts(buy: usize, sell: usize) -> Self {
        match buy.cmp(&sell) {
            std::cmp::Ordering::Greater => TechnicalTone::Bullish,
            std::cmp::Ordering::Less => TechnicalTone::Bearish,
            std::cmp::Ordering::Equal => TechnicalTone::Mixed,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn summary(
    symbol: &str,
    recommendation: Recommendation,
    price_target: f64,
    base_price: f64,
    flavor: Flavor,
) -> String {
    let percent_change = round2((price_target - base_price) / base_price * 100.0).abs();
    let direction = if price_target > base_price { "upside" } else { "downside" };

    format!(
        "Based on our multi-agent analysis system, {symbol} currently shows a {} signal with a price target of ${:.2}, representing a {}% potential {direction}. The company demonstrates {} fundamentals and {} technical indicators.",
        recommendation.to_label().to_lowercase(),
        price_target,
        percent_change,
        if flavor.strong_fundamentals { "strong" } else { "mixed" },
        if flavor.positive_technicals { "positive" } else { "challenging" },
    )
}

pub fn recommendation_reason(recommendation: Recommendation, symbol: &str) -> String {
    match recommendation {
        Recommendation::StrongBuy => format!(
            "{symbol} shows exceptional growth potential with strong fundamentals and positive technical indicators. Our analysis suggests significant upside potential in both short and long-term horizons."
        ),
        Recommendation::Buy => format!(
            "{symbol} demonstrates solid performance metrics and favorable market conditions. The stock appears undervalued relative to its peers and shows promising growth trajectory."
        ),
        Recommendation::Hold => format!(
            "{symbol} currently trades at a fair valuation. While there are some positive indicators, there are also potential headwinds that suggest caution. Existing investors should maintain positions but new investments should be carefully considered."
        ),
        Recommendation::Sell => format!(
            "{symbol} faces significant challenges that may impact future performance. Technical indicators suggest downward pressure, and the risk-reward profile has deteriorated."
        ),
        Recommendation::StrongSell => format!(
            "{symbol} shows concerning fundamentals and negative technical trends. Our analysis indicates high risk and potential for significant downside in the near to medium term."
        ),
    }
}

pub fn technical_summary(symbol: &str, indicators: &[IndicatorReading], flavor: Flavor) -> String {
    let total = indicators.len();

    match TechnicalTone::of(indicators) {
        TechnicalTone::Bullish => format!(
            "Technical indicators for {symbol} are predominantly bullish, with {} out of {total} showing buy signals. The stock is trading {} key moving averages, suggesting positive momentum.",
            Signal::Buy.count_in(indicators),
            if flavor.firm_trend { "above" } else { "near" },
        ),
        TechnicalTone::Bearish => format!(
            "Technical indicators for {symbol} are predominantly bearish, with {} out of {total} showing sell signals. The stock is trading {} key support levels, suggesting potential downside risk.",
            Signal::Sell.count_in(indicators),
            if flavor.firm_trend { "below" } else { "near" },
        ),
        TechnicalTone::Mixed => format!(
            "Technical indicators for {symbol} are mixed, with equal buy and sell signals. The stock is in a consolidation phase, and a breakout in either direction could determine the next trend."
        ),
    }
}

pub fn sentiment_summary(score: f64, symbol: &str) -> String {
    if score > 0.3 {
        format!("Market sentiment for {symbol} is strongly positive, with favorable coverage in news and social media. Analyst ratings have been upgraded recently, and institutional investors have been increasing their positions.")
    } else if score > 0.0 {
        format!("Market sentiment for {symbol} is mildly positive, with mixed but generally favorable coverage. Some analysts remain cautious, but the overall sentiment trend is improving.")
    } else if score > -0.3 {
        format!("Market sentiment for {symbol} is slightly negative, with some concerns expressed in recent coverage. Analyst opinions are mixed, and social media sentiment shows some skepticism.")
    } else {
        format!("Market sentiment for {symbol} is decidedly negative, with unfavorable coverage across multiple channels. Analyst downgrades and negative news have contributed to the bearish sentiment.")
    }
}

pub fn risk_summary(risk: RiskLevel, symbol: &str) -> String {
    match risk {
        RiskLevel::Low => format!(
            "{symbol} presents a relatively low-risk investment profile. The company has stable financials, operates in a predictable market environment, and has demonstrated resilience during market downturns."
        ),
        RiskLevel::Medium => format!(
            "{symbol} carries a moderate level of risk. While the company has solid fundamentals, there are some external factors and market conditions that could impact performance in the short to medium term."
        ),
        RiskLevel::High => format!(
            "{symbol} exhibits a high-risk profile. The company faces significant challenges including market volatility, competitive pressures, and potential financial constraints that could affect future performance."
        ),
    }
}

pub fn risk_factor_description(detail: RiskDetail) -> String {
    match detail {
        RiskDetail::MarketVolatility => {
            "Risk associated with overall market conditions and volatility.".to_string()
        }
        RiskDetail::SectorPerformance { sector, outperforming } => format!(
            "The {sector} sector has been {} the market.",
            if outperforming { "outperforming" } else { "underperforming" },
        ),
        RiskDetail::FinancialHealth { strong } => format!(
            "Company has {} financial indicators.",
            if strong { "strong" } else { "concerning" },
        ),
        RiskDetail::Competition { significant } => format!(
            "Faces {} competition in its market segment.",
            if significant { "significant" } else { "moderate" },
        ),
    }
}
