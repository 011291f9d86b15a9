use std::sync::Arc;

use analysis_core::{
    AnalysisReport, PriceLookup, RiskAnalysis, RiskFactor, RiskLevel, SentimentAnalysis,
    TechnicalAnalysis,
};

use crate::narrative::{self, Flavor};
use crate::{derive_metrics, DerivedMetrics, SeededSequence, DEFAULT_BASE_PRICE};

/// Generates reports against a shared price lookup.
#[derive(Clone)]
pub struct AnalysisGenerator {
    prices: Arc<dyn PriceLookup>,
}

impl AnalysisGenerator {
    pub fn new(prices: Arc<dyn PriceLookup>) -> Self {
        Self { prices }
    }

    pub fn generate(&self, symbol: &str) -> AnalysisReport {
        generate_analysis(symbol, self.prices.as_ref())
    }
}

/// Build the full report for `symbol`.
///
/// Total and deterministic: the symbol is used exactly as supplied, unknown
/// symbols are anchored to the default base price, and nothing here fails.
pub fn generate_analysis(symbol: &str, prices: &dyn PriceLookup) -> AnalysisReport {
    let base_price = resolve_base_price(prices.price_of(symbol));
    let mut seq = SeededSequence::from_symbol(symbol);

    let metrics = derive_metrics(&mut seq, base_price);
    let flavor = draw_flavor(&mut seq);
    let report = assemble(symbol, &metrics, flavor);

    tracing::debug!(
        "Generated analysis for {:?} (seed {}, {} draws): {} target {:.2}, {}",
        symbol,
        seq.seed(),
        seq.draws_taken(),
        report.recommendation.to_label(),
        report.price_target,
        report.time_horizon.to_label()
    );

    debug_check_invariants(&report);
    report
}

fn resolve_base_price(price: Option<f64>) -> f64 {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Cosmetic draws, taken after every structured draw.
fn draw_flavor(seq: &mut SeededSequence) -> Flavor {
    Flavor {
        strong_fundamentals: seq.next_draw() > 0.5,
        positive_technicals: seq.next_draw() > 0.5,
        firm_trend: seq.next_draw() > 0.5,
    }
}

fn assemble(symbol: &str, metrics: &DerivedMetrics, flavor: Flavor) -> AnalysisReport {
    let risk_factors = metrics
        .risks
        .iter()
        .map(|risk| RiskFactor {
            name: risk.category,
            level: risk.level,
            description: narrative::risk_factor_description(risk.detail),
        })
        .collect();

    AnalysisReport {
        symbol: symbol.to_string(),
        summary: narrative::summary(
            symbol,
            metrics.recommendation,
            metrics.price_target,
            metrics.base_price,
            flavor,
        ),
        recommendation: metrics.recommendation,
        recommendation_reason: narrative::recommendation_reason(metrics.recommendation, symbol),
        price_target: metrics.price_target,
        confidence: metrics.confidence,
        time_horizon: metrics.time_horizon,
        technical_analysis: TechnicalAnalysis {
            summary: narrative::technical_summary(symbol, &metrics.indicators, flavor),
            indicators: metrics.indicators.clone(),
        },
        sentiment_analysis: SentimentAnalysis {
            summary: narrative::sentiment_summary(metrics.sentiment_score, symbol),
            score: metrics.sentiment_score,
            sources: metrics.sentiment_sources.clone(),
        },
        risk_analysis: RiskAnalysis {
            summary: narrative::risk_summary(metrics.overall_risk, symbol),
            overall_risk: metrics.overall_risk,
            risk_score: metrics.risk_score,
            risk_factors,
        },
    }
}

/// Cross-field invariants. A violation is a bug in this crate.
fn debug_check_invariants(report: &AnalysisReport) {
    debug_assert!((60..=99).contains(&report.confidence));
    debug_assert!(report.risk_analysis.risk_score <= 99);
    debug_assert!(report.price_target >= 0.0);
    debug_assert_eq!(
        report.risk_analysis.overall_risk,
        RiskLevel::from_score(report.risk_analysis.risk_score)
    );
    debug_assert_eq!(
        report.sentiment_analysis.score,
        crate::mean_sentiment(&report.sentiment_analysis.sources)
    );
    debug_assert!((-1.0..=1.0).contains(&report.sentiment_analysis.score));
    debug_assert_eq!(report.technical_analysis.indicators.len(), 4);
    debug_assert_eq!(report.sentiment_analysis.sources.len(), 4);
    debug_assert_eq!(report.risk_analysis.risk_factors.len(), 4);
}
