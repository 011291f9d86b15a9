//! Deterministic "AI analysis" reports derived from a ticker symbol.
//!
//! Every value in a report comes from a seeded draw sequence, so the same
//! symbol always yields the same report. Narrative text is selected from the
//! already-drawn metrics and can never contradict them.

pub mod metrics;
pub mod narrative;
pub mod report;
pub mod sequence;

#[cfg(test)]
mod report_tests;

pub use metrics::*;
pub use report::*;
pub use sequence::*;
