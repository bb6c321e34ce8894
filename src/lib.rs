//! Heuristic tactic analysis for short-form video scripts.
//!
//! This is the offline path: keyword and regex matching against a fixed
//! tactic catalog, cross-script synthesis, and per-topic reference profiles.
//! Output serializes to the same camelCase JSON as the hosted analysis.

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod consistency;
pub mod error;
pub mod fallback;
pub mod profile;
pub mod synthesis;

use once_cell::sync::Lazy;

pub use analyzer::{
    EmotionalTone, KeywordDetector, ProportionalSplitter, ScriptAnalysis, ScriptAnalyzer,
    ScriptSection, SectionBounds, SectionKind, SectionSplitter, TacticDetector,
};
pub use catalog::{Tactic, TacticCategory};
pub use config::Hyperparameters;
pub use error::{ConfigError, ProfileError};
pub use fallback::FallbackAnalysis;
pub use profile::{ProfileEngine, Progress, ReferenceScriptProfile};
pub use synthesis::{synthesize, Synthesis};

static DEFAULT_ANALYZER: Lazy<ScriptAnalyzer> = Lazy::new(ScriptAnalyzer::default);

/// Analyze one script with the default hyperparameters.
pub fn analyze(script: &str) -> ScriptAnalysis {
    DEFAULT_ANALYZER.analyze(script)
}
