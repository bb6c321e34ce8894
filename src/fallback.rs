//! Offline stand-in for the LLM analysis response.
//!
//! Serializes to the same JSON the hosted analysis returns, so callers can
//! swap one for the other without branching.

use serde::{Deserialize, Serialize};

use crate::analyzer::{ScriptAnalysis, SectionKind};
use crate::catalog::TacticCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackTactic {
    pub name: String,
    pub category: TacticCategory,
    pub description: String,
    pub strength: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackStructure {
    pub hook: String,
    pub problem: String,
    pub solution: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackAnalysis {
    pub tactics: Vec<FallbackTactic>,
    pub structure: FallbackStructure,
}

pub fn from_analysis(analysis: &ScriptAnalysis) -> FallbackAnalysis {
    let tactics = analysis
        .tactics
        .iter()
        .map(|t| FallbackTactic {
            name: t.name.clone(),
            category: t.category,
            description: t.description.clone(),
            strength: t.effectiveness,
        })
        .collect();

    let content = |kind: SectionKind| {
        analysis
            .section(kind)
            .map(|s| s.content.clone())
            .unwrap_or_default()
    };

    FallbackAnalysis {
        tactics,
        structure: FallbackStructure {
            hook: content(SectionKind::Hook),
            problem: content(SectionKind::Problem),
            solution: content(SectionKind::Solution),
            cta: content(SectionKind::DetailsCta),
        },
    }
}
