//! Cross-script synthesis: which tactics recur, a template structure sized
//! to the average script, and a few one-line insights.

use serde::{Deserialize, Serialize};

use crate::analyzer::{ProportionalSplitter, ScriptAnalysis, ScriptSection, SectionKind};
use crate::catalog::Tactic;
use crate::config::Hyperparameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synthesis {
    pub common_tactics: Vec<Tactic>,
    pub average_structure: Vec<ScriptSection>,
    pub insights: Vec<String>,
}

/// Insertion-ordered counter. Ties in [`Tally::top`] go to the key seen first.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    pub(crate) fn top(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, count) in self.iter() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best
    }
}

fn placeholder_content(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Hook => "Analyzed hook patterns from your scripts",
        SectionKind::Problem => "Common problem framing across your scripts",
        SectionKind::Solution => "Solution patterns identified in your scripts",
        SectionKind::DetailsCta => "Closing and call-to-action patterns from your scripts",
    }
}

pub fn synthesize(analyses: &[ScriptAnalysis]) -> Synthesis {
    synthesize_with(analyses, &Hyperparameters::default())
}

pub fn synthesize_with(analyses: &[ScriptAnalysis], hp: &Hyperparameters) -> Synthesis {
    let n = analyses.len();
    // Simple majority, rounding up: ceil(n / 2).
    let threshold = n.div_ceil(2);

    let mut tactic_counts: Tally<&str> = Tally::new();
    let mut first_seen: Vec<&Tactic> = Vec::new();
    for analysis in analyses {
        for tactic in &analysis.tactics {
            tactic_counts.add(tactic.name.as_str());
            if !first_seen.iter().any(|t| t.name == tactic.name) {
                first_seen.push(tactic);
            }
        }
    }

    let common_tactics: Vec<Tactic> = tactic_counts
        .iter()
        .filter(|(_, count)| *count >= threshold)
        .filter_map(|(name, _)| first_seen.iter().find(|t| t.name == *name))
        .map(|t| (*t).clone())
        .collect();

    let average_words = if n == 0 {
        0
    } else {
        let total: usize = analyses.iter().map(|a| a.word_count).sum();
        (total as f64 / n as f64).round() as usize
    };

    let sizes = ProportionalSplitter::from_hyperparameters(hp).sizes(average_words);
    let average_structure = SectionKind::ORDER
        .iter()
        .zip(sizes)
        .map(|(&kind, words)| {
            let (start, end) = kind.time_range();
            ScriptSection {
                kind,
                content: placeholder_content(kind).to_string(),
                start_time: start.to_string(),
                end_time: end.to_string(),
                tactics: kind.typical_tactics().iter().map(|s| s.to_string()).collect(),
                word_count: words,
            }
        })
        .collect();

    let mut insights = Vec::new();
    if n > 0 {
        insights.push(format!(
            "Your scripts average {average_words} words (about {} min spoken)",
            (average_words as f64 / hp.words_per_minute).round() as u64
        ));
    }
    if let Some((name, count)) = tactic_counts.top() {
        insights.push(format!(
            "Most frequently used tactic: {name} ({count} of {n} scripts)"
        ));
    }
    let mut tone_counts = Tally::new();
    for tone in analyses.iter().flat_map(|a| a.emotional_tone.iter()) {
        tone_counts.add(*tone);
    }
    if let Some((tone, _)) = tone_counts.top() {
        insights.push(format!("Dominant emotional tone: {tone}"));
    }

    tracing::debug!(
        scripts = n,
        common = common_tactics.len(),
        insights = insights.len(),
        "synthesized analyses"
    );

    Synthesis {
        common_tactics,
        average_structure,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::EmotionalTone;
    use crate::catalog;

    fn analysis(tactics: &[&str], tones: &[EmotionalTone], words: usize) -> ScriptAnalysis {
        ScriptAnalysis {
            tactics: tactics
                .iter()
                .map(|n| catalog::by_name(n).unwrap().clone())
                .collect(),
            structure: Vec::new(),
            word_count: words,
            estimated_duration: 0,
            key_phrases: Vec::new(),
            emotional_tone: tones.to_vec(),
        }
    }

    fn names(s: &Synthesis) -> Vec<&str> {
        s.common_tactics.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn two_scripts_threshold_is_one() {
        let s = synthesize(&[
            analysis(&["Social Proof", "Scarcity"], &[], 100),
            analysis(&["Social Proof"], &[], 100),
        ]);
        assert_eq!(names(&s), vec!["Social Proof", "Scarcity"]);
    }

    #[test]
    fn three_scripts_threshold_is_two() {
        let s = synthesize(&[
            analysis(&["Social Proof", "Scarcity"], &[], 100),
            analysis(&["Social Proof", "Open Loop"], &[], 100),
            analysis(&["Anchoring"], &[], 100),
        ]);
        assert_eq!(names(&s), vec!["Social Proof"]);
    }

    #[test]
    fn first_occurrence_is_kept() {
        let mut first = analysis(&["Scarcity"], &[], 10);
        first.tactics[0].description = "edited".to_string();
        let s = synthesize(&[first, analysis(&["Scarcity"], &[], 10)]);
        assert_eq!(s.common_tactics.len(), 1);
        assert_eq!(s.common_tactics[0].description, "edited");
    }

    #[test]
    fn average_structure_uses_average_word_count() {
        let s = synthesize(&[analysis(&[], &[], 80), analysis(&[], &[], 120)]);
        let sizes: Vec<_> = s.average_structure.iter().map(|x| x.word_count).collect();
        assert_eq!(sizes, vec![15, 25, 35, 25]);
        assert_eq!(s.average_structure[0].content, "Analyzed hook patterns from your scripts");
        assert!(s.average_structure[0]
            .tactics
            .contains(&"Information Gap Hook".to_string()));
    }

    #[test]
    fn insights_pick_first_on_ties() {
        let s = synthesize(&[
            analysis(&["Scarcity", "Social Proof"], &[EmotionalTone::Urgency], 140),
            analysis(&["Social Proof", "Scarcity"], &[EmotionalTone::Social], 140),
        ]);
        assert_eq!(s.insights.len(), 3);
        assert_eq!(s.insights[0], "Your scripts average 140 words (about 1 min spoken)");
        assert_eq!(s.insights[1], "Most frequently used tactic: Scarcity (2 of 2 scripts)");
        assert_eq!(s.insights[2], "Dominant emotional tone: urgency");
    }

    #[test]
    fn missing_data_omits_insights() {
        let s = synthesize(&[analysis(&[], &[], 50)]);
        assert_eq!(s.insights.len(), 1);
        assert!(s.common_tactics.is_empty());
    }

    #[test]
    fn empty_input() {
        let s = synthesize(&[]);
        assert!(s.common_tactics.is_empty());
        assert!(s.insights.is_empty());
        assert_eq!(s.average_structure.len(), 4);
        assert!(s.average_structure.iter().all(|x| x.word_count == 0));
    }

    #[test]
    fn tally_counts_in_insertion_order() {
        let mut t = Tally::new();
        for k in ["b", "a", "b", "a", "c"] {
            t.add(k);
        }
        let seen: Vec<_> = t.iter().map(|(k, c)| (*k, c)).collect();
        assert_eq!(seen, vec![("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(t.top(), Some((&"b", 2)));
    }
}
