//! Reference profiles: per-topic style statistics aggregated from one or
//! more example scripts, kept in an engine-owned in-memory store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analyzer::{self, EmotionalTone, ScriptAnalysis, ScriptAnalyzer, SectionKind};
use crate::catalog::Tactic;
use crate::config::Hyperparameters;
use crate::consistency::{self, ConsistencyRule, RuleContext};
use crate::error::ProfileError;
use crate::synthesis::Tally;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceLength {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookStyle {
    Question,
    Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePatterns {
    pub sentence_length: SentenceLength,
    pub average_sentence_words: f64,
    pub hook_style: HookStyle,
    /// Opening sentences written in the winning hook style.
    pub hook_examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructurePreference {
    pub section: SectionKind,
    /// Share of the average script, in whole percent.
    pub average_percentage: u32,
    pub common_tactics: Vec<String>,
    pub typical_phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceScriptProfile {
    pub id: String,
    pub topic: String,
    pub common_tactics: Vec<Tactic>,
    pub style_patterns: StylePatterns,
    pub key_phrases: Vec<String>,
    pub emotional_tone: Vec<EmotionalTone>,
    pub average_word_count: usize,
    pub structure_preferences: Vec<StructurePreference>,
    pub script_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Progress notification. Delivered synchronously while the work runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub stage: &'static str,
    /// Completed share of the current operation, in `0.0..=1.0`.
    pub fraction: f64,
}

impl Progress {
    pub(crate) fn new(stage: &'static str, fraction: f64) -> Self {
        Self {
            stage,
            fraction: fraction.clamp(0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Lowercase slug with runs of anything non-alphanumeric collapsed to `_`.
pub fn slugify(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    let mut pending_sep = false;
    for c in topic.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("profile");
    }
    slug
}

/// Items present in at least `ratio` of `n` analyses. A single analysis
/// keeps everything.
fn keep_frequent<K: Eq + Clone>(tally: &Tally<K>, n: usize, ratio: f64) -> Vec<K> {
    tally
        .iter()
        .filter(|(_, count)| n <= 1 || *count as f64 / n as f64 >= ratio - f64::EPSILON)
        .map(|(k, _)| k.clone())
        .collect()
}

fn common_tactics(analyses: &[ScriptAnalysis], hp: &Hyperparameters) -> Vec<Tactic> {
    let mut tally: Tally<&str> = Tally::new();
    for a in analyses {
        for t in &a.tactics {
            tally.add(t.name.as_str());
        }
    }
    keep_frequent(&tally, analyses.len(), hp.profile_tactic_ratio)
        .into_iter()
        .filter_map(|name| {
            analyses
                .iter()
                .flat_map(|a| a.tactics.iter())
                .find(|t| t.name == name)
                .cloned()
        })
        .collect()
}

fn emotional_tone(analyses: &[ScriptAnalysis], hp: &Hyperparameters) -> Vec<EmotionalTone> {
    let mut tally = Tally::new();
    for tone in analyses.iter().flat_map(|a| a.emotional_tone.iter()) {
        tally.add(*tone);
    }
    keep_frequent(&tally, analyses.len(), hp.profile_tone_ratio)
}

fn style_patterns<S: AsRef<str>>(scripts: &[S], hp: &Hyperparameters) -> StylePatterns {
    let mut sentence_count = 0usize;
    let mut sentence_words = 0usize;
    for script in scripts {
        for sentence in analyzer::sentences(script.as_ref()) {
            sentence_count += 1;
            sentence_words += analyzer::word_count(sentence);
        }
    }
    let average_sentence_words = if sentence_count == 0 {
        0.0
    } else {
        sentence_words as f64 / sentence_count as f64
    };
    let sentence_length = if average_sentence_words < hp.short_sentence_words {
        SentenceLength::Short
    } else if average_sentence_words < hp.medium_sentence_words {
        SentenceLength::Medium
    } else {
        SentenceLength::Long
    };

    let mut questions = Vec::new();
    let mut statements = Vec::new();
    for script in scripts {
        let first = analyzer::sentences_with_terminators(script.as_ref())
            .into_iter()
            .next();
        if let Some((body, terminator)) = first {
            if terminator.contains('?') {
                questions.push(format!("{body}{terminator}"));
            } else {
                statements.push(format!("{body}{terminator}"));
            }
        }
    }
    let (hook_style, mut hook_examples) = if questions.len() > statements.len() {
        (HookStyle::Question, questions)
    } else {
        (HookStyle::Statement, statements)
    };
    hook_examples.truncate(hp.hook_example_limit);

    StylePatterns {
        sentence_length,
        average_sentence_words: (average_sentence_words * 10.0).round() / 10.0,
        hook_style,
        hook_examples,
    }
}

fn repeated_key_phrases(analyses: &[ScriptAnalysis], hp: &Hyperparameters) -> Vec<String> {
    let mut tally: Tally<&str> = Tally::new();
    for a in analyses {
        // Count each phrase once per script.
        let mut seen: Vec<&str> = Vec::new();
        for phrase in &a.key_phrases {
            if !seen.contains(&phrase.as_str()) {
                seen.push(phrase.as_str());
                tally.add(phrase.as_str());
            }
        }
    }
    let mut repeated: Vec<(&str, usize)> = tally
        .iter()
        .filter(|(_, count)| *count >= hp.profile_phrase_min_scripts)
        .map(|(p, c)| (*p, c))
        .collect();
    // Stable: equal counts keep first-seen order.
    repeated.sort_by(|a, b| b.1.cmp(&a.1));
    repeated
        .into_iter()
        .take(hp.profile_phrase_limit)
        .map(|(p, _)| p.to_string())
        .collect()
}

fn structure_preferences(analyses: &[ScriptAnalysis]) -> Vec<StructurePreference> {
    let averages: Vec<f64> = SectionKind::ORDER
        .iter()
        .map(|&kind| {
            let counts: Vec<usize> = analyses
                .iter()
                .filter_map(|a| a.section(kind))
                .map(|s| s.word_count)
                .collect();
            if counts.is_empty() {
                0.0
            } else {
                counts.iter().sum::<usize>() as f64 / counts.len() as f64
            }
        })
        .collect();
    let total: f64 = averages.iter().sum();

    SectionKind::ORDER
        .iter()
        .zip(averages)
        .map(|(&kind, avg)| StructurePreference {
            section: kind,
            average_percentage: if total > 0.0 {
                (avg / total * 100.0).round() as u32
            } else {
                0
            },
            common_tactics: kind.typical_tactics().iter().map(|s| s.to_string()).collect(),
            // Never populated yet.
            typical_phrases: Vec::new(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Store {
    by_id: HashMap<String, ReferenceScriptProfile>,
    order: Vec<String>,
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Builds and holds reference profiles. Construct one per application and
/// share it (`Arc<ProfileEngine>`); the store is lock-guarded.
pub struct ProfileEngine {
    analyzer: ScriptAnalyzer,
    rules: Vec<Box<dyn ConsistencyRule>>,
    clock: Clock,
    store: RwLock<Store>,
}

impl Default for ProfileEngine {
    fn default() -> Self {
        Self::new(ScriptAnalyzer::default())
    }
}

impl ProfileEngine {
    pub fn new(analyzer: ScriptAnalyzer) -> Self {
        Self {
            analyzer,
            rules: consistency::default_rules(),
            clock: Box::new(Utc::now),
            store: RwLock::new(Store::default()),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Box<dyn ConsistencyRule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn analyzer(&self) -> &ScriptAnalyzer {
        &self.analyzer
    }

    fn analyze_all<S: AsRef<str>>(
        &self,
        scripts: &[S],
        on_progress: &mut dyn FnMut(Progress),
    ) -> Vec<ScriptAnalysis> {
        let n = scripts.len();
        scripts
            .iter()
            .enumerate()
            .map(|(i, script)| {
                let analysis = self.analyzer.analyze(script.as_ref());
                on_progress(Progress::new("analyzing", (i + 1) as f64 / n as f64));
                analysis
            })
            .collect()
    }

    pub fn create_reference_profile<S: AsRef<str>>(
        &self,
        topic: &str,
        scripts: &[S],
    ) -> Result<ReferenceScriptProfile, ProfileError> {
        self.create_reference_profile_with_progress(topic, scripts, |_| {})
    }

    pub fn create_reference_profile_with_progress<S: AsRef<str>>(
        &self,
        topic: &str,
        scripts: &[S],
        mut on_progress: impl FnMut(Progress),
    ) -> Result<ReferenceScriptProfile, ProfileError> {
        if scripts.is_empty() {
            return Err(ProfileError::NoScripts {
                topic: topic.to_string(),
            });
        }
        let hp = self.analyzer.hyperparameters();
        let analyses = self.analyze_all(scripts, &mut on_progress);

        let total_words: usize = analyses.iter().map(|a| a.word_count).sum();
        let now = (self.clock)();
        let profile = ReferenceScriptProfile {
            id: format!("{}_{}", slugify(topic), now.timestamp_millis()),
            topic: topic.to_string(),
            common_tactics: common_tactics(&analyses, hp),
            style_patterns: style_patterns(scripts, hp),
            key_phrases: repeated_key_phrases(&analyses, hp),
            emotional_tone: emotional_tone(&analyses, hp),
            average_word_count: (total_words as f64 / analyses.len() as f64).round() as usize,
            structure_preferences: structure_preferences(&analyses),
            script_count: analyses.len(),
            created_at: now,
            updated_at: now,
        };

        {
            let mut store = self.store.write();
            if store.by_id.contains_key(&profile.id) {
                return Err(ProfileError::DuplicateId { id: profile.id });
            }
            store.order.push(profile.id.clone());
            store.by_id.insert(profile.id.clone(), profile.clone());
        }
        on_progress(Progress::new("complete", 1.0));
        tracing::info!(
            id = %profile.id,
            scripts = profile.script_count,
            tactics = profile.common_tactics.len(),
            "created reference profile"
        );
        Ok(profile)
    }

    /// Look up by id first, then by case-insensitive topic in creation order.
    pub fn get_reference_profile(&self, topic_or_id: &str) -> Option<ReferenceScriptProfile> {
        let store = self.store.read();
        if let Some(p) = store.by_id.get(topic_or_id) {
            return Some(p.clone());
        }
        let wanted = topic_or_id.to_lowercase();
        store
            .order
            .iter()
            .filter_map(|id| store.by_id.get(id))
            .find(|p| p.topic.to_lowercase() == wanted)
            .cloned()
    }

    /// Snapshot of every profile, in creation order.
    pub fn list_profiles(&self) -> Vec<ReferenceScriptProfile> {
        let store = self.store.read();
        store
            .order
            .iter()
            .filter_map(|id| store.by_id.get(id))
            .cloned()
            .collect()
    }

    pub fn update_profile<S: AsRef<str>>(
        &self,
        id: &str,
        additional_scripts: &[S],
    ) -> Result<ReferenceScriptProfile, ProfileError> {
        self.update_profile_with_progress(id, additional_scripts, |_| {})
    }

    /// Analyzes `additional_scripts` and bumps `updatedAt`. The new analyses
    /// are not merged into the stored statistics.
    pub fn update_profile_with_progress<S: AsRef<str>>(
        &self,
        id: &str,
        additional_scripts: &[S],
        mut on_progress: impl FnMut(Progress),
    ) -> Result<ReferenceScriptProfile, ProfileError> {
        if !self.store.read().by_id.contains_key(id) {
            return Err(ProfileError::NotFound { id: id.to_string() });
        }
        let analyses = self.analyze_all(additional_scripts, &mut on_progress);
        tracing::warn!(
            id,
            scripts = analyses.len(),
            "profile update analyzed new scripts without merging statistics"
        );

        let now = (self.clock)();
        let updated = {
            let mut store = self.store.write();
            let profile = store
                .by_id
                .get_mut(id)
                .ok_or_else(|| ProfileError::NotFound { id: id.to_string() })?;
            profile.updated_at = now;
            profile.clone()
        };
        on_progress(Progress::new("complete", 1.0));
        Ok(updated)
    }

    pub fn delete_profile(&self, id: &str) -> Result<ReferenceScriptProfile, ProfileError> {
        let mut store = self.store.write();
        let removed = store
            .by_id
            .remove(id)
            .ok_or_else(|| ProfileError::NotFound { id: id.to_string() })?;
        store.order.retain(|other| other != id);
        tracing::info!(id, "deleted reference profile");
        Ok(removed)
    }

    pub fn generate_consistent_script(
        &self,
        profile: &ReferenceScriptProfile,
        user_prompt: &str,
        base_script: &str,
    ) -> String {
        self.generate_consistent_script_with_progress(profile, user_prompt, base_script, |_| {})
    }

    /// Runs `base_script` through the engine's consistency rules in order.
    pub fn generate_consistent_script_with_progress(
        &self,
        profile: &ReferenceScriptProfile,
        user_prompt: &str,
        base_script: &str,
        mut on_progress: impl FnMut(Progress),
    ) -> String {
        let ctx = RuleContext {
            profile,
            user_prompt,
        };
        consistency::apply_rules(&self.rules, &ctx, base_script, &mut on_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HOOKS: [&str; 3] = [
        "Why do most diets fail? The secret is consistency. Follow for more tips.",
        "What if you could sleep better tonight? Everyone deserves rest. Try it today.",
        "Here is my morning routine. It takes ten minutes. Save this video.",
    ];

    fn fixed_engine() -> ProfileEngine {
        ProfileEngine::default().with_clock(|| Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("Weight Loss: Tips & Tricks!"), "weight_loss_tips_tricks");
        assert_eq!(slugify("  Fitness  "), "fitness");
        assert_eq!(slugify("???"), "profile");
    }

    #[test]
    fn single_script_keeps_everything() {
        let engine = ProfileEngine::default();
        let analysis = engine.analyzer().analyze(HOOKS[1]);
        let profile = engine.create_reference_profile("Sleep", &[HOOKS[1]]).unwrap();
        let names: Vec<_> = profile.common_tactics.iter().map(|t| &t.name).collect();
        let expected: Vec<_> = analysis.tactics.iter().map(|t| &t.name).collect();
        assert_eq!(names, expected);
        assert_eq!(profile.emotional_tone, analysis.emotional_tone);
        assert_eq!(profile.average_word_count, analysis.word_count);
        assert_eq!(profile.script_count, 1);
    }

    #[test]
    fn id_is_slug_and_millis() {
        let profile = fixed_engine().create_reference_profile("Sleep Hacks", &HOOKS).unwrap();
        assert_eq!(profile.id, "sleep_hacks_1700000000000");
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[test]
    fn same_topic_same_millisecond_collides() {
        let engine = fixed_engine();
        engine.create_reference_profile("Sleep", &HOOKS).unwrap();
        let err = engine.create_reference_profile("sleep", &HOOKS).unwrap_err();
        assert_eq!(
            err,
            ProfileError::DuplicateId {
                id: "sleep_1700000000000".to_string()
            }
        );
        assert_eq!(engine.list_profiles().len(), 1);
    }

    #[test]
    fn no_scripts_is_an_error() {
        let scripts: [&str; 0] = [];
        let err = ProfileEngine::default()
            .create_reference_profile("Empty", &scripts)
            .unwrap_err();
        assert!(matches!(err, ProfileError::NoScripts { .. }));
    }

    #[test]
    fn hook_style_majority_vote() {
        let style = style_patterns(&HOOKS, &Hyperparameters::default());
        assert_eq!(style.hook_style, HookStyle::Question);
        assert_eq!(
            style.hook_examples,
            vec!["Why do most diets fail?", "What if you could sleep better tonight?"]
        );
    }

    #[test]
    fn hook_style_tie_is_statement() {
        let style = style_patterns(&[HOOKS[0], HOOKS[2]], &Hyperparameters::default());
        assert_eq!(style.hook_style, HookStyle::Statement);
        assert_eq!(style.hook_examples, vec!["Here is my morning routine."]);
    }

    #[test]
    fn hook_examples_are_capped() {
        let scripts = ["One?", "Two?", "Three?", "Four?"];
        let style = style_patterns(&scripts, &Hyperparameters::default());
        assert_eq!(style.hook_examples.len(), 3);
    }

    #[test]
    fn sentence_length_buckets() {
        let hp = Hyperparameters::default();
        let short = style_patterns(&["Go now. Do it. Win big today."], &hp);
        assert_eq!(short.sentence_length, SentenceLength::Short);
        assert_eq!(short.average_sentence_words, 2.3);
        let medium = style_patterns(&[vec!["word"; 12].join(" ")], &hp);
        assert_eq!(medium.sentence_length, SentenceLength::Medium);
        let long = style_patterns(&[vec!["word"; 25].join(" ")], &hp);
        assert_eq!(long.sentence_length, SentenceLength::Long);
    }

    #[test]
    fn tactic_ratio_applies_to_multiple_scripts() {
        let engine = ProfileEngine::default();
        let scripts = [
            "Stop scrolling. Thousands of people use this.",
            "Stop scrolling. Link in bio.",
            "Stop scrolling right now.",
        ];
        let profile = engine.create_reference_profile("Ratio", &scripts).unwrap();
        let names: Vec<_> = profile.common_tactics.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"Pattern Interrupt"));
        // One of three scripts is below the 60% bar.
        assert!(!names.contains(&"Social Proof"));
    }

    fn analysis(tactics: &[&str], tones: &[EmotionalTone]) -> ScriptAnalysis {
        ScriptAnalysis {
            tactics: tactics
                .iter()
                .map(|n| crate::catalog::by_name(n).unwrap().clone())
                .collect(),
            structure: Vec::new(),
            word_count: 0,
            estimated_duration: 0,
            key_phrases: Vec::new(),
            emotional_tone: tones.to_vec(),
        }
    }

    #[test]
    fn tone_kept_by_half_of_two_scripts() {
        let analyses = [
            analysis(&[], &[EmotionalTone::Urgency, EmotionalTone::Social]),
            analysis(&[], &[EmotionalTone::Social]),
        ];
        let tones = emotional_tone(&analyses, &Hyperparameters::default());
        assert_eq!(tones, vec![EmotionalTone::Urgency, EmotionalTone::Social]);
    }

    #[test]
    fn tone_needs_half_of_three_scripts() {
        let analyses = [
            analysis(&[], &[EmotionalTone::Urgency, EmotionalTone::Social]),
            analysis(&[], &[EmotionalTone::Social]),
            analysis(&[], &[EmotionalTone::Curiosity]),
        ];
        // Social is in 2 of 3; Urgency and Curiosity are in 1 of 3.
        let tones = emotional_tone(&analyses, &Hyperparameters::default());
        assert_eq!(tones, vec![EmotionalTone::Social]);
    }

    #[test]
    fn tactic_cutoff_at_three_of_five() {
        let analyses = [
            analysis(&["Scarcity", "Anchoring"], &[]),
            analysis(&["Scarcity", "Anchoring"], &[]),
            analysis(&["Scarcity"], &[]),
            analysis(&[], &[]),
            analysis(&[], &[]),
        ];
        let names: Vec<_> = common_tactics(&analyses, &Hyperparameters::default())
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Scarcity"]);
    }

    #[test]
    fn key_phrases_need_two_scripts() {
        let a = "The secret is sleep. Why you wake up tired. Unique line with the truth in it.";
        let b = "The secret is sleep. Why you wake up tired. Another truth nobody shares.";
        let c = "Why you wake up tired. Something else entirely here.";
        let profile = ProfileEngine::default()
            .create_reference_profile("Phrases", &[a, b, c])
            .unwrap();
        assert_eq!(
            profile.key_phrases,
            vec!["Why you wake up tired", "The secret is sleep"]
        );
    }

    #[test]
    fn structure_percentages() {
        let words = vec!["word"; 100].join(" ");
        let profile = ProfileEngine::default()
            .create_reference_profile("Shape", &[words.as_str()])
            .unwrap();
        let pct: Vec<_> = profile
            .structure_preferences
            .iter()
            .map(|p| p.average_percentage)
            .collect();
        assert_eq!(pct, vec![15, 25, 35, 25]);
        assert!(profile.structure_preferences.iter().all(|p| p.typical_phrases.is_empty()));
        assert!(profile.structure_preferences[0]
            .common_tactics
            .contains(&"Pattern Interrupt".to_string()));
    }

    #[test]
    fn progress_reaches_completion() {
        let mut seen = Vec::new();
        ProfileEngine::default()
            .create_reference_profile_with_progress("Progress", &HOOKS, |p| seen.push(p))
            .unwrap();
        let fractions: Vec<_> = seen.iter().map(|p| p.fraction).collect();
        assert_eq!(fractions.len(), 4);
        assert!((fractions[0] - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(seen.last().unwrap().stage, "complete");
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn lookup_by_id_then_topic() {
        let engine = ProfileEngine::default();
        let created = engine.create_reference_profile("Morning Routine", &HOOKS).unwrap();
        assert_eq!(engine.get_reference_profile(&created.id).unwrap().id, created.id);
        assert_eq!(
            engine.get_reference_profile("morning routine").unwrap().id,
            created.id
        );
        assert!(engine.get_reference_profile("evening routine").is_none());
    }

    #[test]
    fn update_only_bumps_timestamp() {
        let start = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let later = Utc.timestamp_millis_opt(1_700_000_500_000).unwrap();
        let ticks = parking_lot::Mutex::new(vec![later, start]);
        let engine = ProfileEngine::default().with_clock(move || {
            let mut t = ticks.lock();
            if t.len() > 1 {
                t.pop().unwrap()
            } else {
                t[0]
            }
        });
        let created = engine.create_reference_profile("Sleep", &[HOOKS[0]]).unwrap();
        let updated = engine
            .update_profile(&created.id, &["Completely different script about cars."])
            .unwrap();
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.common_tactics, created.common_tactics);
        assert_eq!(updated.script_count, 1);
    }

    #[test]
    fn update_unknown_profile() {
        let err = ProfileEngine::default()
            .update_profile("missing", &["x"])
            .unwrap_err();
        assert_eq!(err, ProfileError::NotFound { id: "missing".to_string() });
    }

    #[test]
    fn delete_removes_from_store() {
        let engine = ProfileEngine::default();
        let a = engine.create_reference_profile("Alpha", &HOOKS).unwrap();
        let b = engine.create_reference_profile("Beta", &HOOKS).unwrap();
        engine.delete_profile(&a.id).unwrap();
        let ids: Vec<_> = engine.list_profiles().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id]);
        assert!(engine.get_reference_profile("alpha").is_none());
        assert!(matches!(
            engine.delete_profile(&a.id),
            Err(ProfileError::NotFound { .. })
        ));
    }

    #[test]
    fn list_keeps_creation_order() {
        let engine = ProfileEngine::default();
        for topic in ["Gamma", "Alpha", "Beta"] {
            engine.create_reference_profile(topic, &HOOKS).unwrap();
        }
        let topics: Vec<_> = engine.list_profiles().into_iter().map(|p| p.topic).collect();
        assert_eq!(topics, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(ProfileEngine::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .create_reference_profile(&format!("Topic {i}"), &HOOKS)
                        .unwrap()
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(engine.list_profiles().len(), 4);
    }
}
