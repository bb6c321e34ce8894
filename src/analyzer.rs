use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Tactic, TacticCategory};
use crate::config::Hyperparameters;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Hook,
    Problem,
    Solution,
    #[serde(rename = "Details & CTA")]
    DetailsCta,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 4] = [
        SectionKind::Hook,
        SectionKind::Problem,
        SectionKind::Solution,
        SectionKind::DetailsCta,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hook => "Hook",
            SectionKind::Problem => "Problem",
            SectionKind::Solution => "Solution",
            SectionKind::DetailsCta => "Details & CTA",
        }
    }

    /// Display range shown next to the section. Not derived from pacing.
    pub fn time_range(self) -> (&'static str, &'static str) {
        match self {
            SectionKind::Hook => ("0:00", "0:03"),
            SectionKind::Problem => ("0:03", "0:10"),
            SectionKind::Solution => ("0:10", "0:25"),
            SectionKind::DetailsCta => ("0:25", "end"),
        }
    }

    /// Categories checked when detecting tactics inside this section.
    pub fn detection_categories(self) -> &'static [TacticCategory] {
        match self {
            SectionKind::Hook => &[TacticCategory::Hook],
            SectionKind::Problem => &[TacticCategory::Emotional],
            SectionKind::Solution => &[TacticCategory::Persuasion, TacticCategory::Monetization],
            SectionKind::DetailsCta => &[TacticCategory::Retention, TacticCategory::Algorithm],
        }
    }

    /// Tactic names conventionally used in this section. Editorial, not
    /// derived from any analysis.
    pub fn typical_tactics(self) -> &'static [&'static str] {
        match self {
            SectionKind::Hook => &["Information Gap Hook", "Pattern Interrupt", "Bold Claim Hook"],
            SectionKind::Problem => &["Pain Point Agitation", "Empathy Bridge"],
            SectionKind::Solution => &["Problem-Solution Frame", "Social Proof", "Soft Pitch"],
            SectionKind::DetailsCta => &["Open Loop", "Scarcity", "Follow for More"],
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    Excitement,
    Urgency,
    Curiosity,
    Authority,
    Social,
}

impl EmotionalTone {
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionalTone::Excitement => "excitement",
            EmotionalTone::Urgency => "urgency",
            EmotionalTone::Curiosity => "curiosity",
            EmotionalTone::Authority => "authority",
            EmotionalTone::Social => "social",
        }
    }
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub content: String,
    pub start_time: String,
    pub end_time: String,
    pub tactics: Vec<String>,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptAnalysis {
    pub tactics: Vec<Tactic>,
    pub structure: Vec<ScriptSection>,
    pub word_count: usize,
    /// Minutes at the configured speaking pace, rounded.
    pub estimated_duration: u64,
    pub key_phrases: Vec<String>,
    pub emotional_tone: Vec<EmotionalTone>,
}

impl ScriptAnalysis {
    pub fn section(&self, kind: SectionKind) -> Option<&ScriptSection> {
        self.structure.iter().find(|s| s.kind == kind)
    }

    pub fn has_tactic(&self, name: &str) -> bool {
        self.tactics.iter().any(|t| t.name == name)
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Decides which of the candidate tactics a piece of text uses.
pub trait TacticDetector: Send + Sync {
    /// Returns the detected subset of `candidates`, in candidate order.
    fn detect<'a>(&self, text: &str, candidates: &[&'a Tactic]) -> Vec<&'a Tactic>;
}

/// Coarse substring matcher: a tactic is detected when the lowercased text
/// contains any long-enough word from any of its example phrases.
#[derive(Debug, Clone)]
pub struct KeywordDetector {
    min_chars: usize,
}

impl KeywordDetector {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    pub fn keywords(&self, tactic: &Tactic) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for example in &tactic.examples {
            for raw in example.split_whitespace() {
                let word = raw
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                if word.chars().count() >= self.min_chars && !out.contains(&word) {
                    out.push(word);
                }
            }
        }
        out
    }
}

impl Default for KeywordDetector {
    fn default() -> Self {
        Self::new(Hyperparameters::default().keyword_min_chars)
    }
}

impl TacticDetector for KeywordDetector {
    fn detect<'a>(&self, text: &str, candidates: &[&'a Tactic]) -> Vec<&'a Tactic> {
        let lower = text.to_lowercase();
        candidates
            .iter()
            .copied()
            .filter(|t| self.keywords(t).iter().any(|kw| lower.contains(kw.as_str())))
            .collect()
    }
}

/// End offsets (exclusive, in words) of the hook, problem and solution
/// sections. The details/CTA section runs to the end of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds(pub [usize; 3]);

/// Splits a tokenized script into the four structural sections.
pub trait SectionSplitter: Send + Sync {
    fn split(&self, words: &[&str]) -> SectionBounds;
}

/// Fixed-fraction split of the word count.
#[derive(Debug, Clone)]
pub struct ProportionalSplitter {
    pub hook: f64,
    pub problem: f64,
    pub solution: f64,
}

impl ProportionalSplitter {
    pub fn from_hyperparameters(hp: &Hyperparameters) -> Self {
        Self {
            hook: hp.hook_fraction,
            problem: hp.problem_fraction,
            solution: hp.solution_fraction,
        }
    }

    /// Section sizes for a total of `n` words. The last size absorbs rounding.
    pub fn sizes(&self, n: usize) -> [usize; 4] {
        let hook = (n as f64 * self.hook).floor() as usize;
        let problem = (n as f64 * self.problem).floor() as usize;
        let solution = (n as f64 * self.solution).floor() as usize;
        let used = (hook + problem + solution).min(n);
        [hook, problem, solution, n - used]
    }
}

impl Default for ProportionalSplitter {
    fn default() -> Self {
        Self::from_hyperparameters(&Hyperparameters::default())
    }
}

impl SectionSplitter for ProportionalSplitter {
    fn split(&self, words: &[&str]) -> SectionBounds {
        let [hook, problem, solution, _] = self.sizes(words.len());
        SectionBounds([hook, hook + problem, hook + problem + solution])
    }
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static KEY_PHRASE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Opens with a question word
        Regex::new(r"(?i)^(what|why|how|when|where|who|which)\b").unwrap(),
        // Absolutes and reveal words
        Regex::new(r"(?i)\b(secret|truth|never|always|nobody|everyone|mistake|proven)\b").unwrap(),
        // Canned hook lines
        Regex::new(
            r"(?i)(you won't believe|here's why|here's how|the reason|stop doing|this is how|what if|imagine|nobody tells you)",
        )
        .unwrap(),
    ]
});

struct ToneFamily {
    tone: EmotionalTone,
    keywords: &'static [&'static str],
}

const TONE_FAMILIES: &[ToneFamily] = &[
    ToneFamily {
        tone: EmotionalTone::Excitement,
        keywords: &[
            "amazing",
            "incredible",
            "unbelievable",
            "insane",
            "exciting",
            "breakthrough",
            "game changer",
            "wow",
        ],
    },
    ToneFamily {
        tone: EmotionalTone::Urgency,
        keywords: &[
            "now",
            "today",
            "hurry",
            "limited",
            "last chance",
            "deadline",
            "immediately",
            "don't miss",
        ],
    },
    ToneFamily {
        tone: EmotionalTone::Curiosity,
        keywords: &[
            "what if",
            "secret",
            "told you",
            "hidden",
            "discover",
            "mystery",
            "revealed",
            "truth",
        ],
    },
    ToneFamily {
        tone: EmotionalTone::Authority,
        keywords: &[
            "expert",
            "proven",
            "research",
            "studies",
            "science",
            "doctor",
            "years of",
            "certified",
        ],
    },
    ToneFamily {
        tone: EmotionalTone::Social,
        keywords: &[
            "everyone",
            "people",
            "thousands",
            "millions",
            "community",
            "join",
            "together",
            "others",
        ],
    },
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Non-empty trimmed sentences, split on runs of `.`, `!` and `?`.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Like [`sentences`] but keeps the terminator run (empty for a trailing
/// fragment with no punctuation).
pub(crate) fn sentences_with_terminators(text: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in SENTENCE_SPLIT_RE.find_iter(text) {
        let body = text[start..m.start()].trim();
        if !body.is_empty() {
            out.push((body, m.as_str()));
        }
        start = m.end();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push((tail, ""));
    }
    out
}

fn key_phrases(text: &str, hp: &Hyperparameters) -> Vec<String> {
    sentences(text)
        .into_iter()
        .filter(|s| {
            let len = s.chars().count();
            len >= hp.key_phrase_min_chars && len <= hp.key_phrase_max_chars
        })
        .filter(|s| KEY_PHRASE_PATTERNS.iter().any(|re| re.is_match(s)))
        .take(hp.key_phrase_limit)
        .map(str::to_string)
        .collect()
}

fn emotional_tones(text: &str, hp: &Hyperparameters) -> Vec<EmotionalTone> {
    let lower = text.to_lowercase();
    TONE_FAMILIES
        .iter()
        .filter(|family| {
            let hits: usize = family
                .keywords
                .iter()
                .map(|kw| lower.matches(kw).count())
                .sum();
            hits > hp.tone_min_matches
        })
        .map(|family| family.tone)
        .collect()
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

pub struct ScriptAnalyzer {
    hp: Hyperparameters,
    detector: Box<dyn TacticDetector>,
    splitter: Box<dyn SectionSplitter>,
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::new(Hyperparameters::default())
    }
}

impl ScriptAnalyzer {
    pub fn new(hp: Hyperparameters) -> Self {
        Self {
            detector: Box::new(KeywordDetector::new(hp.keyword_min_chars)),
            splitter: Box::new(ProportionalSplitter::from_hyperparameters(&hp)),
            hp,
        }
    }

    pub fn with_detector(mut self, detector: impl TacticDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn with_splitter(mut self, splitter: impl SectionSplitter + 'static) -> Self {
        self.splitter = Box::new(splitter);
        self
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hp
    }

    /// Analyze one script. Never fails: odd input just yields empty lists
    /// and empty sections.
    pub fn analyze(&self, script: &str) -> ScriptAnalysis {
        let all: Vec<&Tactic> = catalog::all().iter().collect();
        let tactics: Vec<Tactic> = self
            .detector
            .detect(script, &all)
            .into_iter()
            .cloned()
            .collect();

        let words: Vec<&str> = script.split_whitespace().collect();
        let structure = self.segment(&words);
        let wc = words.len();

        let analysis = ScriptAnalysis {
            tactics,
            structure,
            word_count: wc,
            estimated_duration: (wc as f64 / self.hp.words_per_minute).round() as u64,
            key_phrases: key_phrases(script, &self.hp),
            emotional_tone: emotional_tones(script, &self.hp),
        };
        tracing::debug!(
            words = analysis.word_count,
            tactics = analysis.tactics.len(),
            key_phrases = analysis.key_phrases.len(),
            "analyzed script"
        );
        analysis
    }

    fn segment(&self, words: &[&str]) -> Vec<ScriptSection> {
        let n = words.len();
        // Clamp whatever the splitter returned into contiguous, in-range cuts
        // so the section word counts always sum to `n`.
        let SectionBounds(raw) = self.splitter.split(words);
        let mut cuts = [0usize; 5];
        for (i, bound) in raw.iter().enumerate() {
            cuts[i + 1] = (*bound).clamp(cuts[i], n);
        }
        cuts[4] = n;

        SectionKind::ORDER
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let slice = &words[cuts[i]..cuts[i + 1]];
                let content = slice.join(" ");
                let candidates: Vec<&Tactic> = catalog::all()
                    .iter()
                    .filter(|t| kind.detection_categories().contains(&t.category))
                    .collect();
                let tactics = self
                    .detector
                    .detect(&content, &candidates)
                    .into_iter()
                    .map(|t| t.name.clone())
                    .collect();
                let (start, end) = kind.time_range();
                ScriptSection {
                    kind,
                    content,
                    start_time: start.to_string(),
                    end_time: end.to_string(),
                    tactics,
                    word_count: slice.len(),
                }
            })
            .collect()
    }
}
