//! Tunable thresholds for the analyzer, synthesizer and profile engine.
//!
//! Every value has a default matching the behavior the UI was built against.
//! A `pitch-architect.toml` file may override any subset of them:
//!
//! ```toml
//! words_per_minute = 150
//! tone_min_matches = 3
//! profile_tactic_ratio = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name looked up by [`Hyperparameters::discover`].
pub const CONFIG_FILE_NAME: &str = "pitch-architect.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparameters {
    /// Speaking pace used for `estimatedDuration`.
    pub words_per_minute: f64,
    /// Fractions of the word count given to hook, problem and solution.
    /// The details/CTA section takes the remainder.
    pub hook_fraction: f64,
    pub problem_fraction: f64,
    pub solution_fraction: f64,
    /// Example-phrase words shorter than this are not used as keywords.
    pub keyword_min_chars: usize,
    /// A tone is reported when its family matches strictly more than this.
    pub tone_min_matches: usize,
    pub key_phrase_min_chars: usize,
    pub key_phrase_max_chars: usize,
    pub key_phrase_limit: usize,
    /// Share of scripts a tactic must appear in to be common to a profile.
    pub profile_tactic_ratio: f64,
    /// Share of scripts a tone must appear in to be kept by a profile.
    pub profile_tone_ratio: f64,
    pub profile_phrase_min_scripts: usize,
    pub profile_phrase_limit: usize,
    pub hook_example_limit: usize,
    /// Average sentence lengths (in words) below these are short / medium.
    pub short_sentence_words: f64,
    pub medium_sentence_words: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            words_per_minute: 140.0,
            hook_fraction: 0.15,
            problem_fraction: 0.25,
            solution_fraction: 0.35,
            keyword_min_chars: 4,
            tone_min_matches: 2,
            key_phrase_min_chars: 10,
            key_phrase_max_chars: 100,
            key_phrase_limit: 5,
            profile_tactic_ratio: 0.6,
            profile_tone_ratio: 0.5,
            profile_phrase_min_scripts: 2,
            profile_phrase_limit: 10,
            hook_example_limit: 3,
            short_sentence_words: 10.0,
            medium_sentence_words: 20.0,
        }
    }
}

impl Hyperparameters {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let hp: Hyperparameters = toml::from_str(input)?;
        hp.validate()?;
        Ok(hp)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let hp = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded hyperparameters");
        Ok(hp)
    }

    /// Load `pitch-architect.toml` from `directory`, or fall back to defaults
    /// when the file does not exist.
    pub fn discover(directory: &Path) -> Result<Self, ConfigError> {
        let candidate = directory.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words_per_minute.is_nan() || self.words_per_minute <= 0.0 {
            return Err(invalid("words_per_minute must be positive"));
        }
        let fractions = [
            self.hook_fraction,
            self.problem_fraction,
            self.solution_fraction,
        ];
        if fractions.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(invalid("section fractions must be within 0.0..=1.0"));
        }
        if fractions.iter().sum::<f64>() > 1.0 {
            return Err(invalid("section fractions must not sum above 1.0"));
        }
        if self.key_phrase_min_chars > self.key_phrase_max_chars {
            return Err(invalid(
                "key_phrase_min_chars must not exceed key_phrase_max_chars",
            ));
        }
        for (name, ratio) in [
            ("profile_tactic_ratio", self.profile_tactic_ratio),
            ("profile_tone_ratio", self.profile_tone_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(invalid(&format!("{name} must be within 0.0..=1.0")));
            }
        }
        if self.short_sentence_words > self.medium_sentence_words {
            return Err(invalid(
                "short_sentence_words must not exceed medium_sentence_words",
            ));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}
