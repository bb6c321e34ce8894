//! Rules that bring a draft script in line with a reference profile.
//!
//! The built-in rules currently pass the script through unchanged; they
//! exist so generation reports progress per rule and so real rewrites can be
//! dropped in through [`crate::ProfileEngine::with_rules`].

use crate::profile::{Progress, ReferenceScriptProfile};

pub struct RuleContext<'a> {
    pub profile: &'a ReferenceScriptProfile,
    pub user_prompt: &'a str,
}

pub trait ConsistencyRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn apply(&self, script: String, ctx: &RuleContext<'_>) -> String;
}

macro_rules! passthrough_rule {
    ($ty:ident, $name:literal, $desc:literal) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl ConsistencyRule for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $desc
            }

            fn apply(&self, script: String, _ctx: &RuleContext<'_>) -> String {
                script
            }
        }
    };
}

passthrough_rule!(
    TacticConsistency,
    "tactic",
    "Use the profile's common tactics"
);
passthrough_rule!(
    ToneConsistency,
    "tone",
    "Match the profile's emotional tone"
);
passthrough_rule!(
    StructureConsistency,
    "structure",
    "Follow the profile's section proportions"
);
passthrough_rule!(
    PhraseConsistency,
    "phrase",
    "Reuse the profile's recurring key phrases"
);

/// Tactic, tone, structure, phrase.
pub fn default_rules() -> Vec<Box<dyn ConsistencyRule>> {
    vec![
        Box::new(TacticConsistency),
        Box::new(ToneConsistency),
        Box::new(StructureConsistency),
        Box::new(PhraseConsistency),
    ]
}

pub fn apply_rules(
    rules: &[Box<dyn ConsistencyRule>],
    ctx: &RuleContext<'_>,
    base_script: &str,
    on_progress: &mut dyn FnMut(Progress),
) -> String {
    let total = rules.len();
    let mut script = base_script.to_string();
    for (i, rule) in rules.iter().enumerate() {
        script = rule.apply(script, ctx);
        tracing::debug!(rule = rule.name(), profile = %ctx.profile.id, "applied consistency rule");
        on_progress(Progress::new(rule.name(), (i + 1) as f64 / total as f64));
    }
    on_progress(Progress::new("complete", 1.0));
    script
}
