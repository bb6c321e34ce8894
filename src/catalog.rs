//! Static catalog of persuasion tactics.
//!
//! The table is built once on first access and never mutated. Order matters:
//! detection, synthesis and profiles all report tactics in catalog order.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticCategory {
    Hook,
    Narrative,
    Persuasion,
    Engagement,
    Emotional,
    Retention,
    Monetization,
    Algorithm,
    Authority,
    Cognitive,
    Social,
    Fear,
    Desire,
    Trust,
    Urgency,
}

impl TacticCategory {
    pub const ALL: [TacticCategory; 15] = [
        TacticCategory::Hook,
        TacticCategory::Narrative,
        TacticCategory::Persuasion,
        TacticCategory::Engagement,
        TacticCategory::Emotional,
        TacticCategory::Retention,
        TacticCategory::Monetization,
        TacticCategory::Algorithm,
        TacticCategory::Authority,
        TacticCategory::Cognitive,
        TacticCategory::Social,
        TacticCategory::Fear,
        TacticCategory::Desire,
        TacticCategory::Trust,
        TacticCategory::Urgency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TacticCategory::Hook => "Hook",
            TacticCategory::Narrative => "Narrative",
            TacticCategory::Persuasion => "Persuasion",
            TacticCategory::Engagement => "Engagement",
            TacticCategory::Emotional => "Emotional",
            TacticCategory::Retention => "Retention",
            TacticCategory::Monetization => "Monetization",
            TacticCategory::Algorithm => "Algorithm",
            TacticCategory::Authority => "Authority",
            TacticCategory::Cognitive => "Cognitive",
            TacticCategory::Social => "Social",
            TacticCategory::Fear => "Fear",
            TacticCategory::Desire => "Desire",
            TacticCategory::Trust => "Trust",
            TacticCategory::Urgency => "Urgency",
        }
    }
}

impl fmt::Display for TacticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TacticCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TacticCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tactic category '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tactic {
    pub name: String,
    pub category: TacticCategory,
    pub description: String,
    /// Editorial weight in 0..=100. Never derived from usage.
    pub effectiveness: u8,
    /// Trigger phrases; their longer words double as detection keywords.
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

struct Entry {
    name: &'static str,
    category: TacticCategory,
    description: &'static str,
    effectiveness: u8,
    examples: &'static [&'static str],
    timing: Option<&'static str>,
}

const ENTRIES: &[Entry] = &[
    Entry {
        name: "Information Gap Hook",
        category: TacticCategory::Hook,
        description: "Opens a gap between what the viewer knows and wants to know",
        effectiveness: 92,
        examples: &[
            "What if I told you...",
            "The secret nobody talks about",
            "Here's what they don't want you to know",
        ],
        timing: Some("First 3 seconds"),
    },
    Entry {
        name: "Pattern Interrupt",
        category: TacticCategory::Hook,
        description: "Breaks the scrolling rhythm with an unexpected statement",
        effectiveness: 88,
        examples: &["Stop scrolling", "Wait, hold on", "This is wrong"],
        timing: Some("First second"),
    },
    Entry {
        name: "Bold Claim Hook",
        category: TacticCategory::Hook,
        description: "Leads with a confident, counterintuitive claim",
        effectiveness: 85,
        examples: &[
            "You've been doing it wrong",
            "Everything you know is a lie",
            "This changes everything",
        ],
        timing: Some("First 3 seconds"),
    },
    Entry {
        name: "Story Loop",
        category: TacticCategory::Narrative,
        description: "Starts a personal story and resolves it later",
        effectiveness: 84,
        examples: &["Last year I was broke", "Let me tell you a story"],
        timing: None,
    },
    Entry {
        name: "Transformation Arc",
        category: TacticCategory::Narrative,
        description: "Before and after framing of a change the viewer can copy",
        effectiveness: 86,
        examples: &["Before I found this", "Three months later", "Went from zero to"],
        timing: None,
    },
    Entry {
        name: "Problem-Solution Frame",
        category: TacticCategory::Persuasion,
        description: "Names a problem then positions the offer as the fix",
        effectiveness: 83,
        examples: &["The problem is", "Here's the solution", "The fix is simple"],
        timing: Some("Middle"),
    },
    Entry {
        name: "Reciprocity",
        category: TacticCategory::Persuasion,
        description: "Gives value up front to earn the ask",
        effectiveness: 78,
        examples: &["Here's a free guide", "I'm giving away", "Completely free"],
        timing: None,
    },
    Entry {
        name: "Call to Comment",
        category: TacticCategory::Engagement,
        description: "Asks the viewer to respond in the comments",
        effectiveness: 74,
        examples: &["Comment below", "Tell me in the comments", "Drop a comment"],
        timing: Some("End"),
    },
    Entry {
        name: "Pain Point Agitation",
        category: TacticCategory::Emotional,
        description: "Makes the viewer feel the cost of the current problem",
        effectiveness: 87,
        examples: &["Tired of struggling", "Sick of failing", "Frustrated and stuck"],
        timing: Some("After the hook"),
    },
    Entry {
        name: "Empathy Bridge",
        category: TacticCategory::Emotional,
        description: "Signals the creator has felt the same pain",
        effectiveness: 80,
        examples: &["I know how it feels", "I've been there", "Most people fail"],
        timing: None,
    },
    Entry {
        name: "Open Loop",
        category: TacticCategory::Retention,
        description: "Promises a payoff later in the video",
        effectiveness: 89,
        examples: &["Stay until the end", "Wait for it", "I'll show you later"],
        timing: Some("Throughout"),
    },
    Entry {
        name: "Follow for More",
        category: TacticCategory::Algorithm,
        description: "Converts viewers into followers for future reach",
        effectiveness: 72,
        examples: &["Follow for more", "Subscribe for part two", "Save this video"],
        timing: Some("End"),
    },
    Entry {
        name: "Soft Pitch",
        category: TacticCategory::Monetization,
        description: "Mentions the product as a natural next step",
        effectiveness: 76,
        examples: &["Link in bio", "Check out my program", "Try it today"],
        timing: Some("End"),
    },
    Entry {
        name: "Authority Positioning",
        category: TacticCategory::Authority,
        description: "Establishes credibility through credentials or results",
        effectiveness: 82,
        examples: &["As a doctor", "After ten years of coaching", "My client results"],
        timing: Some("Early"),
    },
    Entry {
        name: "Anchoring",
        category: TacticCategory::Cognitive,
        description: "Sets a reference number that makes the offer look small",
        effectiveness: 79,
        examples: &["Normally costs", "Worth over", "Instead of paying"],
        timing: None,
    },
    Entry {
        name: "Social Proof",
        category: TacticCategory::Social,
        description: "Shows that others already trust the idea",
        effectiveness: 90,
        examples: &["Thousands of people", "Everyone is talking about", "Join the community"],
        timing: None,
    },
    Entry {
        name: "Fear of Missing Out",
        category: TacticCategory::Fear,
        description: "Implies others are gaining something the viewer is not",
        effectiveness: 81,
        examples: &["Don't get left behind", "Everyone else already knows", "You're missing out"],
        timing: None,
    },
    Entry {
        name: "Identity Aspiration",
        category: TacticCategory::Desire,
        description: "Paints the person the viewer wants to become",
        effectiveness: 83,
        examples: &["Imagine waking up", "Picture yourself", "The kind of person who"],
        timing: None,
    },
    Entry {
        name: "Vulnerability Share",
        category: TacticCategory::Trust,
        description: "Admits a flaw or failure to build trust",
        effectiveness: 77,
        examples: &["I'll be honest", "I made a huge mistake", "Nobody tells you this"],
        timing: None,
    },
    Entry {
        name: "Scarcity",
        category: TacticCategory::Urgency,
        description: "Limits availability to force a decision now",
        effectiveness: 86,
        examples: &["Only a few spots left", "Ends today", "Limited time"],
        timing: Some("End"),
    },
];

static TACTICS: Lazy<Vec<Tactic>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|e| Tactic {
            name: e.name.to_string(),
            category: e.category,
            description: e.description.to_string(),
            effectiveness: e.effectiveness,
            examples: e.examples.iter().map(|s| s.to_string()).collect(),
            timing: e.timing.map(str::to_string),
        })
        .collect()
});

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn all() -> &'static [Tactic] {
    &TACTICS
}

pub fn by_category(category: TacticCategory) -> impl Iterator<Item = &'static Tactic> {
    TACTICS.iter().filter(move |t| t.category == category)
}

pub fn by_name(name: &str) -> Option<&'static Tactic> {
    let name = name.trim();
    TACTICS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Distinct categories that have at least one tactic, in catalog order.
pub fn categories_present() -> Vec<TacticCategory> {
    let mut seen = Vec::new();
    for t in TACTICS.iter() {
        if !seen.contains(&t.category) {
            seen.push(t.category);
        }
    }
    seen
}
