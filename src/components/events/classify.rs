use super::models::RawEvent;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Icon shown next to an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Cake,
    TwoPeople,
    Girl,
    Boy,
    Pregnant,
    Money,
    ElderWoman,
    Tooth,
    MindBlown,
    BlackHeart,
    BloodDrop,
    #[default]
    Calendar,
}

impl Icon {
    /// Emoji rendered on the page
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Cake => "🎂",
            Icon::TwoPeople => "👭",
            Icon::Girl => "👧🏻",
            Icon::Boy => "👦🏻",
            Icon::Pregnant => "🤰",
            Icon::Money => "💲",
            Icon::ElderWoman => "👵🏻",
            Icon::Tooth => "🦷",
            Icon::MindBlown => "🤯",
            Icon::BlackHeart => "🖤",
            Icon::BloodDrop => "🩸",
            Icon::Calendar => "📅",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Summary text as seen by the rules
pub struct Summary<'a> {
    original: &'a str,
    folded: String,
}

impl<'a> Summary<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            folded: original.to_lowercase(),
        }
    }

    /// Case-insensitive substring test; `needle` must be lowercase
    fn has(&self, needle: &str) -> bool {
        self.folded.contains(needle)
    }

    fn has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.has(needle))
    }

    /// Substring test against the text as written
    fn has_literal(&self, needle: &str) -> bool {
        self.original.contains(needle)
    }
}

/// One entry of the classification table
pub struct Rule {
    pub icon: Icon,
    pub matches: fn(&Summary<'_>) -> bool,
}

// First match wins. Reordering changes results, e.g. "Stella's Birthday" must stay a cake.
const RULES: &[Rule] = &[
    Rule {
        icon: Icon::Cake,
        matches: |s| s.has("birthday"),
    },
    Rule {
        icon: Icon::TwoPeople,
        matches: |s| (s.has("zoe") && s.has("stella")) || s.has("girls"),
    },
    Rule {
        icon: Icon::Girl,
        matches: |s| s.has("stella"),
    },
    Rule {
        icon: Icon::Boy,
        matches: |s| s.has("zoe"),
    },
    Rule {
        icon: Icon::Pregnant,
        matches: |s| s.has("mom"),
    },
    Rule {
        icon: Icon::Money,
        matches: |s| s.has("pay") || s.has_literal("$"),
    },
    Rule {
        icon: Icon::ElderWoman,
        matches: |s| s.has("gramma"),
    },
    Rule {
        icon: Icon::Tooth,
        matches: |s| s.has_any(&["dental", "dentist", "teeth", "tooth"]),
    },
    Rule {
        icon: Icon::MindBlown,
        matches: |s| s.has_any(&["psych", "therap"]),
    },
    Rule {
        icon: Icon::BlackHeart,
        matches: |s| s.has("daniel"),
    },
    Rule {
        icon: Icon::BloodDrop,
        matches: |s| s.has("blood"),
    },
];

/// The ordered rule table, without the calendar fallback
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Pick the icon for a summary; a missing summary gets the default
pub fn classify(summary: Option<&str>) -> Icon {
    let summary = Summary::new(summary.unwrap_or(""));
    RULES
        .iter()
        .find(|rule| (rule.matches)(&summary))
        .map(|rule| rule.icon)
        .unwrap_or_default()
}

/// Pick the icon for an event from its `summary` field
pub fn classify_event(event: &RawEvent) -> Icon {
    classify(event.get("summary").and_then(Value::as_str))
}
