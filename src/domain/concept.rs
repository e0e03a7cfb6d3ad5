//! The propaganda concept vocabulary and its category rules.
//!
//! The vocabulary is a fixed table of twelve concept phrases scored against
//! every image. Each phrase is assigned a category by an ordered list of
//! keyword rules (first matching rule wins), and each category carries a
//! display color. None of these tables mutate at runtime.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Categories a propaganda concept can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptCategory {
    /// Authority figures or institutional symbols.
    Authority,
    /// Imagery crafted to evoke strong emotional responses.
    Emotional,
    /// Fear-inducing imagery.
    Fear,
    /// National symbols, colors, or patriotic imagery.
    Patriotic,
    /// Reverence or worship of specific leaders.
    Leader,
    /// Us-versus-them framing and war imagery.
    Conflict,
    /// Calls to action.
    Action,
    /// Historical references used to legitimize a message.
    Historical,
    /// No keyword rule matched.
    General,
}

impl ConceptCategory {
    /// The lowercase string form of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptCategory::Authority => "authority",
            ConceptCategory::Emotional => "emotional",
            ConceptCategory::Fear => "fear",
            ConceptCategory::Patriotic => "patriotic",
            ConceptCategory::Leader => "leader",
            ConceptCategory::Conflict => "conflict",
            ConceptCategory::Action => "action",
            ConceptCategory::Historical => "historical",
            ConceptCategory::General => "general",
        }
    }

    /// The title-cased display label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            ConceptCategory::Authority => "Authority",
            ConceptCategory::Emotional => "Emotional",
            ConceptCategory::Fear => "Fear",
            ConceptCategory::Patriotic => "Patriotic",
            ConceptCategory::Leader => "Leader",
            ConceptCategory::Conflict => "Conflict",
            ConceptCategory::Action => "Action",
            ConceptCategory::Historical => "Historical",
            ConceptCategory::General => "General",
        }
    }

    /// The hex display color for this category. Categories without a mapped
    /// color fall back to a neutral gray.
    pub fn color(&self) -> &'static str {
        match self {
            ConceptCategory::Authority => "#ef4444",
            ConceptCategory::Emotional => "#f97316",
            ConceptCategory::Fear => "#dc2626",
            ConceptCategory::Patriotic => "#3b82f6",
            ConceptCategory::Leader => "#8b5cf6",
            ConceptCategory::Conflict => "#059669",
            ConceptCategory::Action => "#eab308",
            ConceptCategory::Historical => "#6b7280",
            ConceptCategory::General => "#6b7280",
        }
    }
}

impl std::fmt::Display for ConceptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword rules mapping concept text to a category.
///
/// Evaluated top to bottom; the first rule with any keyword contained in the
/// lowercased phrase wins. Rule order matters: "war propaganda poster" must
/// classify as conflict even though later rules could also fire on other
/// phrases.
const CATEGORY_RULES: &[(&[&str], ConceptCategory)] = &[
    (&["authority", "uniform"], ConceptCategory::Authority),
    (&["emotional", "manipulation"], ConceptCategory::Emotional),
    (&["fear"], ConceptCategory::Fear),
    (&["patriotic", "flag"], ConceptCategory::Patriotic),
    (&["leader", "worship"], ConceptCategory::Leader),
    (&["war", "versus"], ConceptCategory::Conflict),
    (&["action", "call"], ConceptCategory::Action),
    (&["historical"], ConceptCategory::Historical),
];

/// Assigns a category to a concept phrase using the ordered keyword rules.
pub fn categorize(phrase: &str) -> ConceptCategory {
    let lower = phrase.to_lowercase();
    for (keywords, category) in CATEGORY_RULES {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *category;
        }
    }
    ConceptCategory::General
}

/// A fixed textual description of a visual propaganda motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Concept {
    /// The phrase scored against the image.
    pub phrase: &'static str,
    /// The category assigned by the keyword rules.
    pub category: ConceptCategory,
}

impl Concept {
    /// The display color inherited from this concept's category.
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// The concept phrases scored against every image, in scoring order.
const CONCEPT_PHRASES: [&str; 12] = [
    "authority figure in uniform",
    "military propaganda poster",
    "political rally with flags",
    "emotional manipulation imagery",
    "fear-inducing propaganda",
    "patriotic symbols and colors",
    "leader worship imagery",
    "us versus them messaging",
    "call to action propaganda",
    "historical propaganda art",
    "war propaganda poster",
    "political campaign imagery",
];

static VOCABULARY: Lazy<Vec<Concept>> = Lazy::new(|| {
    CONCEPT_PHRASES
        .iter()
        .copied()
        .map(|phrase| Concept {
            phrase,
            category: categorize(phrase),
        })
        .collect()
});

/// The fixed, immutable concept vocabulary.
///
/// Index positions are stable and double as the class indices passed to the
/// saliency model.
pub fn concept_vocabulary() -> &'static [Concept] {
    &VOCABULARY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_size_and_order() {
        let vocab = concept_vocabulary();
        assert_eq!(vocab.len(), 12);
        assert_eq!(vocab[0].phrase, "authority figure in uniform");
        assert_eq!(vocab[11].phrase, "political campaign imagery");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "war propaganda poster" contains no earlier keyword, so the
        // conflict rule fires.
        assert_eq!(categorize("war propaganda poster"), ConceptCategory::Conflict);
        // "call to action propaganda" matches the action rule on both
        // keywords; earlier rules do not fire.
        assert_eq!(
            categorize("call to action propaganda"),
            ConceptCategory::Action
        );
    }

    #[test]
    fn test_unmatched_phrase_is_general() {
        assert_eq!(categorize("military propaganda poster"), ConceptCategory::General);
        assert_eq!(categorize("political campaign imagery"), ConceptCategory::General);
    }

    #[test]
    fn test_flags_classify_as_patriotic() {
        assert_eq!(
            categorize("political rally with flags"),
            ConceptCategory::Patriotic
        );
    }

    #[test]
    fn test_vocabulary_categories() {
        let vocab = concept_vocabulary();
        let categories: Vec<ConceptCategory> = vocab.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![
                ConceptCategory::Authority,
                ConceptCategory::General,
                ConceptCategory::Patriotic,
                ConceptCategory::Emotional,
                ConceptCategory::Fear,
                ConceptCategory::Patriotic,
                ConceptCategory::Leader,
                ConceptCategory::Conflict,
                ConceptCategory::Action,
                ConceptCategory::Historical,
                ConceptCategory::Conflict,
                ConceptCategory::General,
            ]
        );
    }

    #[test]
    fn test_general_color_is_neutral_gray() {
        assert_eq!(ConceptCategory::General.color(), "#6b7280");
    }
}
