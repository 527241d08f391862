use anyhow::{bail, Result};
use strum::{Display, EnumIter, IntoEnumIterator};

pub const POSITIVE_INDICATORS: &[&str] = &[
    "experience",
    "implemented",
    "successful",
    "achieved",
    "improved",
    "solved",
    "developed",
    "managed",
    "led",
    "optimized",
    "analyzed",
    "designed",
    "delivered",
    "exceeded",
    "enhanced",
];

pub const NEGATIVE_INDICATORS: &[&str] = &[
    "didn't",
    "couldn't",
    "failed",
    "unable",
    "lack",
    "limited",
    "struggled",
    "difficult",
    "problem",
    "issue",
    "challenge",
];

pub const TECHNICAL_INDICATORS: &[&str] = &[
    "algorithm",
    "architecture",
    "framework",
    "methodology",
    "pattern",
    "optimization",
    "scalability",
    "performance",
    "security",
    "database",
    "api",
    "microservice",
    "deployment",
    "testing",
    "debugging",
];

pub const COMMUNICATION_INDICATORS: &[&str] = &[
    "clearly",
    "effectively",
    "communicated",
    "explained",
    "presented",
    "discussed",
    "collaborated",
    "coordinated",
    "aligned",
    "understood",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Signal {
    Positive,
    Negative,
    Technical,
    Communication,
}

/// Word lists tagging vocabulary by signal. Matching is substring-based on
/// lowercased text, each word counted at most once.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    positive: Vec<String>,
    negative: Vec<String>,
    technical: Vec<String>,
    communication: Vec<String>,
}

impl IndicatorTable {
    pub fn new(
        positive: &[&str],
        negative: &[&str],
        technical: &[&str],
        communication: &[&str],
    ) -> Result<Self> {
        let table = Self {
            positive: lowercase(positive),
            negative: lowercase(negative),
            technical: lowercase(technical),
            communication: lowercase(communication),
        };

        for (i, a) in Signal::iter().enumerate() {
            for b in Signal::iter().skip(i + 1) {
                let shared = table.words(a).iter().find(|w| table.words(b).contains(*w));
                if let Some(word) = shared {
                    bail!("indicator \"{word}\" is listed as both {a} and {b}");
                }
            }
        }

        Ok(table)
    }

    pub fn builtin() -> Self {
        Self {
            positive: lowercase(POSITIVE_INDICATORS),
            negative: lowercase(NEGATIVE_INDICATORS),
            technical: lowercase(TECHNICAL_INDICATORS),
            communication: lowercase(COMMUNICATION_INDICATORS),
        }
    }

    pub fn words(&self, signal: Signal) -> &[String] {
        match signal {
            Signal::Positive => &self.positive,
            Signal::Negative => &self.negative,
            Signal::Technical => &self.technical,
            Signal::Communication => &self.communication,
        }
    }

    pub fn hits(&self, signal: Signal, text_lower: &str) -> usize {
        self.words(signal)
            .iter()
            .filter(|w| text_lower.contains(w.as_str()))
            .count()
    }

    pub fn any(&self, signal: Signal, text_lower: &str) -> bool {
        self.hits(signal, text_lower) > 0
    }
}

impl Default for IndicatorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lowercase(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

pub fn count_phrases(text_lower: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|p| text_lower.contains(*p)).count()
}

pub fn contains_any(text_lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text_lower.contains(*p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists_are_disjoint() {
        let table = IndicatorTable::new(
            POSITIVE_INDICATORS,
            NEGATIVE_INDICATORS,
            TECHNICAL_INDICATORS,
            COMMUNICATION_INDICATORS,
        )
        .unwrap();
        assert_eq!(table.words(Signal::Technical).len(), 15);
    }

    #[test]
    fn test_overlapping_lists_rejected() {
        let result = IndicatorTable::new(&["led"], &["failed"], &["api"], &["Led"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_hits_count_each_word_once() {
        let table = IndicatorTable::builtin();
        let text = "the api and the api gateway, plus database testing";
        assert_eq!(table.hits(Signal::Technical, text), 3);
        assert!(!table.any(Signal::Negative, text));
    }

    #[test]
    fn test_substring_matching() {
        let table = IndicatorTable::builtin();
        assert!(table.any(Signal::Positive, "i led the migration"));
        assert_eq!(table.hits(Signal::Negative, "a problematic issue"), 2);
    }

    #[test]
    fn test_phrase_helpers() {
        assert_eq!(count_phrases("maybe, perhaps", &["maybe", "perhaps", "guess"]), 2);
        assert!(contains_any("in my experience", &["when i", "in my experience"]));
        assert!(!contains_any("nothing here", &["when i"]));
    }
}
