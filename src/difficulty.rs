use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Anything that is not a known level, including an empty string, is medium.
    pub fn parse_lenient(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_levels() {
        assert_eq!(Difficulty::parse_lenient("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_lenient(" HARD "), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lenient("Medium"), Difficulty::Medium);
    }

    #[test]
    fn test_parse_falls_back_to_medium() {
        assert_eq!(Difficulty::parse_lenient(""), Difficulty::Medium);
        assert_eq!(Difficulty::parse_lenient("expert"), Difficulty::Medium);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
