use regex::Regex;
use std::sync::LazyLock;

use super::language::{AnalyzedText, PartOfSpeech};
use super::score::AxisScore;
use crate::settings::Evaluation;

pub const BASE_CLARITY: f32 = 50.0;

static TERMINAL_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

pub fn clarity_score(
    answer: &str,
    length: usize,
    analysis: Option<&AnalyzedText>,
    config: &Evaluation,
) -> AxisScore {
    let mut axis = AxisScore::new(BASE_CLARITY);

    if length >= config.minimum_length {
        axis.boost(20.0, "meets minimum length");
    }
    if length >= config.minimum_length && length <= config.ideal_length * 2 {
        axis.boost(10.0, "concise length");
    }

    match analysis {
        Some(doc) => {
            if doc.sentences.len() > 1 {
                axis.boost(10.0, "multiple sentences");
            }

            let mean = doc.mean_sentence_length();
            if (10.0..=30.0).contains(&mean) {
                axis.boost(10.0, "balanced sentence length");
            } else if mean > 50.0 {
                axis.penalize(5.0, "overlong sentences");
            }

            if doc.has_punctuation() {
                axis.boost(5.0, "punctuation");
            }
            if doc.has_pos(PartOfSpeech::Verb) && doc.has_pos(PartOfSpeech::Noun) {
                axis.boost(5.0, "verbs and nouns");
            }
        }
        None => {
            // A trailing terminator still yields a second (empty) segment.
            if TERMINAL_PUNCTUATION.split(answer).count() > 1 {
                axis.boost(10.0, "multiple sentences");
            }
            if answer.contains(['.', '!', '?']) {
                axis.boost(5.0, "punctuation");
            }
        }
    }

    if answer.chars().next().is_some_and(char::is_uppercase) {
        axis.boost(5.0, "capitalized");
    }

    axis.cap(100.0)
}
