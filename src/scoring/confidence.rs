use super::indicators::{contains_any, count_phrases, IndicatorTable, Signal};
use super::score::{capped, AxisScore};

pub const BASE_CONFIDENCE: f32 = 50.0;

const CONFIDENT_PHRASES: &[&str] = &[
    "i am confident",
    "i believe",
    "i know",
    "i have experience",
    "i successfully",
    "i achieved",
    "i implemented",
    "i led",
];

const HEDGING_PHRASES: &[&str] = &["maybe", "perhaps", "i think", "i guess", "not sure", "uncertain"];

const EXPERIENCE_CUES: &[&str] = &["when i", "in my experience", "i have"];

/// The only sub-score with a floor: hedging and negative language can push it
/// below its base, never below zero.
pub fn confidence_score(answer_lower: &str, indicators: &IndicatorTable) -> AxisScore {
    let mut axis = AxisScore::new(BASE_CONFIDENCE);

    let confident = count_phrases(answer_lower, CONFIDENT_PHRASES);
    axis.boost(capped(confident, 10.0, 30.0), "confident phrasing");

    let hedging = count_phrases(answer_lower, HEDGING_PHRASES);
    axis.penalize(capped(hedging, 5.0, 20.0), "hedging");

    if contains_any(answer_lower, EXPERIENCE_CUES) {
        axis.boost(10.0, "personal experience");
    }

    let negative = indicators.hits(Signal::Negative, answer_lower);
    axis.penalize(capped(negative, 3.0, 15.0), "negative language");

    axis.clamp(0.0, 100.0)
}
