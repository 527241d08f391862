use super::indicators::{contains_any, IndicatorTable, Signal};
use super::score::{Axis, SubScores};
use crate::settings::Evaluation;

pub const SHORT_ANSWER_FEEDBACK: &str = "Answer is too short or empty.";
pub const COMPLETE_ANSWER_IMPROVEMENT: &str = "Provide a complete answer to the question";

const EXAMPLE_CUES: &[&str] = &["example", "instance", "experience"];

impl Axis {
    fn weak_feedback(self) -> &'static str {
        match self {
            Axis::Clarity => "Work on making your answer clearer and more structured. Use complete sentences and proper punctuation.",
            Axis::Accuracy => "Try to be more specific and relevant to the question. Include relevant examples or details.",
            Axis::Communication => "Improve your communication by using transition words and organizing your thoughts better.",
            Axis::Confidence => "Be more confident in your responses. Avoid hedging language and provide concrete examples from your experience.",
        }
    }

    fn strong_feedback(self) -> &'static str {
        match self {
            Axis::Clarity => "Your answer was clear and well-structured.",
            Axis::Accuracy => "Your answer was accurate and directly addressed the question.",
            Axis::Communication => "You communicated your ideas effectively.",
            Axis::Confidence => "You demonstrated confidence in your knowledge and experience.",
        }
    }

    fn strength(self) -> &'static str {
        match self {
            Axis::Clarity => "Clear and well-structured response",
            Axis::Accuracy => "Accurate and relevant information",
            Axis::Communication => "Effective communication",
            Axis::Confidence => "Confident expression",
        }
    }

    fn improvement(self) -> &'static str {
        match self {
            Axis::Clarity => "Improve clarity and structure of your response",
            Axis::Accuracy => "Provide more accurate and relevant information",
            Axis::Communication => "Enhance communication skills and organization",
            Axis::Confidence => "Build confidence in your responses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthRemark {
    TooShort,
    TooLong,
}

/// Short wins when both limits would apply.
fn length_remark(length: usize, config: &Evaluation) -> Option<LengthRemark> {
    if length < config.minimum_length {
        Some(LengthRemark::TooShort)
    } else if length > config.ideal_length * 3 {
        Some(LengthRemark::TooLong)
    } else {
        None
    }
}

pub fn compose_feedback(
    scores: &SubScores,
    overall: f32,
    length: usize,
    config: &Evaluation,
) -> String {
    let thresholds = &config.thresholds;
    let mut parts: Vec<String> = Vec::new();

    let band = if overall >= thresholds.excellent {
        "Excellent answer! You demonstrated strong understanding and communication skills."
    } else if overall >= thresholds.good {
        "Good answer with room for improvement in some areas."
    } else if overall >= thresholds.adequate {
        "Adequate answer, but consider providing more detail and structure."
    } else {
        "Your answer needs significant improvement. Focus on clarity and providing specific examples."
    };
    parts.push(band.to_string());

    for (axis, score) in scores.iter() {
        if score < thresholds.weak_axis {
            parts.push(axis.weak_feedback().to_string());
        } else if score >= thresholds.strong_axis {
            parts.push(axis.strong_feedback().to_string());
        }
    }

    match length_remark(length, config) {
        Some(LengthRemark::TooShort) => parts.push(format!(
            "Your answer is too short. Aim for at least {} characters to provide a comprehensive response.",
            config.minimum_length
        )),
        Some(LengthRemark::TooLong) => parts.push(
            "Your answer is quite long. Consider being more concise while maintaining key points."
                .to_string(),
        ),
        None => {}
    }

    parts.join(" ")
}

pub fn strengths(
    scores: &SubScores,
    answer_lower: &str,
    indicators: &IndicatorTable,
    config: &Evaluation,
) -> Vec<String> {
    let mut labels: Vec<String> = scores
        .iter()
        .filter(|(_, score)| *score >= config.thresholds.highlight)
        .map(|(axis, _)| axis.strength().to_string())
        .collect();

    if contains_any(answer_lower, EXAMPLE_CUES) {
        labels.push("Used specific examples".to_string());
    }
    if indicators.any(Signal::Technical, answer_lower) {
        labels.push("Demonstrated technical knowledge".to_string());
    }

    if labels.is_empty() {
        labels.push("Attempted to answer the question".to_string());
    }
    labels
}

pub fn improvements(scores: &SubScores, length: usize, config: &Evaluation) -> Vec<String> {
    let mut labels: Vec<String> = scores
        .iter()
        .filter(|(_, score)| *score < config.thresholds.highlight)
        .map(|(axis, _)| axis.improvement().to_string())
        .collect();

    match length_remark(length, config) {
        Some(LengthRemark::TooShort) => labels.push("Provide more detailed answers".to_string()),
        Some(LengthRemark::TooLong) => {
            labels.push("Be more concise while maintaining key points".to_string())
        }
        None => {}
    }

    if labels.is_empty() {
        labels.push("Continue practicing to maintain your strong performance".to_string());
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(clarity: f32, accuracy: f32, communication: f32, confidence: f32) -> SubScores {
        SubScores {
            clarity,
            accuracy,
            communication,
            confidence,
        }
    }

    #[test]
    fn test_feedback_order_and_skipped_middle_band() {
        let config = Evaluation::default();
        let text = compose_feedback(&scores(85.0, 70.0, 59.0, 60.0), 68.0, 120, &config);
        assert_eq!(
            text,
            "Good answer with room for improvement in some areas. \
             Your answer was clear and well-structured. \
             Improve your communication by using transition words and organizing your thoughts better."
        );
    }

    #[test]
    fn test_short_answer_remark_includes_minimum() {
        let config = Evaluation::default();
        let text = compose_feedback(&scores(65.0, 65.0, 65.0, 65.0), 40.0, 12, &config);
        assert!(text.starts_with("Your answer needs significant improvement."));
        assert!(text.ends_with("Aim for at least 20 characters to provide a comprehensive response."));
    }

    #[test]
    fn test_long_answer_remark() {
        let config = Evaluation::default();
        let text = compose_feedback(&scores(65.0, 65.0, 65.0, 65.0), 80.0, 301, &config);
        assert!(text.starts_with("Excellent answer!"));
        assert!(text.ends_with("Consider being more concise while maintaining key points."));
        assert!(compose_feedback(&scores(65.0, 65.0, 65.0, 65.0), 65.0, 300, &config)
            .ends_with("some areas."));
    }

    #[test]
    fn test_strengths() {
        let config = Evaluation::default();
        let table = IndicatorTable::builtin();

        let labels = strengths(&scores(70.0, 69.9, 90.0, 10.0), "for example, the api", &table, &config);
        assert_eq!(
            labels,
            vec![
                "Clear and well-structured response",
                "Effective communication",
                "Used specific examples",
                "Demonstrated technical knowledge",
            ]
        );

        let fallback = strengths(&scores(10.0, 10.0, 10.0, 10.0), "nothing", &table, &config);
        assert_eq!(fallback, vec!["Attempted to answer the question"]);
    }

    #[test]
    fn test_improvements() {
        let config = Evaluation::default();

        let labels = improvements(&scores(69.0, 70.0, 70.0, 20.0), 400, &config);
        assert_eq!(
            labels,
            vec![
                "Improve clarity and structure of your response",
                "Build confidence in your responses",
                "Be more concise while maintaining key points",
            ]
        );

        let short = improvements(&scores(90.0, 90.0, 90.0, 90.0), 15, &config);
        assert_eq!(short, vec!["Provide more detailed answers"]);

        let fallback = improvements(&scores(90.0, 90.0, 90.0, 90.0), 150, &config);
        assert_eq!(fallback, vec!["Continue practicing to maintain your strong performance"]);
    }

    #[test]
    fn test_short_wins_over_long() {
        let mut config = Evaluation::default();
        config.minimum_length = 500;
        assert_eq!(length_remark(400, &config), Some(LengthRemark::TooShort));
    }
}
