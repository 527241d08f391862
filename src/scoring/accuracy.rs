use super::indicators::{contains_any, IndicatorTable, Signal};
use super::language::{lexical_keywords, AnalyzedPair};
use super::score::{capped, AxisScore};
use crate::difficulty::Difficulty;
use crate::settings::DifficultyMultipliers;

pub const BASE_ACCURACY: f32 = 40.0;

/// Question wording that asks for technical depth.
const TECHNICAL_QUESTION_CUES: &[&str] = &["explain", "what is", "difference", "how"];
const EXAMPLE_CUES: &[&str] = &["example", "instance", "case", "time when"];

pub fn accuracy_score(
    answer: &str,
    question: &str,
    analysis: Option<&AnalyzedPair>,
    indicators: &IndicatorTable,
    difficulty: Difficulty,
    multipliers: &DifficultyMultipliers,
) -> AxisScore {
    let mut axis = AxisScore::new(BASE_ACCURACY);
    let answer_lower = answer.to_lowercase();
    let question_lower = question.to_lowercase();

    match analysis {
        Some(pair) => {
            axis.boost(pair.similarity * 30.0, "semantic similarity");

            let entity_overlap = pair
                .answer
                .entity_set()
                .intersection(&pair.question.entity_set())
                .count();
            axis.boost(capped(entity_overlap, 5.0, 15.0), "shared entities");

            let lemma_overlap = pair
                .answer
                .content_lemmas()
                .intersection(&pair.question.content_lemmas())
                .count();
            axis.boost(capped(lemma_overlap, 3.0, 20.0), "shared key terms");
        }
        None => {
            let question_keywords = lexical_keywords(question);
            let overlap = lexical_keywords(answer)
                .iter()
                .filter(|k| question_keywords.contains(k))
                .count();
            axis.boost(capped(overlap, 10.0, 30.0), "shared keywords");
        }
    }

    if contains_any(&question_lower, TECHNICAL_QUESTION_CUES) {
        let hits = indicators.hits(Signal::Technical, &answer_lower);
        axis.boost(capped(hits, 5.0, 20.0), "technical vocabulary");
    }
    if contains_any(&answer_lower, EXAMPLE_CUES) {
        axis.boost(10.0, "concrete example");
    }

    axis.scale(
        multipliers.for_difficulty(difficulty),
        &format!("{difficulty} difficulty"),
    );
    axis.cap(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::language::{AnalyzedText, PartOfSpeech, Token};
    use crate::settings::Evaluation;

    const QUESTION: &str = "What is inheritance in object oriented programming?";
    const ANSWER: &str =
        "Inheritance lets a class reuse behavior from a parent class, for example in a framework.";

    fn score(answer: &str, question: &str, difficulty: Difficulty) -> AxisScore {
        accuracy_score(
            answer,
            question,
            None,
            &IndicatorTable::builtin(),
            difficulty,
            &Evaluation::default().multipliers,
        )
    }

    #[test]
    fn test_lexical_accuracy() {
        // keyword overlap (+10), technical term (+5), example (+10)
        let axis = score(ANSWER, QUESTION, Difficulty::Medium);
        assert!((axis.score - 65.0).abs() < 1e-4);
        assert_eq!(axis.boost_reasons.len(), 3);
    }

    #[test]
    fn test_difficulty_multiplier() {
        let easy = score(ANSWER, QUESTION, Difficulty::Easy).score;
        let hard = score(ANSWER, QUESTION, Difficulty::Hard).score;
        assert!((easy - 71.5).abs() < 1e-3);
        assert!((hard - 58.5).abs() < 1e-3);
        assert!(hard <= easy);
    }

    #[test]
    fn test_technical_bonus_needs_technical_question() {
        let answer = "We tuned database performance and security settings.";
        let technical = score(answer, "Explain your last project", Difficulty::Medium);
        let plain = score(answer, "Tell me about your last project", Difficulty::Medium);
        assert!((technical.score - (plain.score + 15.0)).abs() < 1e-4);
    }

    #[test]
    fn test_accuracy_is_capped() {
        let answer = "algorithm architecture framework pattern database api, for example \
                      polymorphism inheritance encapsulation abstraction interfaces";
        let question = "Explain polymorphism inheritance encapsulation abstraction interfaces";
        assert_eq!(score(answer, question, Difficulty::Easy).score, 100.0);
    }

    #[test]
    fn test_model_accuracy_uses_pair() {
        let tag = |words: &[(&str, PartOfSpeech)]| {
            AnalyzedText::from_tokens(words.iter().map(|(w, p)| Token::new(w, *p)).collect())
        };
        let pair = AnalyzedPair {
            answer: tag(&[("queues", PartOfSpeech::Noun), ("buffer", PartOfSpeech::Verb)])
                .with_entities(vec!["Kafka".into()]),
            question: tag(&[("queue", PartOfSpeech::Noun), ("help", PartOfSpeech::Verb)])
                .with_entities(vec!["kafka".into()]),
            similarity: 0.5,
        };

        let axis = accuracy_score(
            "queues buffer",
            "Why do we use a queue",
            Some(&pair),
            &IndicatorTable::builtin(),
            Difficulty::Medium,
            &Evaluation::default().multipliers,
        );
        // 40 + 0.5 * 30 + one entity (5) + one lemma (3)
        assert!((axis.score - 63.0).abs() < 1e-4);
    }
}
