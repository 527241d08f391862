use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::generation::{DomainProfile, GeneratedQuestion, QuestionGenerator};
use crate::scoring::{
    AnswerEvaluator, EvaluationResult, IndicatorTable, LanguageProvider, SubScores,
};
use crate::settings::Settings;

/// Caller-facing entry point: question generation and answer scoring with
/// loosely typed inputs. Neither call fails.
#[derive(Debug, Clone)]
pub struct MockInterview {
    generator: QuestionGenerator,
    evaluator: AnswerEvaluator,
    max_count: usize,
}

impl MockInterview {
    pub fn new(
        generator: QuestionGenerator,
        evaluator: AnswerEvaluator,
        max_count: usize,
    ) -> Self {
        Self {
            generator,
            evaluator,
            max_count,
        }
    }

    /// Built-in vocabularies, templates and indicator lists.
    pub fn from_settings(settings: &Settings, language: LanguageProvider) -> Result<Self> {
        let generator = QuestionGenerator::builtin(&settings.generation.default_domain)?;
        let evaluator = AnswerEvaluator::new(
            IndicatorTable::builtin(),
            language,
            settings.evaluation.clone(),
        )?;
        Ok(Self::new(generator, evaluator, settings.generation.max_count))
    }

    pub fn generator(&self) -> &QuestionGenerator {
        &self.generator
    }

    pub fn evaluator(&self) -> &AnswerEvaluator {
        &self.evaluator
    }

    /// Counts above the configured maximum are capped to it.
    pub fn generate_questions(
        &self,
        domain: &str,
        count: i64,
        difficulty: &str,
    ) -> Vec<GeneratedQuestion> {
        let count = usize::try_from(count)
            .unwrap_or_default()
            .min(self.max_count);
        self.generator
            .generate(domain, count, Difficulty::parse_lenient(difficulty))
    }

    pub fn evaluate_answer(
        &self,
        answer: &str,
        question: &str,
        difficulty: &str,
    ) -> EvaluationResult {
        self.evaluator
            .evaluate(answer, question, Difficulty::parse_lenient(difficulty))
    }

    pub fn domains(&self) -> &[DomainProfile] {
        self.generator.knowledge().profiles()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub domain: String,
    pub question_count: usize,
    pub answered_count: usize,
    /// `None` when no answer was evaluated.
    pub overall: Option<f32>,
    pub averages: Option<SubScores>,
    pub completed_at: DateTime<Utc>,
}

impl InterviewReport {
    /// `results` holds one entry per evaluated answer, skipped questions excluded.
    pub fn summarize(
        domain: &str,
        questions: &[GeneratedQuestion],
        results: &[EvaluationResult],
    ) -> Self {
        let answered = results.len();
        let mean = |pick: fn(&EvaluationResult) -> f32| {
            (answered > 0).then(|| results.iter().map(pick).sum::<f32>() / answered as f32)
        };

        let averages = match (
            mean(|r| r.clarity),
            mean(|r| r.accuracy),
            mean(|r| r.communication),
            mean(|r| r.confidence),
        ) {
            (Some(clarity), Some(accuracy), Some(communication), Some(confidence)) => {
                Some(SubScores {
                    clarity,
                    accuracy,
                    communication,
                    confidence,
                })
            }
            _ => None,
        };

        Self {
            domain: questions
                .first()
                .map(|q| q.domain.clone())
                .unwrap_or_else(|| domain.to_string()),
            question_count: questions.len(),
            answered_count: answered,
            overall: mean(|r| r.overall),
            averages,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::DEFAULT_DOMAIN;

    fn interview() -> MockInterview {
        MockInterview::from_settings(&Settings::default(), LanguageProvider::Lexical).unwrap()
    }

    #[test]
    fn test_generate_questions_counts() {
        let interview = interview();
        assert!(interview.generate_questions("Finance", 0, "medium").is_empty());
        assert!(interview.generate_questions("Finance", -3, "medium").is_empty());

        let questions = interview.generate_questions("Finance", 4, "HARD");
        let ordinals: Vec<usize> = questions.iter().map(|q| q.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);
        assert!(questions.iter().all(|q| q.difficulty == Difficulty::Hard));
    }

    #[test]
    fn test_huge_count_is_capped() {
        let interview = interview();
        let max_count = Settings::default().generation.max_count;
        let questions = interview.generate_questions("Finance", i64::MAX, "medium");
        assert_eq!(questions.len(), max_count);
        assert_eq!(questions.last().map(|q| q.ordinal), Some(max_count));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut settings = Settings::default();
        settings.evaluation.weights.clarity = 1.0;
        settings.evaluation.weights.accuracy = 1.0;
        assert!(MockInterview::from_settings(&settings, LanguageProvider::Lexical).is_err());
    }

    #[test]
    fn test_unknown_inputs_fall_back() {
        let interview = interview();
        let questions = interview.generate_questions("Astronomy", 2, "impossible");
        assert!(questions.iter().all(|q| q.domain == DEFAULT_DOMAIN));
        assert!(questions.iter().all(|q| q.difficulty == Difficulty::Medium));
    }

    #[test]
    fn test_evaluate_answer_parses_difficulty() {
        let interview = interview();
        let answer = "I implemented a caching layer for our API, for example to cut database load.";
        let question = "How would you improve API performance?";

        let default = interview.evaluate_answer(answer, question, "");
        let medium = interview.evaluate_answer(answer, question, "medium");
        let easy = interview.evaluate_answer(answer, question, "Easy");
        assert_eq!(default, medium);
        assert!(easy.accuracy > medium.accuracy);

        let empty = interview.evaluate_answer("", "What is OOP?", "medium");
        assert_eq!(empty.overall, 0.0);
    }

    #[test]
    fn test_domain_catalog() {
        let interview = interview();
        let names: Vec<&str> = interview.domains().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&DEFAULT_DOMAIN));
        assert!(interview.domains().iter().all(|d| !d.description.is_empty()));
    }

    #[test]
    fn test_report_means() {
        let interview = interview();
        let questions = interview.generate_questions("HR/Human Resources", 3, "easy");
        let answer = "When I led onboarding, I improved retention.";
        let results = vec![
            interview.evaluate_answer(answer, &questions[0].text, "easy"),
            interview.evaluate_answer("short", &questions[1].text, "easy"),
        ];

        let report = InterviewReport::summarize("HR/Human Resources", &questions, &results);
        assert_eq!(report.question_count, 3);
        assert_eq!(report.answered_count, 2);
        let overall = report.overall.unwrap();
        assert!((overall - results[0].overall / 2.0).abs() < 1e-4);
        let averages = report.averages.unwrap();
        assert!((averages.confidence - results[0].confidence / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_report() {
        let report = InterviewReport::summarize("Finance", &[], &[]);
        assert_eq!(report.domain, "Finance");
        assert_eq!(report.overall, None);
        assert_eq!(report.averages, None);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["overall"].is_null());
        assert!(json["completed_at"].is_string());
    }
}
