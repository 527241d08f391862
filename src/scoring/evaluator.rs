use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::accuracy::accuracy_score;
use super::clarity::clarity_score;
use super::communication::communication_score;
use super::confidence::confidence_score;
use super::feedback::{
    compose_feedback, improvements, strengths, COMPLETE_ANSWER_IMPROVEMENT,
    SHORT_ANSWER_FEEDBACK,
};
use super::indicators::IndicatorTable;
use super::language::LanguageProvider;
use super::score::{Axis, AxisScore, SubScores};
use crate::difficulty::Difficulty;
use crate::settings::Evaluation as EvaluationSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub clarity: f32,
    pub accuracy: f32,
    pub communication: f32,
    pub confidence: f32,
    pub overall: f32,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl EvaluationResult {
    /// The zero-score result for answers too short to assess.
    pub fn too_short() -> Self {
        Self {
            clarity: 0.0,
            accuracy: 0.0,
            communication: 0.0,
            confidence: 0.0,
            overall: 0.0,
            feedback: SHORT_ANSWER_FEEDBACK.to_string(),
            strengths: Vec::new(),
            improvements: vec![COMPLETE_ANSWER_IMPROVEMENT.to_string()],
        }
    }

    pub fn scores(&self) -> SubScores {
        SubScores {
            clarity: self.clarity,
            accuracy: self.accuracy,
            communication: self.communication,
            confidence: self.confidence,
        }
    }

    pub fn to_record(&self) -> EvaluationRecord {
        EvaluationRecord {
            clarity: round2(self.clarity),
            accuracy: round2(self.accuracy),
            communication: round2(self.communication),
            confidence: round2(self.confidence),
            overall: round2(self.overall),
            feedback: self.feedback.clone(),
            strengths: self.strengths.clone(),
            improvements: self.improvements.clone(),
        }
    }
}

/// Flat record handed to storage, scores rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub clarity: f32,
    pub accuracy: f32,
    pub communication: f32,
    pub confidence: f32,
    pub overall: f32,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub result: EvaluationResult,
    /// Empty for the too-short result.
    pub breakdown: Vec<(Axis, AxisScore)>,
    /// Language model name, or "lexical".
    pub mode: String,
}

/// Scores answers with the lexical heuristics, upgraded by the language
/// provider when one is loaded.
#[derive(Debug, Clone)]
pub struct AnswerEvaluator {
    indicators: IndicatorTable,
    language: LanguageProvider,
    config: EvaluationSettings,
}

impl AnswerEvaluator {
    /// Fails when the weights or difficulty multipliers could push a score
    /// outside [0, 100].
    pub fn new(
        indicators: IndicatorTable,
        language: LanguageProvider,
        config: EvaluationSettings,
    ) -> Result<Self> {
        config.validate().context("invalid evaluation settings")?;
        Ok(Self {
            indicators,
            language,
            config,
        })
    }

    pub fn lexical(config: EvaluationSettings) -> Result<Self> {
        Self::new(IndicatorTable::builtin(), LanguageProvider::Lexical, config)
    }

    pub fn language(&self) -> &LanguageProvider {
        &self.language
    }

    pub fn evaluate(
        &self,
        answer: &str,
        question: &str,
        difficulty: Difficulty,
    ) -> EvaluationResult {
        self.evaluate_detailed(answer, question, difficulty).result
    }

    pub fn evaluate_detailed(
        &self,
        answer: &str,
        question: &str,
        difficulty: Difficulty,
    ) -> Evaluation {
        if answer.trim().chars().count() < self.config.min_answer_chars {
            return Evaluation {
                result: EvaluationResult::too_short(),
                breakdown: Vec::new(),
                mode: self.language.mode(),
            };
        }

        let config = &self.config;
        let length = answer.chars().count();
        let answer_lower = answer.to_lowercase();

        let pair = self.language.analyze_pair(answer, question);
        let mode = match pair {
            Some(_) => self.language.mode(),
            None => "lexical".to_string(),
        };
        let answer_doc = pair.as_ref().map(|p| &p.answer);

        let clarity = clarity_score(answer, length, answer_doc, config);
        let accuracy = accuracy_score(
            answer,
            question,
            pair.as_ref(),
            &self.indicators,
            difficulty,
            &config.multipliers,
        );
        let communication = communication_score(&answer_lower, answer_doc, &self.indicators);
        let confidence = confidence_score(&answer_lower, &self.indicators);

        let scores = SubScores {
            clarity: clarity.score,
            accuracy: accuracy.score,
            communication: communication.score,
            confidence: confidence.score,
        };
        let overall = scores.weighted(&config.weights);

        debug!(
            mode = %mode,
            clarity = scores.clarity,
            accuracy = scores.accuracy,
            communication = scores.communication,
            confidence = scores.confidence,
            overall,
            "answer evaluated"
        );

        let result = EvaluationResult {
            clarity: scores.clarity,
            accuracy: scores.accuracy,
            communication: scores.communication,
            confidence: scores.confidence,
            overall,
            feedback: compose_feedback(&scores, overall, length, config),
            strengths: strengths(&scores, &answer_lower, &self.indicators, config),
            improvements: improvements(&scores, length, config),
        };

        Evaluation {
            result,
            breakdown: vec![
                (Axis::Clarity, clarity),
                (Axis::Accuracy, accuracy),
                (Axis::Communication, communication),
                (Axis::Confidence, confidence),
            ],
            mode,
        }
    }
}
