use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::difficulty::Difficulty;
use crate::scoring::ModelTier;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub generation: Generation,
    pub evaluation: Evaluation,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub default_domain: String,
    pub default_count: usize,
    /// Upper bound on questions per interview at the caller-facing API.
    pub max_count: usize,
    pub default_difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Trimmed answers shorter than this get the terminal zero-score result.
    pub min_answer_chars: usize,
    pub minimum_length: usize,
    pub ideal_length: usize,
    pub weights: ScoreWeights,
    pub thresholds: FeedbackThresholds,
    pub multipliers: DifficultyMultipliers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub clarity: f32,
    pub accuracy: f32,
    pub communication: f32,
    pub confidence: f32,
}

impl ScoreWeights {
    /// Non-negative and summing to 1.0, so the overall score stays in [0, 100].
    pub fn validate(&self) -> Result<()> {
        let weights = [self.clarity, self.accuracy, self.communication, self.confidence];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            bail!("score weights must be finite and non-negative, got {weights:?}");
        }
        let sum: f32 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-3 {
            bail!("score weights must sum to 1.0, got {sum}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    pub excellent: f32,
    pub good: f32,
    pub adequate: f32,
    pub weak_axis: f32,
    pub strong_axis: f32,
    pub highlight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyMultipliers {
    pub easy: f32,
    pub medium: f32,
    pub hard: f32,
}

impl DifficultyMultipliers {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("easy", self.easy), ("medium", self.medium), ("hard", self.hard)] {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} difficulty multiplier must be finite and non-negative, got {value}");
            }
        }
        Ok(())
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub enabled: bool,
    pub model_preference: Vec<ModelTier>,
}

impl Evaluation {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.multipliers.validate()
    }
}

impl Default for Evaluation {
    fn default() -> Self {
        Self {
            min_answer_chars: 10,
            minimum_length: 20,
            ideal_length: 100,
            weights: ScoreWeights {
                clarity: 0.25,
                accuracy: 0.30,
                communication: 0.25,
                confidence: 0.20,
            },
            thresholds: FeedbackThresholds {
                excellent: 80.0,
                good: 65.0,
                adequate: 50.0,
                weak_axis: 60.0,
                strong_axis: 80.0,
                highlight: 70.0,
            },
            multipliers: DifficultyMultipliers {
                easy: 1.1,
                medium: 1.0,
                hard: 0.9,
            },
        }
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            enabled: true,
            model_preference: vec![ModelTier::Full, ModelTier::Compact, ModelTier::Tagger],
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generation: Generation {
                default_domain: crate::generation::DEFAULT_DOMAIN.to_string(),
                default_count: 5,
                max_count: 50,
                default_difficulty: Difficulty::Medium,
            },
            evaluation: Evaluation::default(),
            analysis: Analysis::default(),
        }
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        SETTINGS.get_or_init(Self::load_from_files)
    }

    fn load_from_files() -> Settings {
        let default_path = Path::new("settings.default.ron");
        let override_path = Path::new("settings.ron");

        let mut settings = if default_path.exists() {
            fs::read_to_string(default_path)
                .ok()
                .and_then(|content| ron::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Settings::default()
        };

        if override_path.exists() {
            if let Ok(content) = fs::read_to_string(override_path) {
                if let Ok(overrides) = ron::from_str::<Settings>(&content) {
                    settings = overrides;
                }
            }
        }

        settings
    }
}

pub fn settings() -> &'static Settings {
    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let w = Settings::default().evaluation.weights;
        let sum = w.clarity + w.accuracy + w.communication + w.confidence;
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(w.accuracy > w.clarity && w.accuracy > w.confidence);
    }

    #[test]
    fn test_ron_round_trip_keeps_preference_order() {
        let defaults = Settings::default();
        let text = ron::to_string(&defaults).expect("serialize settings");
        let parsed: Settings = ron::from_str(&text).expect("parse settings");
        assert_eq!(
            parsed.analysis.model_preference,
            defaults.analysis.model_preference
        );
        assert_eq!(parsed.generation.default_domain, "IT/Software Engineering");
    }

    #[test]
    fn test_shipped_defaults_match_code() {
        let shipped: Settings = ron::from_str(include_str!("../settings.default.ron"))
            .expect("parse settings.default.ron");
        let defaults = Settings::default();
        assert_eq!(
            shipped.generation.default_domain,
            defaults.generation.default_domain
        );
        assert_eq!(
            shipped.evaluation.minimum_length,
            defaults.evaluation.minimum_length
        );
        assert_eq!(
            shipped.analysis.model_preference,
            defaults.analysis.model_preference
        );
    }

    #[test]
    fn test_validate_weights() {
        assert!(Settings::default().evaluation.validate().is_ok());

        let mut evaluation = Evaluation::default();
        evaluation.weights.clarity = 1.0;
        evaluation.weights.accuracy = 1.0;
        assert!(evaluation.validate().is_err());

        let mut evaluation = Evaluation::default();
        evaluation.weights.clarity = -0.25;
        evaluation.weights.accuracy = 0.80;
        assert!(evaluation.validate().is_err());

        let mut evaluation = Evaluation::default();
        evaluation.weights.confidence = f32::NAN;
        assert!(evaluation.validate().is_err());
    }

    #[test]
    fn test_validate_multipliers() {
        let mut evaluation = Evaluation::default();
        evaluation.multipliers.hard = -0.9;
        assert!(evaluation.validate().is_err());
    }

    #[test]
    fn test_multiplier_lookup() {
        let m = Settings::default().evaluation.multipliers;
        assert!(m.for_difficulty(Difficulty::Hard) < m.for_difficulty(Difficulty::Easy));
        assert_eq!(m.for_difficulty(Difficulty::Medium), 1.0);
    }
}
