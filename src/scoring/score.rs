use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::settings::ScoreWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Clarity,
    Accuracy,
    Communication,
    Confidence,
}

/// The four sub-scores of one answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub clarity: f32,
    pub accuracy: f32,
    pub communication: f32,
    pub confidence: f32,
}

impl SubScores {
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Clarity => self.clarity,
            Axis::Accuracy => self.accuracy,
            Axis::Communication => self.communication,
            Axis::Confidence => self.confidence,
        }
    }

    /// Axes in reporting order with their scores.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f32)> + '_ {
        Axis::iter().map(|axis| (axis, self.get(axis)))
    }

    pub fn weighted(&self, weights: &ScoreWeights) -> f32 {
        self.clarity * weights.clarity
            + self.accuracy * weights.accuracy
            + self.communication * weights.communication
            + self.confidence * weights.confidence
    }
}

/// One sub-score with the adjustments that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisScore {
    pub score: f32,
    pub boost_reasons: Vec<String>,
    pub penalty_reasons: Vec<String>,
}

impl AxisScore {
    pub fn new(base: f32) -> Self {
        Self {
            score: base,
            ..Default::default()
        }
    }

    pub fn boost(&mut self, amount: f32, reason: &str) {
        if amount > 0.0 {
            self.score += amount;
            self.boost_reasons.push(format!("{reason} (+{amount:.1})"));
        }
    }

    pub fn penalize(&mut self, amount: f32, reason: &str) {
        if amount > 0.0 {
            self.score -= amount;
            self.penalty_reasons.push(format!("{reason} (-{amount:.1})"));
        }
    }

    pub fn scale(&mut self, factor: f32, reason: &str) {
        if factor > 1.0 {
            self.boost_reasons.push(format!("{reason} (x{factor:.2})"));
        } else if factor < 1.0 {
            self.penalty_reasons.push(format!("{reason} (x{factor:.2})"));
        }
        self.score *= factor;
    }

    pub fn cap(mut self, max: f32) -> Self {
        self.score = self.score.min(max);
        self
    }

    pub fn clamp(mut self, min: f32, max: f32) -> Self {
        self.score = self.score.clamp(min, max);
        self
    }
}

/// `min(count * per_hit, max)` as used by every counted signal.
pub fn capped(count: usize, per_hit: f32, max: f32) -> f32 {
    (count as f32 * per_hit).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_and_penalty_reasons() {
        let mut axis = AxisScore::new(50.0);
        axis.boost(10.0, "structure");
        axis.boost(0.0, "ignored");
        axis.penalize(5.0, "hedging");
        assert_eq!(axis.score, 55.0);
        assert_eq!(axis.boost_reasons, vec!["structure (+10.0)"]);
        assert_eq!(axis.penalty_reasons, vec!["hedging (-5.0)"]);
    }

    #[test]
    fn test_scale_then_cap() {
        let mut axis = AxisScore::new(95.0);
        axis.scale(1.1, "easy");
        let capped_axis = axis.cap(100.0);
        assert_eq!(capped_axis.score, 100.0);
        assert_eq!(capped_axis.boost_reasons.len(), 1);
    }

    #[test]
    fn test_clamp_floor() {
        let mut axis = AxisScore::new(10.0);
        axis.penalize(35.0, "negative");
        assert_eq!(axis.clamp(0.0, 100.0).score, 0.0);
    }

    #[test]
    fn test_weighted_sum() {
        let scores = SubScores {
            clarity: 80.0,
            accuracy: 60.0,
            communication: 70.0,
            confidence: 50.0,
        };
        let weights = crate::settings::Evaluation::default().weights;
        assert!((scores.weighted(&weights) - 65.5).abs() < 1e-4);
        let order: Vec<Axis> = scores.iter().map(|(axis, _)| axis).collect();
        assert_eq!(order.first(), Some(&Axis::Clarity));
        assert_eq!(order.last(), Some(&Axis::Confidence));
    }

    #[test]
    fn test_capped() {
        assert_eq!(capped(2, 5.0, 15.0), 10.0);
        assert_eq!(capped(7, 5.0, 15.0), 15.0);
        assert_eq!(capped(0, 5.0, 15.0), 0.0);
    }
}
