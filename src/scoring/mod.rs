mod accuracy;
mod clarity;
mod communication;
mod confidence;
mod evaluator;
mod feedback;
pub mod indicators;
pub mod language;
#[cfg(feature = "model")]
mod nlp;
pub mod score;

pub use evaluator::{AnswerEvaluator, Evaluation, EvaluationRecord, EvaluationResult};
pub use feedback::{COMPLETE_ANSWER_IMPROVEMENT, SHORT_ANSWER_FEEDBACK};
pub use indicators::{IndicatorTable, Signal};
pub use language::{
    AnalyzedPair, AnalyzedText, LanguageAnalysis, LanguageProvider, ModelTier, PartOfSpeech,
    Token,
};
pub use score::{Axis, AxisScore, SubScores};
