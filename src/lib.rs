pub mod difficulty;
pub mod generation;
pub mod interview;
pub mod scoring;
pub mod settings;
pub mod utils;

pub use difficulty::Difficulty;
pub use generation::{GeneratedQuestion, QuestionGenerator, QuestionType};
pub use interview::{InterviewReport, MockInterview};
pub use scoring::{AnswerEvaluator, EvaluationRecord, EvaluationResult, LanguageProvider};
pub use settings::{settings, Settings};
