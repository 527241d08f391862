mod generator;
pub mod knowledge;
pub mod templates;

pub use generator::{GeneratedQuestion, QuestionGenerator};
pub use knowledge::{ConceptGroup, DomainKnowledge, DomainProfile, DEFAULT_DOMAIN};
pub use templates::{QuestionTemplate, QuestionType, Slot, SlotFamily, TemplateSet};
