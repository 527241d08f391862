use anyhow::{anyhow, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::knowledge::{DomainKnowledge, DomainProfile};
use super::templates::{QuestionType, TemplateSet};
use crate::difficulty::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub domain: String,
    /// 1-based position within the interview.
    pub ordinal: usize,
}

#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    knowledge: DomainKnowledge,
    templates: TemplateSet,
    default_domain: String,
    default_index: usize,
}

impl QuestionGenerator {
    pub fn new(
        knowledge: DomainKnowledge,
        templates: TemplateSet,
        default_domain: &str,
    ) -> Result<Self> {
        templates.validate(&knowledge)?;
        let default_name = knowledge
            .get(default_domain)
            .map(|p| p.name.clone())
            .ok_or_else(|| anyhow!("default domain \"{default_domain}\" has no profile"))?;
        let default_index = knowledge
            .profiles()
            .iter()
            .position(|p| p.name == default_name)
            .unwrap_or_default();

        Ok(Self {
            knowledge,
            templates,
            default_domain: default_name,
            default_index,
        })
    }

    pub fn builtin(default_domain: &str) -> Result<Self> {
        Self::new(DomainKnowledge::builtin(), TemplateSet::builtin()?, default_domain)
    }

    pub fn knowledge(&self) -> &DomainKnowledge {
        &self.knowledge
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    pub fn generate(
        &self,
        domain: &str,
        count: usize,
        difficulty: Difficulty,
    ) -> Vec<GeneratedQuestion> {
        self.generate_with_rng(domain, count, difficulty, &mut rand::rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        domain: &str,
        count: usize,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Vec<GeneratedQuestion> {
        let profile = self.resolve_domain(domain);
        let templates = self.templates.get(&profile.name);
        let mut used: HashSet<usize> = HashSet::new();
        let mut questions = Vec::with_capacity(count.min(templates.len()));

        while questions.len() < count {
            let mut candidates: Vec<usize> =
                (0..templates.len()).filter(|i| !used.contains(i)).collect();
            if candidates.is_empty() {
                used.clear();
                candidates = (0..templates.len()).collect();
            }

            let Some(&index) = candidates.choose(rng) else {
                break;
            };
            used.insert(index);

            let template = &templates[index];
            let Some(text) = template.fill(profile, rng) else {
                debug!(template = %template.text, "skipping unresolvable template");
                continue;
            };
            debug!(domain = %profile.name, template = %template.text, "filled template");

            questions.push(GeneratedQuestion {
                text,
                question_type: template.question_type,
                difficulty,
                domain: profile.name.clone(),
                ordinal: questions.len() + 1,
            });
        }

        questions
    }

    fn resolve_domain(&self, domain: &str) -> &DomainProfile {
        match self.knowledge.get(domain) {
            Some(profile) => profile,
            None => {
                debug!(requested = domain, fallback = %self.default_domain, "unknown domain");
                &self.knowledge.profiles()[self.default_index]
            }
        }
    }
}
