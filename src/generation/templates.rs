use anyhow::{anyhow, bail, Result};
use rand::seq::{index, IndexedRandom};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use strum::{Display, EnumString, IntoStaticStr};

use super::knowledge::{DomainKnowledge, DomainProfile};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([a-z0-9_]+)\}").unwrap());

const BEHAVIORAL_CUES: &[&str] = &["describe", "tell me", "share", "time when"];
const SITUATIONAL_CUES: &[&str] = &["how would", "how do", "what would"];
const TECHNICAL_CUES: &[&str] = &["explain", "what is", "difference between"];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Slot {
    Topic,
    Technology,
    Tool,
    Scenario,
    Situation,
    Challenge,
    Concept,
    Component,
    InvestmentType,
    Event,
    Context,
}

impl Slot {
    pub fn placeholder(&self) -> String {
        format!("{{{self}}}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    /// `{concept1}` / `{concept2}`, drawn from one concept group.
    Concepts,
    /// `{option1}` / `{option2}`, drawn from the curated contrasts.
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFamily {
    Fixed,
    Single(Slot),
    Pair(PairKind),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    Behavioral,
    Situational,
    General,
}

impl QuestionType {
    /// Cue sets are checked in priority order: behavioral, situational, technical.
    pub fn classify(template: &str) -> Self {
        let lower = template.to_lowercase();
        let has_cue = |cues: &[&str]| cues.iter().any(|cue| lower.contains(cue));

        if has_cue(BEHAVIORAL_CUES) {
            Self::Behavioral
        } else if has_cue(SITUATIONAL_CUES) {
            Self::Situational
        } else if has_cue(TECHNICAL_CUES) {
            Self::Technical
        } else {
            Self::General
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionTemplate {
    pub text: String,
    pub family: SlotFamily,
    pub question_type: QuestionType,
}

impl QuestionTemplate {
    pub fn parse(text: &str) -> Result<Self> {
        let mut names: Vec<&str> = PLACEHOLDER
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();

        let family = match names.as_slice() {
            [] => SlotFamily::Fixed,
            ["concept1", "concept2"] => SlotFamily::Pair(PairKind::Concepts),
            ["option1", "option2"] => SlotFamily::Pair(PairKind::Options),
            [name] => SlotFamily::Single(
                name.parse()
                    .map_err(|_| anyhow!("unknown placeholder {{{name}}} in \"{text}\""))?,
            ),
            _ => bail!("more than one slot family {names:?} in \"{text}\""),
        };

        let stripped = PLACEHOLDER.replace_all(text, "");
        if stripped.contains('{') || stripped.contains('}') {
            bail!("malformed placeholder in \"{text}\"");
        }

        Ok(Self {
            text: text.to_string(),
            family,
            question_type: QuestionType::classify(text),
        })
    }

    pub fn is_resolvable(&self, profile: &DomainProfile) -> bool {
        match self.family {
            SlotFamily::Fixed => true,
            SlotFamily::Single(slot) => !profile.vocabulary(slot).is_empty(),
            SlotFamily::Pair(PairKind::Concepts) => !profile.pairable_groups().is_empty(),
            SlotFamily::Pair(PairKind::Options) => !profile.valid_contrasts().is_empty(),
        }
    }

    /// Returns `None` only when the profile cannot resolve this template.
    pub fn fill<R: Rng + ?Sized>(&self, profile: &DomainProfile, rng: &mut R) -> Option<String> {
        match self.family {
            SlotFamily::Fixed => Some(self.text.clone()),
            SlotFamily::Single(slot) => {
                let value = profile.vocabulary(slot).choose(rng).copied()?;
                Some(self.text.replace(&slot.placeholder(), value))
            }
            SlotFamily::Pair(PairKind::Concepts) => {
                let group = profile.pairable_groups().choose(rng).copied()?;
                let terms = group.distinct_terms();
                let drawn = index::sample(rng, terms.len(), 2);
                Some(
                    self.text
                        .replace("{concept1}", terms[drawn.index(0)])
                        .replace("{concept2}", terms[drawn.index(1)]),
                )
            }
            SlotFamily::Pair(PairKind::Options) => {
                let (first, second) = profile.valid_contrasts().choose(rng).copied()?;
                Some(
                    self.text
                        .replace("{option1}", first)
                        .replace("{option2}", second),
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    domains: BTreeMap<String, Vec<QuestionTemplate>>,
}

impl TemplateSet {
    pub fn from_texts<'a>(
        domains: impl IntoIterator<Item = (&'a str, &'a [&'a str])>,
    ) -> Result<Self> {
        let mut set = Self::default();
        for (domain, texts) in domains {
            let templates = texts
                .iter()
                .map(|text| QuestionTemplate::parse(text))
                .collect::<Result<Vec<_>>>()?;
            set.domains.insert(domain.to_string(), templates);
        }
        Ok(set)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_texts([
            ("IT/Software Engineering", SOFTWARE_ENGINEERING),
            ("HR/Human Resources", HUMAN_RESOURCES),
            ("Finance", FINANCE),
            ("Management", MANAGEMENT),
        ])
    }

    pub fn get(&self, domain: &str) -> &[QuestionTemplate] {
        self.domains.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn validate(&self, knowledge: &DomainKnowledge) -> Result<()> {
        for (domain, templates) in &self.domains {
            let profile = knowledge
                .profiles()
                .iter()
                .find(|p| &p.name == domain)
                .ok_or_else(|| anyhow!("templates reference unknown domain \"{domain}\""))?;

            if let Some(template) = templates.iter().find(|t| !t.is_resolvable(profile)) {
                bail!(
                    "template \"{}\" cannot be resolved from domain \"{domain}\"",
                    template.text
                );
            }
        }

        for profile in knowledge.profiles() {
            if self.get(&profile.name).is_empty() {
                bail!("domain \"{}\" has no question templates", profile.name);
            }
        }

        Ok(())
    }
}

const SOFTWARE_ENGINEERING: &[&str] = &[
    "Explain {topic} and its importance in software development.",
    "What is the difference between {concept1} and {concept2}?",
    "How would you design a system to handle {scenario}?",
    "Describe your experience with {technology}. What challenges did you face?",
    "What are the best practices for implementing {topic}?",
    "How would you optimize a {component} for better performance?",
    "Explain the trade-offs between {option1} and {option2}.",
    "How do you ensure code quality when working with {technology}?",
    "Describe a time when you had to debug a complex issue related to {topic}.",
    "What security considerations should be taken when working with {technology}?",
];

const HUMAN_RESOURCES: &[&str] = &[
    "Tell me about yourself and your professional background.",
    "Describe a time when you {situation}. What was the outcome?",
    "How do you handle {challenge} in the workplace?",
    "What are your greatest strengths and how do they help you in your role?",
    "Can you share an example of a weakness you've worked on improving?",
    "Why are you interested in this position and our company?",
    "How do you prioritize tasks when you have multiple deadlines?",
    "Describe a situation where you had to work with a difficult team member.",
    "How do you stay motivated during challenging projects?",
    "Where do you see yourself in 5 years?",
];

const FINANCE: &[&str] = &[
    "Explain {concept} and its application in financial analysis.",
    "How would you analyze {scenario} from a financial perspective?",
    "What factors would you consider when evaluating {investment_type}?",
    "Describe your experience with {tool} and how you've used it in analysis.",
    "How do you assess the financial health of a company?",
    "Explain the impact of {event} on financial markets.",
    "What is your approach to risk management in {context}?",
    "How would you present financial data to non-financial stakeholders?",
    "Describe a time when your financial analysis led to an important decision.",
    "What trends do you see in the current financial market?",
];

const MANAGEMENT: &[&str] = &[
    "How do you motivate and inspire your team members?",
    "Describe a time when you had to make a difficult decision as a manager.",
    "How do you handle conflict within your team?",
    "What is your leadership style and how has it evolved?",
    "How do you prioritize tasks and manage your team's workload?",
    "Describe a situation where you had to manage an underperforming team member.",
    "How do you ensure effective communication within your team?",
    "What strategies do you use for change management?",
    "How do you balance the needs of your team with organizational goals?",
    "Describe your approach to developing and mentoring team members.",
];
