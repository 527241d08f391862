use std::collections::BTreeMap;

use super::templates::Slot;
use crate::difficulty::Difficulty;

pub const DEFAULT_DOMAIN: &str = "IT/Software Engineering";

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptGroup {
    pub name: String,
    pub terms: Vec<String>,
}

impl ConceptGroup {
    pub fn new(name: &str, terms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            terms: strings(terms),
        }
    }

    /// Terms with duplicates removed, first occurrence wins.
    pub fn distinct_terms(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            if !seen.contains(&term.as_str()) {
                seen.push(term.as_str());
            }
        }
        seen
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomainProfile {
    pub name: String,
    pub description: String,
    pub difficulty_levels: Vec<Difficulty>,
    pub topics: Vec<String>,
    pub concepts: Vec<ConceptGroup>,
    pub technologies: Vec<String>,
    pub tools: Vec<String>,
    pub situations: Vec<String>,
    pub challenges: Vec<String>,
    pub scenarios: Vec<String>,
    pub contrasts: Vec<(String, String)>,
    pub auxiliary: BTreeMap<Slot, Vec<String>>,
}

impl DomainProfile {
    /// Vocabulary a single placeholder draws from.
    pub fn vocabulary(&self, slot: Slot) -> Vec<&str> {
        let list = match slot {
            Slot::Topic => &self.topics,
            Slot::Technology => &self.technologies,
            Slot::Tool => &self.tools,
            Slot::Situation => &self.situations,
            Slot::Challenge => &self.challenges,
            Slot::Scenario => &self.scenarios,
            Slot::Concept => {
                return self
                    .concepts
                    .iter()
                    .flat_map(|group| group.terms.iter().map(String::as_str))
                    .collect();
            }
            _ => match self.auxiliary.get(&slot) {
                Some(values) => values,
                None => return Vec::new(),
            },
        };
        list.iter().map(String::as_str).collect()
    }

    /// Concept groups that can fill a two-concept comparison.
    pub fn pairable_groups(&self) -> Vec<&ConceptGroup> {
        self.concepts
            .iter()
            .filter(|group| group.distinct_terms().len() >= 2)
            .collect()
    }

    pub fn valid_contrasts(&self) -> Vec<(&str, &str)> {
        self.contrasts
            .iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomainKnowledge {
    profiles: Vec<DomainProfile>,
}

impl DomainKnowledge {
    pub fn new(profiles: Vec<DomainProfile>) -> Self {
        Self { profiles }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            software_engineering(),
            human_resources(),
            finance(),
            management(),
        ])
    }

    /// Exact name first, then ASCII case-insensitive.
    pub fn get(&self, name: &str) -> Option<&DomainProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .or_else(|| {
                let name = name.trim();
                self.profiles
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn profiles(&self) -> &[DomainProfile] {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn software_engineering() -> DomainProfile {
    DomainProfile {
        name: DEFAULT_DOMAIN.into(),
        description: "Technical interviews for software development roles".into(),
        difficulty_levels: vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
        topics: strings(&[
            "Object-Oriented Programming",
            "Data Structures",
            "Algorithms",
            "Database Design",
            "RESTful APIs",
            "Microservices Architecture",
            "Cloud Computing",
            "DevOps",
            "Software Testing",
            "Version Control",
            "Design Patterns",
            "System Design",
            "Security",
            "Performance Optimization",
        ]),
        concepts: vec![
            ConceptGroup::new(
                "OOP",
                &["Encapsulation", "Inheritance", "Polymorphism", "Abstraction"],
            ),
            ConceptGroup::new(
                "Data Structures",
                &["Arrays", "Linked Lists", "Stacks", "Queues", "Trees", "Graphs"],
            ),
            ConceptGroup::new(
                "Algorithms",
                &["Sorting", "Searching", "Dynamic Programming", "Greedy Algorithms"],
            ),
            ConceptGroup::new(
                "Databases",
                &["SQL", "NoSQL", "ACID Properties", "Normalization", "Indexing"],
            ),
        ],
        technologies: strings(&[
            "Python",
            "Java",
            "JavaScript",
            "React",
            "Node.js",
            "Docker",
            "Kubernetes",
        ]),
        scenarios: strings(&["high traffic", "data consistency", "scalability", "security"]),
        contrasts: vec![
            ("SQL".into(), "NoSQL".into()),
            ("Monolithic".into(), "Microservices".into()),
            ("Synchronous".into(), "Asynchronous".into()),
            ("Caching".into(), "Database queries".into()),
        ],
        auxiliary: BTreeMap::from([(
            Slot::Component,
            strings(&[
                "database query",
                "API endpoint",
                "frontend component",
                "algorithm",
            ]),
        )]),
        ..Default::default()
    }
}

fn human_resources() -> DomainProfile {
    DomainProfile {
        name: "HR/Human Resources".into(),
        description: "Behavioral and situational HR interview questions".into(),
        difficulty_levels: vec![Difficulty::Easy, Difficulty::Medium],
        topics: strings(&[
            "Teamwork",
            "Leadership",
            "Problem Solving",
            "Communication",
            "Time Management",
            "Conflict Resolution",
            "Adaptability",
            "Work Ethics",
        ]),
        situations: strings(&[
            "worked under pressure",
            "handled a difficult situation",
            "led a team project",
            "resolved a conflict",
            "learned a new skill",
            "made a mistake",
            "achieved a goal",
            "worked with a difficult colleague",
        ]),
        challenges: strings(&[
            "tight deadlines",
            "conflicting priorities",
            "team disagreements",
            "unclear requirements",
            "resource constraints",
        ]),
        ..Default::default()
    }
}

fn finance() -> DomainProfile {
    let tools = ["Excel", "Bloomberg", "Financial Statements", "Valuation Models"];
    DomainProfile {
        name: "Finance".into(),
        description: "Financial analysis and accounting interview questions".into(),
        difficulty_levels: vec![Difficulty::Medium, Difficulty::Hard],
        topics: strings(&[
            "Financial Analysis",
            "Investment Banking",
            "Risk Management",
            "Accounting Principles",
            "Financial Modeling",
            "Market Analysis",
            "Portfolio Management",
            "Corporate Finance",
        ]),
        concepts: vec![
            ConceptGroup::new("Analysis", &["DCF", "NPV", "IRR", "ROI", "Financial Ratios"]),
            ConceptGroup::new(
                "Markets",
                &["Stock Market", "Bond Market", "Derivatives", "Forex"],
            ),
            ConceptGroup::new("Tools", &tools),
        ],
        tools: strings(&tools),
        scenarios: strings(&[
            "company valuation",
            "investment decision",
            "risk assessment",
            "market trend analysis",
            "financial planning",
        ]),
        auxiliary: BTreeMap::from([
            (
                Slot::InvestmentType,
                strings(&["stocks", "bonds", "real estate", "startups", "mutual funds"]),
            ),
            (
                Slot::Event,
                strings(&[
                    "interest rate changes",
                    "market volatility",
                    "economic recession",
                    "regulatory changes",
                ]),
            ),
            (
                Slot::Context,
                strings(&[
                    "portfolio management",
                    "corporate finance",
                    "investment banking",
                ]),
            ),
        ]),
        ..Default::default()
    }
}

fn management() -> DomainProfile {
    DomainProfile {
        name: "Management".into(),
        description: "Leadership and management interview questions".into(),
        difficulty_levels: vec![Difficulty::Medium, Difficulty::Hard],
        topics: strings(&[
            "Leadership",
            "Strategic Planning",
            "Team Management",
            "Change Management",
            "Decision Making",
            "Performance Management",
        ]),
        situations: strings(&[
            "leading a team",
            "managing a project",
            "handling underperformance",
            "implementing change",
            "making strategic decisions",
        ]),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_domains() {
        let knowledge = DomainKnowledge::builtin();
        assert_eq!(
            knowledge.names(),
            vec![
                "IT/Software Engineering",
                "HR/Human Resources",
                "Finance",
                "Management"
            ]
        );
        assert!(knowledge.get(DEFAULT_DOMAIN).is_some());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let knowledge = DomainKnowledge::builtin();
        let profile = knowledge.get("finance").expect("finance profile");
        assert_eq!(profile.name, "Finance");
        assert!(knowledge.get("Astrology").is_none());
    }

    #[test]
    fn test_concept_vocabulary_flattens_groups() {
        let knowledge = DomainKnowledge::builtin();
        let finance = knowledge.get("Finance").unwrap();
        let concepts = finance.vocabulary(Slot::Concept);
        assert_eq!(concepts.len(), 13);
        assert!(concepts.contains(&"Bloomberg"));
        assert!(concepts.contains(&"NPV"));
    }

    #[test]
    fn test_pairable_groups_skip_single_member_groups() {
        let profile = DomainProfile {
            concepts: vec![
                ConceptGroup::new("lonely", &["Only"]),
                ConceptGroup::new("echo", &["Same", "Same"]),
                ConceptGroup::new("pair", &["Left", "Right"]),
            ],
            ..Default::default()
        };
        let groups = profile.pairable_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "pair");
    }

    #[test]
    fn test_auxiliary_vocabulary_missing_slot_is_empty() {
        let knowledge = DomainKnowledge::builtin();
        let hr = knowledge.get("HR/Human Resources").unwrap();
        assert!(hr.vocabulary(Slot::Component).is_empty());
        assert_eq!(hr.vocabulary(Slot::Challenge).len(), 5);
    }
}
