use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::Range;
use std::sync::{Arc, LazyLock, OnceLock};
use strum::{Display, EnumIter};
use tracing::{info, warn};

use crate::settings::Analysis;

static PROVIDER: OnceLock<LanguageProvider> = OnceLock::new();
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

pub const LEXICAL_KEYWORD_LIMIT: usize = 10;

const LEXICAL_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "could", "may", "might", "must", "this", "that", "these", "those", "i",
    "you", "he", "she", "it", "we", "they",
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "an", "and",
    "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are", "around", "as",
    "at", "back", "be", "became", "because", "become", "been", "before", "being", "below",
    "beside", "besides", "between", "beyond", "both", "but", "by", "can", "cannot", "could", "did",
    "do", "does", "doing", "done", "down", "due", "during", "each", "either", "else", "enough",
    "even", "ever", "every", "everyone", "everything", "few", "first", "for", "former", "from",
    "further", "get", "give", "go", "had", "has", "have", "he", "hence", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "indeed", "into", "is",
    "it", "its", "itself", "just", "keep", "last", "least", "less", "made", "make", "many", "may",
    "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "much", "must", "my",
    "myself", "neither", "never", "nevertheless", "next", "no", "nobody", "none", "nor", "not",
    "nothing", "now", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part", "per",
    "perhaps", "please", "put", "quite", "rather", "really", "same", "say", "see", "seem", "several",
    "she", "should", "show", "side", "since", "so", "some", "something", "sometimes", "still",
    "such", "take", "than", "that", "the", "their", "them", "themselves", "then", "there",
    "therefore", "these", "they", "third", "this", "those", "though", "through", "thus", "to",
    "together", "too", "toward", "under", "until", "up", "upon", "us", "used", "using", "various",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "where", "whether",
    "which", "while", "who", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'m", "'s", "'re", "will", "would",
    "shall", "should", "can", "could", "may", "might", "must",
];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "since", "whether",
    "that", "once", "until",
];

const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("led", "lead"),
    ("made", "make"),
    ("built", "build"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("gotten", "get"),
    ("gave", "give"),
    ("given", "give"),
    ("saw", "see"),
    ("seen", "see"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("brought", "bring"),
    ("began", "begin"),
    ("begun", "begin"),
    ("wrote", "write"),
    ("written", "write"),
    ("ran", "run"),
    ("found", "find"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("left", "leave"),
    ("met", "meet"),
    ("taught", "teach"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("analyses", "analysis"),
    ("criteria", "criterion"),
    ("data", "data"),
];

/// Language model configurations, most capable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Tagging, entities and all-MiniLM-L12-v2 sentence embeddings.
    Full,
    /// Tagging, entities and all-MiniLM-L6-v2 sentence embeddings.
    Compact,
    /// Tagging and entities only.
    Tagger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    CConj,
    SConj,
    Num,
    Part,
    Punct,
    Sym,
    Other,
}

impl PartOfSpeech {
    /// Maps a Penn Treebank tag onto the universal tag set.
    pub fn from_penn(tag: &str, word: &str) -> Self {
        let lower = word.to_lowercase();
        match tag {
            "NN" | "NNS" => Self::Noun,
            "NNP" | "NNPS" => Self::ProperNoun,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => {
                if AUXILIARIES.contains(&lower.as_str()) {
                    Self::Aux
                } else {
                    Self::Verb
                }
            }
            "MD" => Self::Aux,
            "JJ" | "JJR" | "JJS" => Self::Adj,
            "RB" | "RBR" | "RBS" | "WRB" => Self::Adv,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => Self::Pron,
            "DT" | "PDT" | "WDT" => Self::Det,
            "IN" => {
                if SUBORDINATORS.contains(&lower.as_str()) {
                    Self::SConj
                } else {
                    Self::Adp
                }
            }
            "CC" => Self::CConj,
            "CD" => Self::Num,
            "RP" | "TO" | "POS" => Self::Part,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "HYPH" | "NFP" => Self::Punct,
            "$" | "#" | "SYM" => Self::Sym,
            _ if is_punctuation(word) => Self::Punct,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    pub fn new(text: &str, pos: PartOfSpeech) -> Self {
        let lower = text.to_lowercase();
        Self {
            text: text.to_string(),
            lemma: lemmatize(text, pos),
            pos,
            is_stop: STOP_WORDS.contains(&lower.as_str()),
            is_punct: pos == PartOfSpeech::Punct || is_punctuation(text),
        }
    }

    fn ends_sentence(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| matches!(c, '.' | '!' | '?'))
    }
}

/// A text after tagging: tokens, sentence spans over the tokens, entity
/// strings and an optional sentence embedding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzedText {
    pub tokens: Vec<Token>,
    pub sentences: Vec<Range<usize>>,
    pub entities: Vec<String>,
    pub embedding: Option<Vec<f32>>,
}

impl AnalyzedText {
    /// Sentences end after sentence-final punctuation; trailing tokens form a
    /// last sentence.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut sentences = Vec::new();
        let mut start = 0;
        for (i, token) in tokens.iter().enumerate() {
            if token.ends_sentence() {
                let next_also_ends = tokens.get(i + 1).is_some_and(Token::ends_sentence);
                if !next_also_ends {
                    sentences.push(start..i + 1);
                    start = i + 1;
                }
            }
        }
        if start < tokens.len() {
            sentences.push(start..tokens.len());
        }

        Self {
            tokens,
            sentences,
            ..Default::default()
        }
    }

    pub fn with_entities(mut self, entities: Vec<String>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn sentence_lengths(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.len()).collect()
    }

    pub fn mean_sentence_length(&self) -> f32 {
        if self.sentences.is_empty() {
            return 0.0;
        }
        self.sentence_lengths().iter().sum::<usize>() as f32 / self.sentences.len() as f32
    }

    pub fn has_pos(&self, pos: PartOfSpeech) -> bool {
        self.tokens.iter().any(|t| t.pos == pos)
    }

    pub fn count_pos(&self, tags: &[PartOfSpeech]) -> usize {
        self.tokens.iter().filter(|t| tags.contains(&t.pos)).count()
    }

    pub fn has_punctuation(&self) -> bool {
        self.tokens.iter().any(|t| t.is_punct)
    }

    /// Lemmas of nouns and verbs that are not stopwords.
    pub fn content_lemmas(&self) -> BTreeSet<String> {
        self.tokens
            .iter()
            .filter(|t| matches!(t.pos, PartOfSpeech::Noun | PartOfSpeech::Verb) && !t.is_stop)
            .map(|t| t.lemma.clone())
            .collect()
    }

    pub fn entity_set(&self) -> BTreeSet<String> {
        self.entities.iter().map(|e| e.to_lowercase()).collect()
    }

    pub fn count_lemmas(&self, words: &[&str]) -> usize {
        self.tokens
            .iter()
            .filter(|t| words.contains(&t.lemma.as_str()))
            .count()
    }
}

/// Linguistic features beyond substring matching.
pub trait LanguageAnalysis: Send + Sync {
    fn name(&self) -> String;

    fn analyze(&self, text: &str) -> Result<AnalyzedText>;

    /// Symmetric, in `[0, 1]`.
    fn similarity(&self, a: &AnalyzedText, b: &AnalyzedText) -> f32 {
        lemma_similarity(a, b)
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzedPair {
    pub answer: AnalyzedText,
    pub question: AnalyzedText,
    pub similarity: f32,
}

#[derive(Clone, Default)]
pub enum LanguageProvider {
    Model(Arc<dyn LanguageAnalysis>),
    #[default]
    Lexical,
}

impl fmt::Debug for LanguageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LanguageProvider({})", self.mode())
    }
}

impl LanguageProvider {
    pub fn model(analysis: impl LanguageAnalysis + 'static) -> Self {
        Self::Model(Arc::new(analysis))
    }

    /// Tries each preferred tier in order; falls back to lexical mode.
    pub fn load(settings: &Analysis) -> Self {
        if !settings.enabled {
            info!("language analysis disabled, using lexical heuristics");
            return Self::Lexical;
        }
        if let Some(provider) = Self::load_model(settings) {
            return provider;
        }
        warn!("no language model available, using lexical heuristics");
        Self::Lexical
    }

    #[cfg(feature = "model")]
    fn load_model(settings: &Analysis) -> Option<Self> {
        for tier in &settings.model_preference {
            match super::nlp::BertAnalyzer::spawn(*tier) {
                Ok(analyzer) => {
                    info!(tier = %tier, "language model loaded");
                    return Some(Self::model(analyzer));
                }
                Err(e) => warn!(tier = %tier, error = %e, "language model failed to load"),
            }
        }
        None
    }

    #[cfg(not(feature = "model"))]
    fn load_model(_settings: &Analysis) -> Option<Self> {
        None
    }

    /// Loads at most once per process.
    pub fn shared(settings: &Analysis) -> &'static Self {
        PROVIDER.get_or_init(|| Self::load(settings))
    }

    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    pub fn mode(&self) -> String {
        match self {
            Self::Model(analysis) => analysis.name(),
            Self::Lexical => "lexical".to_string(),
        }
    }

    /// `None` means the caller scores lexically.
    pub fn analyze_pair(&self, answer: &str, question: &str) -> Option<AnalyzedPair> {
        let Self::Model(analysis) = self else {
            return None;
        };

        match (analysis.analyze(answer), analysis.analyze(question)) {
            (Ok(answer), Ok(question)) => {
                let similarity = analysis.similarity(&answer, &question).clamp(0.0, 1.0);
                Some(AnalyzedPair {
                    answer,
                    question,
                    similarity,
                })
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "analysis failed, scoring lexically");
                None
            }
        }
    }
}

pub fn is_punctuation(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_punctuation())
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word.to_lowercase().as_str())
}

pub fn lemmatize(word: &str, pos: PartOfSpeech) -> String {
    let lower = word.to_lowercase();
    if let Some((_, lemma)) = IRREGULAR_LEMMAS.iter().find(|(form, _)| *form == lower) {
        return lemma.to_string();
    }
    match pos {
        PartOfSpeech::Noun => singular(&lower),
        PartOfSpeech::Verb | PartOfSpeech::Aux => verb_base(&lower),
        _ => lower,
    }
}

fn singular(word: &str) -> String {
    if word.len() > 4 && word.ends_with("ies") {
        format!("{}y", &word[..word.len() - 3])
    } else if ["sses", "xes", "ches", "shes", "zes"]
        .iter()
        .any(|s| word.ends_with(s))
    {
        word[..word.len() - 2].to_string()
    } else if word.len() > 3
        && word.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| word.ends_with(s))
    {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

fn verb_base(word: &str) -> String {
    if word.len() > 4 && (word.ends_with("ies") || word.ends_with("ied")) {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 5 && word.ends_with("ing") {
        return restore_stem(&word[..word.len() - 3]);
    }
    if word.len() > 4 && word.ends_with("ed") {
        return restore_stem(&word[..word.len() - 2]);
    }
    if ["sses", "xes", "ches", "shes", "zes"]
        .iter()
        .any(|s| word.ends_with(s))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let is_vowel = |c: char| "aeiou".contains(c);

    if n >= 2 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'l' | 's' | 'z') {
        return chars[..n - 1].iter().collect();
    }
    if ["at", "bl", "iz", "iv", "ur", "uc", "ut", "ag"]
        .iter()
        .any(|s| stem.ends_with(s))
    {
        return format!("{stem}e");
    }
    if n == 3 && !is_vowel(chars[0]) && is_vowel(chars[1]) && !is_vowel(chars[2]) {
        return format!("{stem}e");
    }
    stem.to_string()
}

/// Up to ten lowercase words longer than three characters, stopwords removed,
/// first occurrence order.
pub fn lexical_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();
    for word in WORD_PATTERN.find_iter(&lower).map(|m| m.as_str()) {
        if word.chars().count() <= 3 || LEXICAL_STOP_WORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
        if keywords.len() == LEXICAL_KEYWORD_LIMIT {
            break;
        }
    }
    keywords
}

/// Cosine similarity over content-lemma counts.
pub fn lemma_similarity(a: &AnalyzedText, b: &AnalyzedText) -> f32 {
    fn bag(text: &AnalyzedText) -> HashMap<&str, f32> {
        let mut counts: HashMap<&str, f32> = HashMap::new();
        for token in &text.tokens {
            if !token.is_stop && !token.is_punct {
                *counts.entry(token.lemma.as_str()).or_default() += 1.0;
            }
        }
        counts
    }

    let (bag_a, bag_b) = (bag(a), bag(b));
    let dot: f32 = bag_a
        .iter()
        .filter_map(|(lemma, x)| bag_b.get(lemma).map(|y| x * y))
        .sum();
    let norm = |bag: &HashMap<&str, f32>| bag.values().map(|v| v * v).sum::<f32>().sqrt();
    let denominator = norm(&bag_a) * norm(&bag_b);
    if denominator == 0.0 {
        0.0
    } else {
        (dot / denominator).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(words: &[(&str, &str)]) -> AnalyzedText {
        AnalyzedText::from_tokens(
            words
                .iter()
                .map(|(word, tag)| Token::new(word, PartOfSpeech::from_penn(tag, word)))
                .collect(),
        )
    }

    #[test]
    fn test_penn_mapping() {
        assert_eq!(PartOfSpeech::from_penn("NNS", "queues"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_penn("VBZ", "is"), PartOfSpeech::Aux);
        assert_eq!(PartOfSpeech::from_penn("VBD", "built"), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::from_penn("IN", "because"), PartOfSpeech::SConj);
        assert_eq!(PartOfSpeech::from_penn("IN", "with"), PartOfSpeech::Adp);
        assert_eq!(PartOfSpeech::from_penn("CC", "and"), PartOfSpeech::CConj);
        assert_eq!(PartOfSpeech::from_penn(".", "."), PartOfSpeech::Punct);
        assert_eq!(PartOfSpeech::from_penn("XX", "--"), PartOfSpeech::Punct);
    }

    #[test]
    fn test_lemmatize() {
        assert_eq!(lemmatize("Queues", PartOfSpeech::Noun), "queue");
        assert_eq!(lemmatize("strategies", PartOfSpeech::Noun), "strategy");
        assert_eq!(lemmatize("classes", PartOfSpeech::Noun), "class");
        assert_eq!(lemmatize("running", PartOfSpeech::Verb), "run");
        assert_eq!(lemmatize("created", PartOfSpeech::Verb), "create");
        assert_eq!(lemmatize("making", PartOfSpeech::Verb), "make");
        assert_eq!(lemmatize("developed", PartOfSpeech::Verb), "develop");
        assert_eq!(lemmatize("was", PartOfSpeech::Aux), "be");
        assert_eq!(lemmatize("Led", PartOfSpeech::Verb), "lead");
        assert_eq!(lemmatize("Finally", PartOfSpeech::Adv), "finally");
    }

    #[test]
    fn test_sentence_segmentation() {
        let text = tagged(&[
            ("I", "PRP"),
            ("built", "VBD"),
            ("caches", "NNS"),
            (".", "."),
            ("Really", "RB"),
            ("!", "."),
            ("!", "."),
            ("Then", "RB"),
            ("scaled", "VBD"),
        ]);
        assert_eq!(text.sentences, vec![0..4, 4..7, 7..9]);
        assert_eq!(text.sentence_lengths(), vec![4, 3, 2]);
        assert!((text.mean_sentence_length() - 3.0).abs() < 1e-6);
        assert!(text.has_punctuation());
    }

    #[test]
    fn test_empty_text_has_no_sentences() {
        let text = AnalyzedText::from_tokens(Vec::new());
        assert!(text.sentences.is_empty());
        assert_eq!(text.mean_sentence_length(), 0.0);
    }

    #[test]
    fn test_content_lemmas_skip_stopwords_and_aux() {
        let text = tagged(&[
            ("Queues", "NNS"),
            ("are", "VBP"),
            ("used", "VBN"),
            ("for", "IN"),
            ("buffering", "VBG"),
            ("messages", "NNS"),
        ]);
        let lemmas: Vec<String> = text.content_lemmas().into_iter().collect();
        assert_eq!(lemmas, vec!["buffer", "message", "queue"]);
    }

    #[test]
    fn test_lexical_keywords() {
        let keywords = lexical_keywords("Explain the Inheritance model; inheritance is about reuse.");
        assert_eq!(keywords, vec!["explain", "inheritance", "model", "about", "reuse"]);

        let many = "alpha bravo charlie delta echoes foxtrot golfing hotel india juliet kilos lima";
        assert_eq!(lexical_keywords(many).len(), LEXICAL_KEYWORD_LIMIT);
    }

    #[test]
    fn test_lemma_similarity_bounds() {
        let a = tagged(&[("caching", "VBG"), ("queries", "NNS")]);
        let b = tagged(&[("cached", "VBD"), ("query", "NN")]);
        let c = tagged(&[("painting", "NN")]);
        assert!((lemma_similarity(&a, &b) - 1.0).abs() < 1e-5);
        assert_eq!(lemma_similarity(&a, &c), 0.0);
        assert_eq!(lemma_similarity(&a, &AnalyzedText::default()), 0.0);
    }

    #[test]
    fn test_lexical_provider_skips_analysis() {
        let provider = LanguageProvider::Lexical;
        assert!(provider.analyze_pair("some answer text", "question?").is_none());
        assert_eq!(provider.mode(), "lexical");
    }

    #[test]
    fn test_disabled_settings_load_lexical() {
        let settings = Analysis {
            enabled: false,
            model_preference: vec![ModelTier::Full],
        };
        assert!(!LanguageProvider::load(&settings).is_model());
    }
}
