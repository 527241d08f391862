use super::indicators::{count_phrases, IndicatorTable, Signal};
use super::language::{AnalyzedText, PartOfSpeech};
use super::score::{capped, AxisScore};

pub const BASE_COMMUNICATION: f32 = 50.0;

const TRANSITION_WORDS: &[&str] = &[
    "first",
    "second",
    "then",
    "finally",
    "additionally",
    "however",
    "therefore",
    "moreover",
    "furthermore",
    "consequently",
];

/// Matched as substrings of the whole answer, unlike the lemma-based transitions.
const STRUCTURE_WORDS: &[&str] = &[
    "first",
    "second",
    "then",
    "finally",
    "additionally",
    "however",
    "therefore",
];

pub fn communication_score(
    answer_lower: &str,
    analysis: Option<&AnalyzedText>,
    indicators: &IndicatorTable,
) -> AxisScore {
    let mut axis = AxisScore::new(BASE_COMMUNICATION);

    if let Some(doc) = analysis {
        let transitions = doc.count_lemmas(TRANSITION_WORDS);
        axis.boost(capped(transitions, 5.0, 15.0), "transition words");

        let conjunctions = doc.count_pos(&[PartOfSpeech::CConj, PartOfSpeech::SConj]);
        axis.boost(capped(conjunctions, 2.0, 10.0), "conjunctions");

        let lengths = doc.sentence_lengths();
        if lengths.len() > 1 {
            let longest = lengths.iter().max().copied().unwrap_or_default();
            let shortest = lengths.iter().min().copied().unwrap_or_default();
            if longest - shortest > 5 {
                axis.boost(5.0, "varied sentence length");
            }
        }
    }

    let communication = indicators.hits(Signal::Communication, answer_lower);
    axis.boost(capped(communication, 8.0, 20.0), "communication vocabulary");

    let structure = count_phrases(answer_lower, STRUCTURE_WORDS);
    axis.boost(capped(structure, 5.0, 15.0), "structure cues");

    let positive = indicators.hits(Signal::Positive, answer_lower);
    axis.boost(capped(positive, 3.0, 15.0), "positive language");

    axis.cap(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::language::Token;

    #[test]
    fn test_lexical_communication() {
        let answer = "first i explained the plan, then we delivered it and improved results.";
        let axis = communication_score(answer, None, &IndicatorTable::builtin());
        // explained (8), first + then (10), delivered + improved (6)
        assert_eq!(axis.score, 74.0);
    }

    #[test]
    fn test_plain_answer_keeps_base() {
        let axis = communication_score("it works fine for me", None, &IndicatorTable::builtin());
        assert_eq!(axis.score, BASE_COMMUNICATION);
        assert!(axis.boost_reasons.is_empty());
    }

    #[test]
    fn test_model_mode_adds_discourse_signals() {
        use PartOfSpeech::*;
        let words = [
            ("First", Adv),
            ("we", Pron),
            ("measure", Verb),
            (".", Punct),
            ("Then", Adv),
            ("we", Pron),
            ("profile", Verb),
            ("the", Det),
            ("service", Noun),
            ("because", SConj),
            ("latency", Noun),
            ("and", CConj),
            ("cost", Noun),
            ("grow", Verb),
            (".", Punct),
        ];
        let doc = AnalyzedText::from_tokens(words.iter().map(|(w, p)| Token::new(w, *p)).collect());
        let answer = "first we measure. then we profile the service because latency and cost grow.";

        let lexical = communication_score(answer, None, &IndicatorTable::builtin());
        let model = communication_score(answer, Some(&doc), &IndicatorTable::builtin());
        // transitions (10), two conjunctions (4), sentence lengths 4 and 11 (5)
        assert_eq!(model.score - lexical.score, 19.0);
    }

    #[test]
    fn test_communication_is_capped() {
        let answer = "first second then finally, clearly and effectively communicated, explained, \
                      presented and discussed; implemented, achieved, improved, solved, developed";
        let axis = communication_score(answer, None, &IndicatorTable::builtin());
        assert_eq!(axis.score, 100.0);
    }
}
