use mock_interview::scoring::{AnswerEvaluator, IndicatorTable, LanguageProvider};
use mock_interview::settings::settings;
use mock_interview::utils::{
    log_generic_error, log_ml_fallback, log_ml_loading, log_ml_ready, log_newline,
    AnswerAssessment,
};
use mock_interview::Difficulty;
use std::env;
use std::process;

fn print_usage() {
    eprintln!("Usage: score-answer <question> <answer> [--difficulty|-d LEVEL] [--lexical]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <question>     Question text the answer responds to");
    eprintln!("  <answer>       Answer text to score");
    eprintln!("  --difficulty   easy, medium or hard (default: medium)");
    eprintln!("  --lexical      Skip language models and score with lexical heuristics");
}

fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let lexical = args.iter().any(|a| a == "--lexical");

    let mut difficulty = Difficulty::default();
    let mut texts: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lexical" => {}
            "--difficulty" | "-d" => match iter.next() {
                Some(level) => difficulty = Difficulty::parse_lenient(level),
                None => {
                    print_usage();
                    process::exit(1);
                }
            },
            _ => texts.push(arg),
        }
    }

    let &[question, answer] = texts.as_slice() else {
        print_usage();
        process::exit(1);
    };

    let settings = settings();
    let language = if lexical {
        LanguageProvider::Lexical
    } else {
        log_ml_loading();
        LanguageProvider::load(&settings.analysis)
    };
    match &language {
        LanguageProvider::Model(_) => log_ml_ready(&language.mode()),
        LanguageProvider::Lexical if !lexical => log_ml_fallback(),
        LanguageProvider::Lexical => {}
    }
    log_newline();

    let evaluator = match AnswerEvaluator::new(
        IndicatorTable::builtin(),
        language,
        settings.evaluation.clone(),
    ) {
        Ok(evaluator) => evaluator,
        Err(e) => {
            log_generic_error(&format!("{e:#}"));
            process::exit(1);
        }
    };
    let evaluation = evaluator.evaluate_detailed(answer, question, difficulty);
    AnswerAssessment::new(
        question,
        answer,
        evaluation,
        &settings.evaluation.thresholds,
    )
    .print();
}
