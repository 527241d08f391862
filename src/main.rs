use anyhow::{bail, Context, Result};
use mock_interview::generation::GeneratedQuestion;
use mock_interview::scoring::{EvaluationRecord, EvaluationResult, LanguageProvider};
use mock_interview::settings::settings;
use mock_interview::utils::{
    log_answer_prompt, log_domains, log_generic_error, log_init, log_input_error,
    log_ml_fallback, log_ml_loading, log_ml_ready, log_question, log_report, log_skipped,
    log_unknown_domain, AnswerAssessment,
};
use mock_interview::{Difficulty, InterviewReport, MockInterview, QuestionGenerator};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead};
use std::process;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Default)]
struct Args {
    domain: Option<String>,
    count: Option<i64>,
    difficulty: Option<String>,
    json: bool,
    list: bool,
}

#[derive(Debug, Serialize)]
struct AnsweredQuestion {
    question: GeneratedQuestion,
    evaluation: Option<EvaluationRecord>,
}

#[derive(Debug, Serialize)]
struct Transcript {
    questions: Vec<AnsweredQuestion>,
    report: InterviewReport,
}

fn print_usage() {
    eprintln!("Usage: mock-interview [DOMAIN] [--count N] [--difficulty LEVEL] [--json] [--list]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  DOMAIN             Interview domain (see --list)");
    eprintln!("  --count, -n N      Number of questions");
    eprintln!("  --difficulty, -d   easy, medium or hard");
    eprintln!("  --json             Print stored records instead of the assessment trees");
    eprintln!("  --list             List available domains and exit");
    eprintln!();
    eprintln!("Answers are read from stdin, one line per question.");
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut positional: Vec<String> = Vec::new();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--list" => args.list = true,
            "--count" | "-n" => {
                let value = iter.next().context("--count needs a value")?;
                let count = value
                    .parse()
                    .with_context(|| format!("invalid question count \"{value}\""))?;
                args.count = Some(count);
            }
            "--difficulty" | "-d" => {
                args.difficulty = Some(iter.next().context("--difficulty needs a value")?);
            }
            flag if flag.starts_with('-') => bail!("unknown option {flag}"),
            _ => positional.push(arg),
        }
    }

    if !positional.is_empty() {
        args.domain = Some(positional.join(" "));
    }
    Ok(args)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("mock_interview=info".parse()?))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        );
    set_global_default(subscriber).context("failed to set tracing subscriber")?;

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log_generic_error(&e.to_string());
            print_usage();
            process::exit(1);
        }
    };

    let settings = settings();

    if args.list {
        let generator = QuestionGenerator::builtin(&settings.generation.default_domain)?;
        log_domains(generator.knowledge().profiles(), generator.default_domain());
        return Ok(());
    }

    if !args.json {
        log_ml_loading();
    }
    let language = LanguageProvider::shared(&settings.analysis).clone();
    if !args.json {
        if language.is_model() {
            log_ml_ready(&language.mode());
        } else {
            log_ml_fallback();
        }
    }

    let interview = MockInterview::from_settings(settings, language)?;
    let domain = args
        .domain
        .unwrap_or_else(|| settings.generation.default_domain.clone());
    let count = args
        .count
        .unwrap_or(settings.generation.default_count as i64);
    let difficulty = args
        .difficulty
        .unwrap_or_else(|| settings.generation.default_difficulty.to_string());

    let questions = interview.generate_questions(&domain, count, &difficulty);
    if !args.json {
        let generator = interview.generator();
        let resolved = generator.knowledge().get(&domain).map(|p| p.name.as_str());
        if resolved.is_none() {
            log_unknown_domain(&domain, generator.default_domain());
        }
        log_init(
            resolved.unwrap_or(generator.default_domain()),
            questions.len(),
            Difficulty::parse_lenient(&difficulty),
        );
    }

    let mut lines = io::stdin().lock().lines();
    let mut results: Vec<EvaluationResult> = Vec::new();
    let mut transcript: Vec<AnsweredQuestion> = Vec::new();

    for question in &questions {
        if !args.json {
            log_question(question, questions.len());
            log_answer_prompt();
        }

        let answer = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                log_input_error(&e.to_string());
                break;
            }
            None => break,
        };

        if answer.trim().is_empty() {
            if !args.json {
                log_skipped(question.ordinal);
            }
            transcript.push(AnsweredQuestion {
                question: question.clone(),
                evaluation: None,
            });
            continue;
        }

        let evaluation = interview.evaluator().evaluate_detailed(
            &answer,
            &question.text,
            question.difficulty,
        );
        if !args.json {
            AnswerAssessment::new(
                &question.text,
                &answer,
                evaluation.clone(),
                &settings.evaluation.thresholds,
            )
            .print();
        }
        transcript.push(AnsweredQuestion {
            question: question.clone(),
            evaluation: Some(evaluation.result.to_record()),
        });
        results.push(evaluation.result);
    }

    let report = InterviewReport::summarize(&domain, &questions, &results);

    if args.json {
        let output = Transcript {
            questions: transcript,
            report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        log_report(&report, &settings.evaluation.thresholds);
    }

    Ok(())
}
