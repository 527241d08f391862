use console::{measure_text_width, Style};

use crate::difficulty::Difficulty;
use crate::generation::{DomainProfile, GeneratedQuestion};
use crate::interview::InterviewReport;
use crate::scoring::{AxisScore, Evaluation};
use crate::settings::FeedbackThresholds;

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';
pub const TREE_VERT: char = '\u{2502}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 25;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_indent() -> String {
    dim().apply_to(format!("{}   ", TREE_VERT)).to_string()
}

fn tree_blank() -> String {
    " ".repeat(TREE_PREFIX_WIDTH)
}

fn branch_for(index: usize, count: usize) -> String {
    if index + 1 == count {
        tree_end()
    } else {
        tree_branch()
    }
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

fn ml_prefix() -> String {
    yellow().apply_to("[ML]").to_string()
}

fn question_prefix(ordinal: usize, total: usize) -> String {
    magenta()
        .apply_to(format!("[Q{ordinal}/{total}]"))
        .to_string()
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

fn score_style(score: f32, thresholds: &FeedbackThresholds) -> Style {
    if score >= thresholds.strong_axis {
        green()
    } else if score < thresholds.weak_axis {
        red()
    } else {
        yellow()
    }
}

fn preview(text: &str, limit: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() > limit {
        format!(
            "{}...",
            single_line.chars().take(limit - 3).collect::<String>()
        )
    } else {
        single_line
    }
}

pub fn log_newline() {
    println!();
}

pub fn log_init(domain: &str, count: usize, difficulty: Difficulty) {
    println!(
        "{} starting mock interview: {} {} questions on {}",
        init_prefix(),
        bold().apply_to(count),
        cyan().apply_to(difficulty),
        cyan().apply_to(domain),
    );
}

pub fn log_unknown_domain(requested: &str, fallback: &str) {
    println!(
        "{} {} is not a known domain, using {}",
        init_prefix(),
        yellow().apply_to(requested),
        cyan().apply_to(fallback),
    );
}

pub fn log_ml_loading() {
    println!("{} loading language models...", ml_prefix());
}

pub fn log_ml_ready(mode: &str) {
    println!("{} {} ready!", ml_prefix(), green().apply_to(mode));
}

pub fn log_ml_fallback() {
    println!(
        "{} no model available, scoring with {} heuristics",
        ml_prefix(),
        yellow().apply_to("lexical")
    );
}

pub fn log_domains(profiles: &[DomainProfile], default_domain: &str) {
    println!("{}", bold().apply_to("DOMAINS"));
    for (i, profile) in profiles.iter().enumerate() {
        let levels: Vec<String> = profile
            .difficulty_levels
            .iter()
            .map(|d| d.to_string())
            .collect();
        let marker = if profile.name == default_domain {
            format!(" {}", dim().apply_to("(default)"))
        } else {
            String::new()
        };
        println!(
            "{}{}{}",
            branch_for(i, profiles.len()),
            cyan().apply_to(&profile.name),
            marker
        );
        let indent = if i + 1 == profiles.len() {
            tree_blank()
        } else {
            tree_indent()
        };
        println!(
            "{}{}{} {}",
            indent,
            tree_branch(),
            pad_label("about", 2),
            dim().apply_to(&profile.description)
        );
        println!(
            "{}{}{} {}",
            indent,
            tree_end(),
            pad_label("levels", 2),
            levels.join(", ")
        );
    }
}

pub fn log_question(question: &GeneratedQuestion, total: usize) {
    println!(
        "{} {} {}",
        question_prefix(question.ordinal, total),
        dim().apply_to(format!("({})", question.question_type)),
        bold().apply_to(&question.text)
    );
}

pub fn log_answer_prompt() {
    println!(
        "{}",
        dim().apply_to("answer on one line, empty line to skip:")
    );
}

pub fn log_skipped(ordinal: usize) {
    println!(
        "{} question {} skipped\n",
        dim().apply_to("skipped"),
        bold().apply_to(ordinal)
    );
}

pub fn log_input_error(error: &str) {
    println!(
        "{} {}",
        red().apply_to("failed to read answer:"),
        dim().apply_to(error)
    );
}

/// Everything shown about one scored answer.
#[derive(Debug, Clone)]
pub struct AnswerAssessment {
    pub question_preview: String,
    pub answer_preview: String,
    pub evaluation: Evaluation,
    pub thresholds: FeedbackThresholds,
}

impl AnswerAssessment {
    pub fn new(
        question: &str,
        answer: &str,
        evaluation: Evaluation,
        thresholds: &FeedbackThresholds,
    ) -> Self {
        Self {
            question_preview: preview(question, 60),
            answer_preview: preview(answer, 60),
            evaluation,
            thresholds: thresholds.clone(),
        }
    }

    pub fn print(&self) {
        let result = &self.evaluation.result;
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "{} \"{}\"",
            magenta().apply_to(bold().apply_to("[ANSWER ASSESSMENT]")),
            dim().apply_to(&self.question_preview)
        ));
        lines.push(format!(
            "{}{}",
            pad_label("answer", 0),
            dim().apply_to(format!("\"{}\"", self.answer_preview))
        ));

        if self.evaluation.breakdown.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}", bold().apply_to("RESULT")));
            lines.push(format!(
                "{}{} {}",
                tree_branch(),
                pad_label("status", 1),
                red().bold().apply_to("too short")
            ));
            lines.push(format!(
                "{}{} {}",
                tree_end(),
                pad_label("feedback", 1),
                dim().apply_to(&result.feedback)
            ));
            println!("{}\n", lines.join("\n"));
            return;
        }

        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("SCORES")));
        let count = self.evaluation.breakdown.len();
        for (i, (axis, axis_score)) in self.evaluation.breakdown.iter().enumerate() {
            let style = score_style(axis_score.score, &self.thresholds);
            lines.push(format!(
                "{}{} {}",
                branch_for(i, count),
                pad_label(&axis.to_string(), 1),
                style.apply_to(format!("{:.2}", axis_score.score))
            ));
            let indent = if i + 1 == count {
                tree_blank()
            } else {
                tree_indent()
            };
            push_reasons(&mut lines, &indent, axis_score);
        }

        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("FEEDBACK")));
        lines.push(format!("{}{}", tree_end(), result.feedback));

        push_labels(&mut lines, "STRENGTHS", &result.strengths, green());
        push_labels(&mut lines, "IMPROVEMENTS", &result.improvements, yellow());

        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("RESULT")));
        lines.push(format!(
            "{}{} {}",
            tree_branch(),
            pad_label("mode", 1),
            dim().apply_to(&self.evaluation.mode)
        ));
        lines.push(format!(
            "{}{} {}",
            tree_end(),
            pad_label("overall", 1),
            score_style(result.overall, &self.thresholds)
                .bold()
                .apply_to(format!("{:.2}", result.overall))
        ));

        println!("{}\n", lines.join("\n"));
    }
}

fn push_reasons(lines: &mut Vec<String>, indent: &str, axis_score: &AxisScore) {
    let reasons: Vec<(String, Style)> = axis_score
        .boost_reasons
        .iter()
        .map(|r| (r.clone(), green()))
        .chain(
            axis_score
                .penalty_reasons
                .iter()
                .map(|r| (r.clone(), red())),
        )
        .collect();
    for (i, (reason, style)) in reasons.iter().enumerate() {
        lines.push(format!(
            "{}{}{}",
            indent,
            branch_for(i, reasons.len()),
            style.apply_to(reason)
        ));
    }
}

fn push_labels(lines: &mut Vec<String>, title: &str, labels: &[String], style: Style) {
    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to(title)));
    if labels.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
        return;
    }
    for (i, label) in labels.iter().enumerate() {
        lines.push(format!(
            "{}{}",
            branch_for(i, labels.len()),
            style.apply_to(label)
        ));
    }
}

pub fn log_report(report: &InterviewReport, thresholds: &FeedbackThresholds) {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "{} {}",
        magenta().apply_to(bold().apply_to("[INTERVIEW REPORT]")),
        cyan().apply_to(&report.domain)
    ));
    lines.push(format!(
        "{}{} {}{}",
        tree_branch(),
        pad_label("answered", 1),
        bold().apply_to(report.answered_count),
        dim().apply_to(format!("/{}", report.question_count))
    ));

    match &report.averages {
        Some(averages) => {
            lines.push(format!("{}{}", tree_branch(), pad_label("averages", 1)));
            let scores: Vec<_> = averages.iter().collect();
            for (i, (axis, score)) in scores.iter().enumerate() {
                lines.push(format!(
                    "{}{}{} {}",
                    tree_indent(),
                    branch_for(i, scores.len()),
                    pad_label(&axis.to_string(), 2),
                    score_style(*score, thresholds).apply_to(format!("{score:.2}"))
                ));
            }
        }
        None => lines.push(format!(
            "{}{} {}",
            tree_branch(),
            pad_label("averages", 1),
            dim().apply_to("none")
        )),
    }

    let overall = match report.overall {
        Some(score) => score_style(score, thresholds)
            .bold()
            .apply_to(format!("{score:.2}"))
            .to_string(),
        None => dim().apply_to("n/a").to_string(),
    };
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("overall", 1),
        overall
    ));
    lines.push(format!(
        "{}{} {}",
        tree_end(),
        pad_label("completed", 1),
        dim().apply_to(report.completed_at.format("%Y-%m-%d %H:%M:%S UTC"))
    ));

    println!("{}\n", lines.join("\n"));
}

pub fn log_generic_error(error: &str) {
    println!("{} {}", red().apply_to("error:"), error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_label_aligns_values() {
        let top = pad_label("clarity", 1);
        let nested = pad_label("clarity", 2);
        assert_eq!(measure_text_width(&top), VALUE_COLUMN - TREE_PREFIX_WIDTH);
        assert_eq!(measure_text_width(&nested), VALUE_COLUMN - 2 * TREE_PREFIX_WIDTH);
        assert_eq!(pad_label(&"x".repeat(40), 1), format!("{} ", "x".repeat(40)));
    }

    #[test]
    fn test_preview_truncates_on_chars() {
        assert_eq!(preview("short\nanswer", 60), "short answer");
        let long = "é".repeat(80);
        let cut = preview(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_last_branch_closes_tree() {
        assert!(branch_for(2, 3).contains(TREE_END));
        assert!(branch_for(0, 3).contains(TREE_BRANCH));
        assert!(branch_for(0, 1).contains(TREE_END));
    }
}
