//! Markdown output.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use screener_core::ranker::CandidateRanking;
use screener_core::report::InterviewReport;

use crate::{format_clock, format_points, write_output};

/// Escape characters that would break a table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Quote a multi-line block.
fn quote(s: &str) -> String {
    if s.trim().is_empty() {
        return "> _(no response)_\n".into();
    }
    s.lines().map(|l| format!("> {l}\n")).collect()
}

/// Render an interview report as Markdown.
pub fn generate_markdown(report: &InterviewReport) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Interview report: {}\n", report.candidate);
    let _ = writeln!(
        md,
        "Tier **{}** | bank `{}` | seed {} | {}\n",
        report.tier, report.bank_id, report.seed, report.outcome
    );

    md.push_str("| | Score |\n|---|---|\n");
    let _ = writeln!(
        md,
        "| Technical | {} / {} |",
        format_points(report.score.technical),
        format_points(report.technical_questions as f64)
    );
    let _ = writeln!(
        md,
        "| Generic | {} / {} |",
        format_points(report.score.generic),
        format_points(report.generic_questions as f64)
    );
    let _ = writeln!(
        md,
        "| **Total** | **{} / {}** |",
        format_points(report.score.total),
        format_points(report.questions_total as f64)
    );
    let _ = writeln!(
        md,
        "\nAnswered {} of {} questions in {} (budget {}).\n",
        report.transcript.len(),
        report.questions_total,
        format_clock(report.elapsed_secs),
        format_clock(report.time_budget_secs)
    );

    md.push_str("## Answers\n");
    for (i, answer) in report.transcript.iter().enumerate() {
        let _ = writeln!(
            md,
            "\n### {}. {} ({}, {} pts)\n",
            i + 1,
            cell(&answer.prompt),
            answer.kind,
            format_points(answer.points())
        );
        let _ = writeln!(md, "_{}_\n", answer.feedback.message());
        md.push_str("**Response**\n\n");
        md.push_str(&quote(&answer.response));
        if !answer.model_answer.is_empty() {
            md.push_str("\n**Model answer**\n\n");
            md.push_str(&quote(&answer.model_answer));
        }
    }

    let unanswered = report.questions_total.saturating_sub(report.transcript.len());
    if unanswered > 0 {
        let _ = writeln!(md, "\n_{unanswered} question(s) not reached._");
    }

    md
}

/// Render rankings as a Markdown table, in the given order.
pub fn generate_rankings_markdown(rankings: &[CandidateRanking]) -> String {
    let mut md = String::from("| # | Candidate | Tier | Score | Experience | Keywords |\n");
    md.push_str("|---|---|---|---|---|---|\n");
    for (i, r) in rankings.iter().enumerate() {
        let name = if r.degraded {
            format!("{} (unreadable)", cell(&r.candidate))
        } else {
            cell(&r.candidate)
        };
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} |",
            i + 1,
            name,
            r.tier,
            r.total_score,
            r.experience,
            r.keyword_score
        );
    }
    md
}

/// Write an interview report as Markdown.
pub fn write_markdown_report(report: &InterviewReport, path: &Path) -> Result<()> {
    write_output(&generate_markdown(report), path)
}
