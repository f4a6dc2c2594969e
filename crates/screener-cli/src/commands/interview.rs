//! The `screener interview` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use screener_core::config::load_config_from;
use screener_core::model::{Question, QuestionBank, Tier};
use screener_core::parser;
use screener_core::ranker::ResumeRanker;
use screener_core::report::InterviewReport;
use screener_core::session::{InterviewSession, Progress};
use screener_extract::FileExtractor;
use screener_report::{format_clock, format_points};

pub struct InterviewArgs {
    pub tier: Option<String>,
    pub resume: Option<PathBuf>,
    pub candidate: Option<String>,
    pub bank: Option<PathBuf>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub output: PathBuf,
}

/// How the answer loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopEnd {
    Completed,
    TimedOut,
    InputClosed,
}

pub fn execute(args: InterviewArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let bank = match &args.bank {
        Some(path) => parser::parse_bank(path)?,
        None => QuestionBank::builtin()?,
    };

    let (tier, resume_name) = match (&args.tier, &args.resume) {
        (Some(label), _) => (Tier::from_label(label), None),
        (None, Some(path)) => {
            let text = FileExtractor::new().extract_file(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let ranking = ResumeRanker::new(config.ranker.clone()).rank(&text, &name);
            println!(
                "Résumé {} ranked {} (score {}, experience {}).",
                name, ranking.tier, ranking.total_score, ranking.experience
            );
            (ranking.tier, Some(name))
        }
        (None, None) => anyhow::bail!("either --tier or --resume is required"),
    };
    if tier == Tier::Unknown {
        eprintln!("Warning: unrecognised tier, using the Junior question plan.");
    }

    let candidate = args
        .candidate
        .or(resume_name)
        .unwrap_or_else(|| "candidate".to_string());
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut session = InterviewSession::new(&bank, tier, &config, seed)?;
    tracing::info!(candidate = %candidate, seed, bank = %bank.id, "session created");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let end = run_loop(&mut session, &candidate, stdin.lock(), stdout.lock())?;

    let report = session.to_report(&candidate);
    print_summary(&report);
    if end == LoopEnd::InputClosed {
        eprintln!(
            "Input closed after {} of {} answers.",
            report.transcript.len(),
            report.questions_total
        );
    }

    let path = save_report(&report, &args.output)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}

/// Drive a session from line-oriented input until it ends or input runs out.
fn run_loop<R: BufRead, W: Write>(
    session: &mut InterviewSession,
    candidate: &str,
    mut input: R,
    mut out: W,
) -> Result<LoopEnd> {
    let total = session.total_questions();
    writeln!(
        out,
        "Hello {candidate}. This is a {} screening: {total} questions, {} minutes.",
        session.tier(),
        session.time_budget().as_secs() / 60
    )?;
    writeln!(out, "Answer each question on a single line.\n")?;

    let first = session.start()?.clone();
    print_question(&mut out, 1, total, &first)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "\nInput closed, ending the interview early.")?;
            return Ok(LoopEnd::InputClosed);
        }
        let answer = line.trim_end_matches(['\n', '\r']);

        let next = match session.submit_answer(answer)? {
            Progress::Next(q) => q.clone(),
            Progress::Completed => {
                writeln!(out, "\nAll questions answered. Thank you!")?;
                return Ok(LoopEnd::Completed);
            }
            Progress::TimedOut => {
                writeln!(out, "\nTime's up! The interview has ended.")?;
                return Ok(LoopEnd::TimedOut);
            }
        };

        writeln!(
            out,
            "[elapsed {} / {}]",
            format_clock(session.elapsed().as_secs()),
            format_clock(session.time_budget().as_secs())
        )?;
        print_question(&mut out, session.answered() + 1, total, &next)?;
    }
}

fn print_question<W: Write>(out: &mut W, n: usize, total: usize, q: &Question) -> io::Result<()> {
    writeln!(out, "\nQuestion {n}/{total} ({}):", q.kind)?;
    writeln!(out, "{}", q.prompt)
}

fn print_summary(report: &InterviewReport) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Kind", "Points", "Feedback"]);

    for (i, answer) in report.transcript.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&answer.question_id),
            Cell::new(answer.kind),
            Cell::new(format_points(answer.points())),
            Cell::new(answer.feedback.message()),
        ]);
    }

    println!("\n{table}");
    println!(
        "Technical {} / {} | Generic {} / {} | Total {} / {}",
        format_points(report.score.technical),
        format_points(report.technical_questions as f64),
        format_points(report.score.generic),
        format_points(report.generic_questions as f64),
        format_points(report.score.total),
        format_points(report.questions_total as f64),
    );
    println!(
        "Outcome: {} in {}",
        report.outcome,
        format_clock(report.elapsed_secs)
    );
}

fn save_report(report: &InterviewReport, output: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let id = report.id.to_string();
    let path = output.join(format!(
        "interview-{}-{timestamp}-{}.json",
        slug(&report.candidate),
        &id[..8]
    ));
    report.save_json(&path)?;
    Ok(path)
}

/// File-name-safe form of a candidate name.
fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "candidate".into()
    } else {
        slug
    }
}
