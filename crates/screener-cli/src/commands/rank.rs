//! The `screener rank` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use screener_core::config::load_config_from;
use screener_core::ranker::{sort_rankings, CandidateRanking, ResumeRanker};
use screener_extract::{load_resumes, FileExtractor};
use screener_report::html::generate_rankings_html;
use screener_report::markdown::generate_rankings_markdown;

pub fn execute(files: Vec<PathBuf>, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let resumes = load_resumes(&FileExtractor::new(), &files)?;
    anyhow::ensure!(!resumes.is_empty(), "no résumés found");
    tracing::info!("ranking {} résumé(s)", resumes.len());

    let ranker = ResumeRanker::new(config.ranker);
    let mut rankings =
        ranker.rank_batch(resumes.iter().map(|r| (r.name.as_str(), r.text.as_str())));
    sort_rankings(&mut rankings);

    match format.as_str() {
        "table" => print_table(&rankings),
        "json" => println!("{}", serde_json::to_string_pretty(&rankings)?),
        "markdown" | "md" => print!("{}", generate_rankings_markdown(&rankings)),
        "html" => println!("{}", generate_rankings_html(&rankings)),
        other => anyhow::bail!("unknown format: {other} (expected table, json, markdown or html)"),
    }

    let degraded = rankings.iter().filter(|r| r.degraded).count();
    if degraded > 0 {
        eprintln!("Warning: {degraded} résumé(s) could not be read and were ranked Junior.");
    }

    Ok(())
}

fn print_table(rankings: &[CandidateRanking]) {
    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Candidate",
        "Tier",
        "Score",
        "Experience",
        "Keywords",
    ]);

    for (i, r) in rankings.iter().enumerate() {
        let name = if r.degraded {
            format!("{} (unreadable)", r.candidate)
        } else {
            r.candidate.clone()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(name),
            Cell::new(r.tier),
            Cell::new(r.total_score),
            Cell::new(r.experience),
            Cell::new(r.keyword_score),
        ]);
    }

    println!("{table}");
}
