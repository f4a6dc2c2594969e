//! The `screener render` command.

use std::path::PathBuf;

use anyhow::Result;

use screener_core::report::InterviewReport;
use screener_report::html::{generate_html, write_html_report};
use screener_report::markdown::{generate_markdown, write_markdown_report};

pub fn execute(report_path: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let report = InterviewReport::load_json(&report_path)?;

    match (format.as_str(), output) {
        ("markdown" | "md", Some(path)) => {
            write_markdown_report(&report, &path)?;
            eprintln!("Report written to: {}", path.display());
        }
        ("html", Some(path)) => {
            write_html_report(&report, &path)?;
            eprintln!("Report written to: {}", path.display());
        }
        ("markdown" | "md", None) => print!("{}", generate_markdown(&report)),
        ("html", None) => print!("{}", generate_html(&report)),
        (other, _) => anyhow::bail!("unknown format: {other} (expected markdown or html)"),
    }

    Ok(())
}
