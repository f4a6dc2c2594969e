//! HTML report generator.
//!
//! Produces self-contained HTML files with all CSS/JS inlined.

use std::path::Path;

use anyhow::Result;

use screener_core::ranker::CandidateRanking;
use screener_core::report::InterviewReport;
use screener_core::scoring::Credit;

use crate::{format_clock, format_points, write_output};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

fn tail(html: &mut String) {
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");
    html.push_str("</body>\n</html>");
}

fn credit_class(credit: Credit) -> &'static str {
    match credit {
        Credit::Full => "pass",
        Credit::Partial => "partial",
        Credit::None => "fail",
    }
}

/// Generate an HTML page from an interview report.
pub fn generate_html(report: &InterviewReport) -> String {
    let mut html = String::new();
    head(
        &mut html,
        &format!("screener interview: {}", report.candidate),
    );

    html.push_str("<header>\n");
    html.push_str("<h1>Interview report</h1>\n");
    let started = report
        .started_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "not started".into());
    html.push_str(&format!(
        "<p class=\"meta\">Candidate: <strong>{}</strong> | Tier: {} | Bank: {} | Seed: {} | {}</p>\n",
        html_escape(&report.candidate),
        report.tier,
        html_escape(&report.bank_id),
        report.seed,
        started,
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<tbody>\n");
    let rows = [
        ("Outcome", report.outcome.to_string()),
        (
            "Answered",
            format!("{} / {}", report.transcript.len(), report.questions_total),
        ),
        (
            "Time",
            format!(
                "{} of {}",
                format_clock(report.elapsed_secs),
                format_clock(report.time_budget_secs)
            ),
        ),
        (
            "Technical",
            format!(
                "{} / {}",
                format_points(report.score.technical),
                format_points(report.technical_questions as f64)
            ),
        ),
        (
            "Generic",
            format!(
                "{} / {}",
                format_points(report.score.generic),
                format_points(report.generic_questions as f64)
            ),
        ),
        (
            "Total",
            format!(
                "{} / {}",
                format_points(report.score.total),
                format_points(report.questions_total as f64)
            ),
        ),
    ];
    for (label, value) in rows {
        html.push_str(&format!("<tr><th>{label}</th><td>{value}</td></tr>\n"));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Kind</th><th onclick=\"sortTable(3)\">Points</th><th onclick=\"sortTable(4)\">Feedback</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (i, answer) in report.transcript.iter().enumerate() {
        let class = credit_class(answer.credit);
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            i + 1,
            html_escape(&answer.question_id),
            answer.kind,
            format_points(answer.points()),
            html_escape(answer.feedback.message()),
        ));
    }
    html.push_str("</tbody></table>\n");

    for (i, answer) in report.transcript.iter().enumerate() {
        html.push_str("<details>\n");
        html.push_str(&format!(
            "<summary>{}. {}</summary>\n",
            i + 1,
            html_escape(&answer.prompt)
        ));
        html.push_str(&format!(
            "<p><strong>Response</strong></p>\n<pre><code>{}</code></pre>\n",
            html_escape(&answer.response)
        ));
        if !answer.model_answer.is_empty() {
            html.push_str(&format!(
                "<p><strong>Model answer</strong></p>\n<pre><code>{}</code></pre>\n",
                html_escape(&answer.model_answer)
            ));
        }
        html.push_str("</details>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    tail(&mut html);
    html
}

/// Generate an HTML page from a set of résumé rankings, in the given order.
pub fn generate_rankings_html(rankings: &[CandidateRanking]) -> String {
    let mut html = String::new();
    head(&mut html, "screener rankings");

    html.push_str("<header>\n");
    html.push_str("<h1>Résumé rankings</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} candidates</p>\n",
        rankings.len()
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Candidate</th><th onclick=\"sortTable(1)\">Tier</th><th onclick=\"sortTable(2)\">Score</th><th onclick=\"sortTable(3)\">Experience</th><th onclick=\"sortTable(4)\">Keywords</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for r in rankings {
        let class = if r.degraded { " class=\"fail\"" } else { "" };
        html.push_str(&format!(
            "<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&r.candidate),
            r.tier,
            r.total_score,
            r.experience,
            r.keyword_score,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !rankings.is_empty() {
        html.push_str(&generate_bar_chart(rankings));
    }
    html.push_str("</section>\n");

    tail(&mut html);
    html
}

/// Write an interview report as HTML.
pub fn write_html_report(report: &InterviewReport, path: &Path) -> Result<()> {
    write_output(&generate_html(report), path)
}

fn generate_bar_chart(rankings: &[CandidateRanking]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;
    let max_score = 100.0;

    let total_height = rankings.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, r) in rankings.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = (f64::from(r.total_score) / max_score).min(1.0);
        let width = (fraction * max_width as f64) as usize;

        let color = match r.tier {
            screener_core::Tier::Senior => "#22c55e",
            screener_core::Tier::MidLevel => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&r.candidate)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            r.total_score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --partial: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --partial: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.results-table th { cursor: pointer; }
.pass { background: var(--pass); }
.partial { background: var(--partial); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; white-space: pre-wrap; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_rankings, sample_report};

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&sample_report());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("T11"));
        assert!(html.contains("timed out"));
        assert!(html.contains("Senior"));
        assert!(html.contains("1.5 / 10.0"));
        assert!(html.contains("21:05 of 20:00"));
    }

    #[test]
    fn html_report_escapes_candidate_input() {
        let html = generate_html(&sample_report());
        assert!(html.contains("Ada &amp; Co"));
        assert!(html.contains("&lt;rewrite&gt;"));
        assert!(!html.contains("<rewrite>"));
    }

    #[test]
    fn html_report_marks_credit() {
        let html = generate_html(&sample_report());
        assert!(html.contains("<tr class=\"pass\">"));
        assert!(html.contains("<tr class=\"partial\">"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&sample_report(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn rankings_html_lists_candidates_in_order() {
        let html = generate_rankings_html(&sample_rankings());
        let senior = html.find("senior.pdf").unwrap();
        let broken = html.find("broken.pdf").unwrap();
        assert!(senior < broken);
        assert!(html.contains("<svg"));
        assert!(html.contains("<tr class=\"fail\">"));
    }

    #[test]
    fn empty_rankings_have_no_chart() {
        let html = generate_rankings_html(&[]);
        assert!(html.contains("0 candidates"));
        assert!(!html.contains("<svg"));
    }
}
