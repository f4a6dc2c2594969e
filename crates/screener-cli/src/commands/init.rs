//! The `screener init` command.

use anyhow::Result;

use screener_core::parser::BUILTIN_BANK_TOML;

pub fn execute() -> Result<()> {
    if std::path::Path::new("screener.toml").exists() {
        println!("screener.toml already exists, skipping.");
    } else {
        std::fs::write("screener.toml", SAMPLE_CONFIG)?;
        println!("Created screener.toml");
    }

    std::fs::create_dir_all("banks")?;
    let bank_path = std::path::Path::new("banks/python-screening.toml");
    if bank_path.exists() {
        println!("banks/python-screening.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, BUILTIN_BANK_TOML)?;
        println!("Created banks/python-screening.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust the time budget and tier plans in screener.toml");
    println!("  2. Run: screener validate --bank banks/python-screening.toml");
    println!("  3. Run: screener rank resumes/");
    println!("  4. Run: screener interview --resume resumes/candidate.pdf");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# screener configuration

# Interview time budget in seconds.
time_budget_secs = 1200

# Generic questions drawn per interview.
generic_count = 5

# Generic answers longer than this many characters earn full credit.
generic_full_credit_chars = 30

# Every difficulty partition of the bank must hold at least this many questions.
min_per_difficulty = 5

[tiers]
junior = [{ difficulty = "basic", count = 5 }]
mid_level = [
    { difficulty = "intermediate", count = 3 },
    { difficulty = "basic", count = 2 },
]
senior = [
    { difficulty = "advanced", count = 3 },
    { difficulty = "intermediate", count = 2 },
]

[ranker]
senior_keywords = ["tensorflow", "pytorch", "architecture", "kubernetes", "cloud", "design patterns"]
senior_weight = 15
mid_keywords = ["flask", "django", "api", "sql", "unit testing", "data analysis"]
mid_weight = 5
keyword_cap = 50
seniority_bonus = 25
mid_level_bonus = 15
advanced_degree_bonus = 20
degree_bonus = 10
senior_threshold = 80
mid_threshold = 50
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_matches_defaults() {
        let parsed = screener_core::config::parse_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, screener_core::ScreeningConfig::default());
    }
}
