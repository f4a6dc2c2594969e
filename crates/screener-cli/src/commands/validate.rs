//! The `screener validate` command.

use std::path::PathBuf;

use anyhow::Result;

use screener_core::config::load_config_from;
use screener_core::model::Difficulty;
use screener_core::parser;

pub fn execute(bank_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_bank(&bank_path)?]
    };
    anyhow::ensure!(
        !banks.is_empty(),
        "no question banks found in {}",
        bank_path.display()
    );

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Bank: {} ({} questions)", bank.name, bank.len());
        let counts: Vec<String> = Difficulty::ALL
            .iter()
            .map(|d| format!("{d} {}", bank.count(*d)))
            .collect();
        println!("  {}", counts.join(", "));

        let warnings = parser::validate_bank(bank, config.min_per_difficulty);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
