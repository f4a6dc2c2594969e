//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, Question, QuestionBank, QuestionKind};

/// The roster compiled into the binary.
pub const BUILTIN_BANK_TOML: &str = include_str!("../data/python-screening.toml");

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    kind: String,
    difficulty: String,
    prompt: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    model_answer: String,
}

/// Parse the built-in Python screening bank.
pub fn builtin_bank() -> Result<QuestionBank> {
    parse_bank_str(BUILTIN_BANK_TOML, Path::new("<builtin>"))
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind: QuestionKind = q
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

            Ok(Question {
                id: q.id,
                kind,
                difficulty,
                prompt: q.prompt.trim().to_string(),
                keywords: q.keywords.iter().map(|k| k.to_lowercase()).collect(),
                model_answer: q.model_answer.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_bank(bank: &QuestionBank, min_per_difficulty: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &bank.questions {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "prompt is empty".into(),
            });
        }
        if q.kind == QuestionKind::Technical && q.keywords.is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "technical question has no keywords; every answer earns full credit"
                    .into(),
            });
        }
        if q.kind == QuestionKind::Technical && q.difficulty == Difficulty::Base {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "technical question at base difficulty; sessions reject this bank".into(),
            });
        }
        if q.kind == QuestionKind::Generic && q.difficulty != Difficulty::Base {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!(
                    "generic question at {} difficulty is only drawn as a technical question",
                    q.difficulty
                ),
            });
        }
    }

    for difficulty in Difficulty::ALL {
        let available = bank.count(difficulty);
        if available < min_per_difficulty {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "only {available} {difficulty} question(s), sessions need at least {min_per_difficulty}"
                ),
            });
        }
    }

    warnings
}
