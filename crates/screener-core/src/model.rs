//! Core data model types for screener.
//!
//! Questions, the question bank they are drawn from, and the candidate
//! tiers that decide which difficulties an interview samples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single interview question. Loaded once from a bank and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank (e.g. "T7").
    pub id: String,
    /// Whether the question is behavioural or technical.
    pub kind: QuestionKind,
    /// Difficulty partition this question belongs to.
    pub difficulty: Difficulty,
    /// The prompt shown to the candidate.
    pub prompt: String,
    /// Required keywords, lower-cased. Technical answers are scored against these.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Reference answer shown in the final analysis.
    #[serde(default)]
    pub model_answer: String,
}

/// Question type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Generic,
    Technical,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Generic => write!(f, "generic"),
            QuestionKind::Technical => write!(f, "technical"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "g" | "behavioral" | "behavioural" => Ok(QuestionKind::Generic),
            "technical" | "t" => Ok(QuestionKind::Technical),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// Difficulty partition of the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Base,
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All difficulties in ascending order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Base,
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Base => write!(f, "base"),
            Difficulty::Basic => write!(f, "basic"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" => Ok(Difficulty::Base),
            "basic" => Ok(Difficulty::Basic),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Candidate seniority classification.
///
/// Produced by the résumé ranker and consumed by the interview session to
/// pick the technical question mix. `Unknown` behaves like `Junior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
    #[serde(other)]
    Unknown,
}

impl Tier {
    /// Parse a tier label, falling back to `Unknown` for anything unrecognised.
    pub fn from_label(label: &str) -> Tier {
        match label.trim().to_lowercase().as_str() {
            "junior" => Tier::Junior,
            "mid-level" | "mid level" | "midlevel" | "mid" => Tier::MidLevel,
            "senior" => Tier::Senior,
            _ => Tier::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Junior => "Junior",
            Tier::MidLevel => "Mid-Level",
            Tier::Senior => "Senior",
            Tier::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tier::from_label(s))
    }
}

/// A fixed, ordered collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the bank.
    #[serde(default)]
    pub description: String,
    /// Questions in bank order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// The built-in Python developer screening roster.
    pub fn builtin() -> anyhow::Result<QuestionBank> {
        crate::parser::builtin_bank()
    }

    /// Questions of the given difficulty, in bank order.
    pub fn partition(&self, difficulty: Difficulty) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect()
    }

    /// Number of questions of the given difficulty.
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .count()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
