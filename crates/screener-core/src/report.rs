//! Interview report type with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Tier;
use crate::scoring::{ScoredAnswer, SessionScore};
use crate::session::SessionState;

/// A scored transcript of one interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Candidate display name.
    pub candidate: String,
    pub tier: Tier,
    /// Bank the questions were drawn from.
    pub bank_id: String,
    /// Seed used for question selection.
    pub seed: u64,
    /// Session state when the report was taken.
    pub outcome: SessionState,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub elapsed_secs: u64,
    pub time_budget_secs: u64,
    /// Questions selected for the session, answered or not.
    pub questions_total: usize,
    /// Selected questions by kind; the maximum attainable subtotals.
    pub generic_questions: usize,
    pub technical_questions: usize,
    pub transcript: Vec<ScoredAnswer>,
    pub score: SessionScore,
}

impl InterviewReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: InterviewReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
