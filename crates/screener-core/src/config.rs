//! Screening configuration: time budget, question mix, scoring thresholds.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Difficulty, Tier};
use crate::ranker::RankerConfig;

/// Draw `count` questions from one difficulty partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub difficulty: Difficulty,
    pub count: usize,
}

impl Draw {
    pub const fn new(difficulty: Difficulty, count: usize) -> Self {
        Self { difficulty, count }
    }
}

/// Technical question mix per tier. `Unknown` uses the junior plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPlans {
    #[serde(default = "default_junior_plan")]
    pub junior: Vec<Draw>,
    #[serde(default = "default_mid_level_plan")]
    pub mid_level: Vec<Draw>,
    #[serde(default = "default_senior_plan")]
    pub senior: Vec<Draw>,
}

impl TierPlans {
    pub fn plan_for(&self, tier: Tier) -> &[Draw] {
        match tier {
            Tier::Junior | Tier::Unknown => &self.junior,
            Tier::MidLevel => &self.mid_level,
            Tier::Senior => &self.senior,
        }
    }
}

impl Default for TierPlans {
    fn default() -> Self {
        Self {
            junior: default_junior_plan(),
            mid_level: default_mid_level_plan(),
            senior: default_senior_plan(),
        }
    }
}

fn default_junior_plan() -> Vec<Draw> {
    vec![Draw::new(Difficulty::Basic, 5)]
}

fn default_mid_level_plan() -> Vec<Draw> {
    vec![
        Draw::new(Difficulty::Intermediate, 3),
        Draw::new(Difficulty::Basic, 2),
    ]
}

fn default_senior_plan() -> Vec<Draw> {
    vec![
        Draw::new(Difficulty::Advanced, 3),
        Draw::new(Difficulty::Intermediate, 2),
    ]
}

/// Top-level screener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Interview time budget in seconds.
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,
    /// Generic questions drawn from the base partition.
    #[serde(default = "default_generic_count")]
    pub generic_count: usize,
    /// Generic answers longer than this many characters earn full credit.
    #[serde(default = "default_generic_full_credit_chars")]
    pub generic_full_credit_chars: usize,
    /// Minimum questions every difficulty partition must hold.
    #[serde(default = "default_min_per_difficulty")]
    pub min_per_difficulty: usize,
    /// Technical question mix per tier.
    #[serde(default)]
    pub tiers: TierPlans,
    /// Résumé ranking weights and thresholds.
    #[serde(default)]
    pub ranker: RankerConfig,
}

fn default_time_budget_secs() -> u64 {
    20 * 60
}
fn default_generic_count() -> usize {
    5
}
fn default_generic_full_credit_chars() -> usize {
    30
}
fn default_min_per_difficulty() -> usize {
    5
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: default_time_budget_secs(),
            generic_count: default_generic_count(),
            generic_full_credit_chars: default_generic_full_credit_chars(),
            min_per_difficulty: default_min_per_difficulty(),
            tiers: TierPlans::default(),
            ranker: RankerConfig::default(),
        }
    }
}

impl ScreeningConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_budget_secs)
    }

    /// Total questions an interview for `tier` will ask.
    pub fn question_count(&self, tier: Tier) -> usize {
        self.generic_count
            + self
                .tiers
                .plan_for(tier)
                .iter()
                .map(|d| d.count)
                .sum::<usize>()
    }

    /// Reject settings that cannot produce a meaningful session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_budget_secs == 0 {
            return Err(ConfigError::InvalidTimeBudget);
        }
        for tier in [Tier::Junior, Tier::MidLevel, Tier::Senior] {
            if self.tiers.plan_for(tier).iter().all(|d| d.count == 0) {
                return Err(ConfigError::EmptyTierPlan(tier.to_string()));
            }
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `screener.toml` in the current directory
/// 2. `~/.config/screener/config.toml`
///
/// `SCREENER_TIME_BUDGET_SECS` overrides the time budget.
pub fn load_config_from(path: Option<&Path>) -> Result<ScreeningConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("screener.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ScreeningConfig::default(),
    };

    if let Ok(secs) = std::env::var("SCREENER_TIME_BUDGET_SECS") {
        config.time_budget_secs = secs
            .trim()
            .parse()
            .with_context(|| format!("invalid SCREENER_TIME_BUDGET_SECS: '{secs}'"))?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a TOML configuration string.
pub fn parse_config_str(content: &str) -> Result<ScreeningConfig> {
    let config: ScreeningConfig = toml::from_str(content)?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("screener"))
}
