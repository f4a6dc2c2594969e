//! Keyword-heuristic résumé ranking.
//!
//! Scores lower-cased résumé text in three additive stages (technical
//! keywords, seniority wording, education) and maps the total to a tier.
//! Each stage contributes at most once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Tier;

/// Weights, keyword tables and thresholds for résumé ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankerConfig {
    #[serde(default = "default_senior_keywords")]
    pub senior_keywords: Vec<String>,
    #[serde(default = "default_senior_weight")]
    pub senior_weight: u32,
    #[serde(default = "default_mid_keywords")]
    pub mid_keywords: Vec<String>,
    #[serde(default = "default_mid_weight")]
    pub mid_weight: u32,
    /// Upper bound on the technical keyword contribution.
    #[serde(default = "default_keyword_cap")]
    pub keyword_cap: u32,
    /// Bonus for "senior" / "lead".
    #[serde(default = "default_seniority_bonus")]
    pub seniority_bonus: u32,
    /// Bonus for "mid-level" / "developer".
    #[serde(default = "default_mid_level_bonus")]
    pub mid_level_bonus: u32,
    /// Bonus for a master's degree or PhD.
    #[serde(default = "default_advanced_degree_bonus")]
    pub advanced_degree_bonus: u32,
    /// Bonus for a bachelor's degree.
    #[serde(default = "default_degree_bonus")]
    pub degree_bonus: u32,
    #[serde(default = "default_senior_threshold")]
    pub senior_threshold: u32,
    #[serde(default = "default_mid_threshold")]
    pub mid_threshold: u32,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_senior_keywords() -> Vec<String> {
    strings(&[
        "tensorflow",
        "pytorch",
        "architecture",
        "kubernetes",
        "cloud",
        "design patterns",
    ])
}
fn default_senior_weight() -> u32 {
    15
}
fn default_mid_keywords() -> Vec<String> {
    strings(&[
        "flask",
        "django",
        "api",
        "sql",
        "unit testing",
        "data analysis",
    ])
}
fn default_mid_weight() -> u32 {
    5
}
fn default_keyword_cap() -> u32 {
    50
}
fn default_seniority_bonus() -> u32 {
    25
}
fn default_mid_level_bonus() -> u32 {
    15
}
fn default_advanced_degree_bonus() -> u32 {
    20
}
fn default_degree_bonus() -> u32 {
    10
}
fn default_senior_threshold() -> u32 {
    80
}
fn default_mid_threshold() -> u32 {
    50
}

/// Prefix the extraction adapter writes when a file cannot be read.
/// Text containing it is ranked as a failed extraction.
pub const DEGRADED_MARKER: &str = "error parsing";

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            senior_keywords: default_senior_keywords(),
            senior_weight: default_senior_weight(),
            mid_keywords: default_mid_keywords(),
            mid_weight: default_mid_weight(),
            keyword_cap: default_keyword_cap(),
            seniority_bonus: default_seniority_bonus(),
            mid_level_bonus: default_mid_level_bonus(),
            advanced_degree_bonus: default_advanced_degree_bonus(),
            degree_bonus: default_degree_bonus(),
            senior_threshold: default_senior_threshold(),
            mid_threshold: default_mid_threshold(),
        }
    }
}

/// Estimated years-of-experience bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBucket {
    #[serde(rename = "N/A")]
    Unknown,
    #[serde(rename = "2-5")]
    TwoToFive,
    #[serde(rename = "5+")]
    FivePlus,
}

impl fmt::Display for ExperienceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceBucket::Unknown => write!(f, "N/A"),
            ExperienceBucket::TwoToFive => write!(f, "2-5"),
            ExperienceBucket::FivePlus => write!(f, "5+"),
        }
    }
}

/// Ranking of a single résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRanking {
    /// Display name, usually the uploaded file name.
    pub candidate: String,
    pub tier: Tier,
    pub total_score: u32,
    pub experience: ExperienceBucket,
    /// Raw technical keyword score before the cap is applied.
    pub keyword_score: u32,
    /// True when the résumé text could not be extracted.
    #[serde(default)]
    pub degraded: bool,
}

/// Scores résumé text against weighted keyword tables.
#[derive(Debug, Clone, Default)]
pub struct ResumeRanker {
    config: RankerConfig,
}

impl ResumeRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Rank one résumé. `text` is expected to be lower-cased already.
    pub fn rank(&self, text: &str, candidate: &str) -> CandidateRanking {
        let cfg = &self.config;

        if text.contains(DEGRADED_MARKER) {
            tracing::warn!("résumé for {candidate} could not be read, ranking as junior");
            return CandidateRanking {
                candidate: candidate.to_string(),
                tier: Tier::Junior,
                total_score: 0,
                experience: ExperienceBucket::Unknown,
                keyword_score: 0,
                degraded: true,
            };
        }

        let senior_count = count_present(text, &cfg.senior_keywords);
        let mid_count = count_present(text, &cfg.mid_keywords);
        // weights come from user config; saturate rather than overflow
        let keyword_score = senior_count
            .saturating_mul(cfg.senior_weight)
            .saturating_add(mid_count.saturating_mul(cfg.mid_weight));

        let mut total = keyword_score.min(cfg.keyword_cap);
        let mut experience = ExperienceBucket::TwoToFive;

        if contains_any(text, &["senior", "lead"]) {
            total = total.saturating_add(cfg.seniority_bonus);
            experience = ExperienceBucket::FivePlus;
        } else if contains_any(text, &["mid-level", "developer"]) {
            total = total.saturating_add(cfg.mid_level_bonus);
        }

        if contains_any(text, &["m.s.", "phd", "master"]) {
            total = total.saturating_add(cfg.advanced_degree_bonus);
        } else if contains_any(text, &["b.s.", "bachelor"]) {
            total = total.saturating_add(cfg.degree_bonus);
        }

        let tier = self.tier_for(total);
        tracing::debug!(
            candidate,
            senior_count,
            mid_count,
            keyword_score,
            total,
            %tier,
            "ranked résumé"
        );

        CandidateRanking {
            candidate: candidate.to_string(),
            tier,
            total_score: total,
            experience,
            keyword_score,
            degraded: false,
        }
    }

    /// Map a total score to a tier.
    pub fn tier_for(&self, total: u32) -> Tier {
        if total >= self.config.senior_threshold {
            Tier::Senior
        } else if total >= self.config.mid_threshold {
            Tier::MidLevel
        } else {
            Tier::Junior
        }
    }

    /// Rank a batch of `(candidate, text)` pairs in input order.
    pub fn rank_batch<'a, I>(&self, resumes: I) -> Vec<CandidateRanking>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        resumes
            .into_iter()
            .map(|(candidate, text)| self.rank(text, candidate))
            .collect()
    }
}

/// Rank one résumé with the default weights.
pub fn analyze_and_rank_resume(text: &str, candidate: &str) -> CandidateRanking {
    ResumeRanker::default().rank(text, candidate)
}

/// Sort by total score, highest first. Ties keep their input order.
pub fn sort_rankings(rankings: &mut [CandidateRanking]) {
    rankings.sort_by(|a, b| b.total_score.cmp(&a.total_score));
}

fn count_present(text: &str, keywords: &[String]) -> u32 {
    keywords.iter().filter(|k| text.contains(k.as_str())).count() as u32
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}
