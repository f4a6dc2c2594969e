//! screener-core: Résumé ranking and the timed interview session engine.
//!
//! This crate defines the data model, question bank parsing, keyword
//! scoring and the interview state machine that the rest of screener
//! builds on. It performs no terminal or file formatting of its own.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod ranker;
pub mod report;
pub mod scoring;
pub mod session;
pub mod traits;

pub use config::ScreeningConfig;
pub use error::{ConfigError, ProtocolError, SessionError};
pub use model::{Difficulty, Question, QuestionBank, QuestionKind, Tier};
pub use ranker::{analyze_and_rank_resume, CandidateRanking, ResumeRanker};
pub use session::{InterviewSession, Progress, SessionState};
