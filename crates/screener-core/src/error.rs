//! Interview session error types.
//!
//! Configuration errors are raised when a session is created; protocol
//! errors mean the caller drove the session out of order. Answer text is
//! never an error, so neither variant is produced by scoring.

use thiserror::Error;

use crate::model::Difficulty;
use crate::session::SessionState;

/// The question bank or screening configuration cannot support a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The bank contains no questions at all.
    #[error("question bank is empty")]
    EmptyBank,

    /// A difficulty partition has fewer questions than a draw needs.
    #[error("not enough {difficulty} questions: need {required}, bank has {available}")]
    InsufficientQuestions {
        difficulty: Difficulty,
        required: usize,
        available: usize,
    },

    /// Two questions share an id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(String),

    /// A technical question sits in the base partition, which fills the generic slots.
    #[error("question {0} is technical but has base difficulty")]
    TechnicalAtBase(String),

    /// The time budget is zero.
    #[error("time budget must be greater than zero")]
    InvalidTimeBudget,

    /// A tier's technical plan draws no questions.
    #[error("tier plan for {0} draws no technical questions")]
    EmptyTierPlan(String),
}

/// A session operation was called out of sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// `start` was called on a session that already started.
    #[error("session already started")]
    AlreadyStarted,

    /// The session is not accepting answers.
    #[error("session is not running (state: {state})")]
    NotRunning { state: SessionState },

    /// There is no question waiting for an answer.
    #[error("no question is outstanding")]
    NoOutstandingQuestion,
}

/// Errors surfaced by the interview session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl SessionError {
    /// Returns `true` if the session could not be built from its inputs.
    pub fn is_config(&self) -> bool {
        matches!(self, SessionError::Config(_))
    }

    /// Returns `true` if the caller invoked an operation out of order.
    pub fn is_protocol(&self) -> bool {
        matches!(self, SessionError::Protocol(_))
    }
}
