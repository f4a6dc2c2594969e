//! Shared report fixtures for rendering tests.

use chrono::{TimeZone, Utc};

use screener_core::model::{QuestionKind, Tier};
use screener_core::ranker::{CandidateRanking, ExperienceBucket};
use screener_core::report::InterviewReport;
use screener_core::scoring::{Credit, Feedback, ScoredAnswer, SessionScore};
use screener_core::session::SessionState;

pub fn sample_report() -> InterviewReport {
    let transcript = vec![
        ScoredAnswer {
            question_id: "G1".into(),
            kind: QuestionKind::Generic,
            prompt: "Tell us about a project you are proud of.".into(),
            model_answer: String::new(),
            response: "A data pipeline <rewrite> that cut costs in half".into(),
            credit: Credit::Full,
            feedback: Feedback::Substantial,
        },
        ScoredAnswer {
            question_id: "T11".into(),
            kind: QuestionKind::Technical,
            prompt: "Explain the Global Interpreter Lock.".into(),
            model_answer: "Only one thread executes bytecode at a time.".into(),
            response: "it is a lock".into(),
            credit: Credit::Partial,
            feedback: Feedback::SomeConcepts,
        },
    ];
    let score = SessionScore::from_transcript(&transcript);

    InterviewReport {
        id: uuid::Uuid::nil(),
        candidate: "Ada & Co".into(),
        tier: Tier::Senior,
        bank_id: "python-screening".into(),
        seed: 7,
        outcome: SessionState::TimedOut,
        started_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()),
        finished_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 21, 5).unwrap()),
        elapsed_secs: 1265,
        time_budget_secs: 1200,
        questions_total: 10,
        generic_questions: 5,
        technical_questions: 5,
        transcript,
        score,
    }
}

pub fn sample_rankings() -> Vec<CandidateRanking> {
    vec![
        CandidateRanking {
            candidate: "senior.pdf".into(),
            tier: Tier::Senior,
            total_score: 95,
            experience: ExperienceBucket::FivePlus,
            keyword_score: 75,
            degraded: false,
        },
        CandidateRanking {
            candidate: "broken.pdf".into(),
            tier: Tier::Junior,
            total_score: 0,
            experience: ExperienceBucket::Unknown,
            keyword_score: 0,
            degraded: true,
        },
    ]
}
