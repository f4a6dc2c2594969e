//! Timed, tier-adaptive interview sessions.
//!
//! A session draws its questions once, at creation, from a seeded RNG and
//! then moves `Created → Running → {Completed, TimedOut}`. Exactly one
//! question is outstanding while running; `submit_answer` scores it and
//! either presents the next one or ends the session.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScreeningConfig;
use crate::error::{ConfigError, ProtocolError, SessionError};
use crate::model::{Difficulty, Question, QuestionBank, QuestionKind, Tier};
use crate::report::InterviewReport;
use crate::scoring::{score_answer, ScoredAnswer, SessionScore};
use crate::traits::{Clock, SystemClock};

/// Lifecycle state of an interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    Running,
    Completed,
    TimedOut,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Created => write!(f, "created"),
            SessionState::Running => write!(f, "running"),
            SessionState::Completed => write!(f, "completed"),
            SessionState::TimedOut => write!(f, "timed out"),
        }
    }
}

/// What happened after an answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress<'a> {
    /// The session is still running; this question is now outstanding.
    Next(&'a Question),
    /// Every question has been answered.
    Completed,
    /// The time budget ran out.
    TimedOut,
}

/// Draw the questions for one interview.
///
/// Takes `generic_count` questions from the base partition, then the
/// tier's technical plan, sampling each partition without replacement,
/// and shuffles the combined sequence.
pub fn select_questions(
    bank: &QuestionBank,
    tier: Tier,
    config: &ScreeningConfig,
    rng: &mut StdRng,
) -> Result<Vec<Question>, ConfigError> {
    check_bank(bank, tier, config)?;

    let mut pools: BTreeMap<Difficulty, Vec<&Question>> = BTreeMap::new();
    let mut take = |difficulty: Difficulty, count: usize, rng: &mut StdRng| -> Vec<Question> {
        let pool = pools.entry(difficulty).or_insert_with(|| {
            let mut partition = bank.partition(difficulty);
            partition.shuffle(rng);
            partition
        });
        let count = count.min(pool.len());
        pool.drain(..count).cloned().collect()
    };

    let mut selected = take(Difficulty::Base, config.generic_count, rng);
    for draw in config.tiers.plan_for(tier) {
        selected.extend(take(draw.difficulty, draw.count, rng));
    }
    selected.shuffle(rng);

    tracing::debug!(
        %tier,
        ids = ?selected.iter().map(|q| q.id.as_str()).collect::<Vec<_>>(),
        "selected interview questions"
    );
    Ok(selected)
}

/// Fail fast if `bank` cannot serve an interview for `tier`.
pub fn check_bank(
    bank: &QuestionBank,
    tier: Tier,
    config: &ScreeningConfig,
) -> Result<(), ConfigError> {
    config.validate()?;

    if bank.is_empty() {
        return Err(ConfigError::EmptyBank);
    }

    let mut seen = HashSet::new();
    for q in &bank.questions {
        if !seen.insert(q.id.as_str()) {
            return Err(ConfigError::DuplicateQuestionId(q.id.clone()));
        }
        if q.difficulty == Difficulty::Base && q.kind != QuestionKind::Generic {
            return Err(ConfigError::TechnicalAtBase(q.id.clone()));
        }
    }

    let mut required: BTreeMap<Difficulty, usize> = Difficulty::ALL
        .iter()
        .map(|&d| (d, config.min_per_difficulty))
        .collect();
    let mut needed_by_tier: BTreeMap<Difficulty, usize> = BTreeMap::new();
    *needed_by_tier.entry(Difficulty::Base).or_default() += config.generic_count;
    for draw in config.tiers.plan_for(tier) {
        *needed_by_tier.entry(draw.difficulty).or_default() += draw.count;
    }
    for (difficulty, needed) in needed_by_tier {
        let entry = required.entry(difficulty).or_default();
        *entry = (*entry).max(needed);
    }

    for (difficulty, required) in required {
        let available = bank.count(difficulty);
        if available < required {
            return Err(ConfigError::InsufficientQuestions {
                difficulty,
                required,
                available,
            });
        }
    }
    Ok(())
}

/// A single candidate's interview.
#[derive(Debug)]
pub struct InterviewSession {
    tier: Tier,
    bank_id: String,
    seed: u64,
    questions: Vec<Question>,
    cursor: usize,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    time_budget: Duration,
    generic_full_credit_chars: usize,
    transcript: Vec<ScoredAnswer>,
    score: SessionScore,
    clock: Arc<dyn Clock>,
}

impl InterviewSession {
    /// Create a session on the system clock.
    pub fn new(
        bank: &QuestionBank,
        tier: Tier,
        config: &ScreeningConfig,
        seed: u64,
    ) -> Result<Self, SessionError> {
        Self::with_clock(bank, tier, config, seed, Arc::new(SystemClock))
    }

    /// Create a session that reads time from `clock`.
    pub fn with_clock(
        bank: &QuestionBank,
        tier: Tier,
        config: &ScreeningConfig,
        seed: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SessionError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let questions = select_questions(bank, tier, config, &mut rng)?;

        Ok(Self {
            tier,
            bank_id: bank.id.clone(),
            seed,
            questions,
            cursor: 0,
            state: SessionState::Created,
            started_at: None,
            finished_at: None,
            time_budget: config.time_budget(),
            generic_full_credit_chars: config.generic_full_credit_chars,
            transcript: Vec::new(),
            score: SessionScore::default(),
            clock,
        })
    }

    /// Start the clock and present the first question.
    pub fn start(&mut self) -> Result<&Question, SessionError> {
        if self.state != SessionState::Created {
            return Err(ProtocolError::AlreadyStarted.into());
        }
        self.started_at = Some(self.clock.now());
        self.cursor = 0;
        self.state = SessionState::Running;
        tracing::info!(
            tier = %self.tier,
            questions = self.questions.len(),
            budget_secs = self.time_budget.as_secs(),
            "interview started"
        );

        self.questions
            .first()
            .ok_or_else(|| ProtocolError::NoOutstandingQuestion.into())
    }

    /// Record and score the answer to the outstanding question.
    pub fn submit_answer(&mut self, response: &str) -> Result<Progress<'_>, SessionError> {
        if self.state != SessionState::Running {
            return Err(ProtocolError::NotRunning { state: self.state }.into());
        }
        let question = self
            .questions
            .get(self.cursor)
            .ok_or(ProtocolError::NoOutstandingQuestion)?;

        let (credit, feedback) = score_answer(question, response, self.generic_full_credit_chars);
        tracing::debug!(question = %question.id, ?credit, "answer scored");

        self.transcript.push(ScoredAnswer {
            question_id: question.id.clone(),
            kind: question.kind,
            prompt: question.prompt.clone(),
            model_answer: question.model_answer.clone(),
            response: response.to_string(),
            credit,
            feedback,
        });
        self.score = SessionScore::from_transcript(&self.transcript);
        self.cursor += 1;

        if !self.check_time() {
            self.finish(SessionState::TimedOut);
            return Ok(Progress::TimedOut);
        }
        if self.cursor >= self.questions.len() {
            self.finish(SessionState::Completed);
            return Ok(Progress::Completed);
        }
        Ok(Progress::Next(&self.questions[self.cursor]))
    }

    fn finish(&mut self, state: SessionState) {
        self.state = state;
        self.finished_at = Some(self.clock.now());
        tracing::info!(
            outcome = %state,
            answered = self.transcript.len(),
            total = self.score.total,
            "interview finished"
        );
    }

    /// True while time remains in the budget. Has no side effects.
    pub fn check_time(&self) -> bool {
        self.elapsed() < self.time_budget
    }

    /// Time since `start`; zero before it, frozen once the session ends.
    pub fn elapsed(&self) -> Duration {
        let Some(start) = self.started_at else {
            return Duration::ZERO;
        };
        let end = self.finished_at.unwrap_or_else(|| self.clock.now());
        (end - start).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn remaining(&self) -> Duration {
        self.time_budget.saturating_sub(self.elapsed())
    }

    /// The question awaiting an answer, if the session is running.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Running => self.questions.get(self.cursor),
            _ => None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.transcript.len()
    }

    pub fn transcript(&self) -> &[ScoredAnswer] {
        &self.transcript
    }

    pub fn score(&self) -> SessionScore {
        self.score
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    fn count_kind(&self, kind: QuestionKind) -> usize {
        self.questions.iter().filter(|q| q.kind == kind).count()
    }

    /// Snapshot the session as a report for `candidate`.
    pub fn to_report(&self, candidate: &str) -> InterviewReport {
        InterviewReport {
            id: Uuid::new_v4(),
            candidate: candidate.to_string(),
            tier: self.tier,
            bank_id: self.bank_id.clone(),
            seed: self.seed,
            outcome: self.state,
            started_at: self.started_at,
            finished_at: self.finished_at,
            elapsed_secs: self.elapsed().as_secs(),
            time_budget_secs: self.time_budget.as_secs(),
            questions_total: self.questions.len(),
            generic_questions: self.count_kind(QuestionKind::Generic),
            technical_questions: self.count_kind(QuestionKind::Technical),
            transcript: self.transcript.clone(),
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Credit;
    use crate::traits::ManualClock;

    fn builtin() -> QuestionBank {
        QuestionBank::builtin().unwrap()
    }

    fn counts(questions: &[Question]) -> BTreeMap<Difficulty, usize> {
        let mut map = BTreeMap::new();
        for q in questions {
            *map.entry(q.difficulty).or_insert(0) += 1;
        }
        map
    }

    fn manual_session(tier: Tier, seed: u64) -> (InterviewSession, ManualClock) {
        let clock = ManualClock::default();
        let session = InterviewSession::with_clock(
            &builtin(),
            tier,
            &ScreeningConfig::default(),
            seed,
            Arc::new(clock.clone()),
        )
        .unwrap();
        (session, clock)
    }

    /// An answer that earns full credit for `q`.
    fn strong_answer(q: &Question) -> String {
        match q.kind {
            QuestionKind::Technical => q.keywords.join(" "),
            QuestionKind::Generic => "a thoughtful answer that runs well past thirty characters".into(),
        }
    }

    #[test]
    fn every_tier_draws_ten_with_five_technical() {
        for tier in [Tier::Junior, Tier::MidLevel, Tier::Senior, Tier::Unknown] {
            for seed in 0..20 {
                let (session, _) = manual_session(tier, seed);
                let qs = session.questions();
                assert_eq!(qs.len(), 10, "{tier} seed {seed}");
                let technical = qs.iter().filter(|q| q.difficulty != Difficulty::Base).count();
                assert_eq!(technical, 5, "{tier} seed {seed}");
                let unique: HashSet<_> = qs.iter().map(|q| q.id.as_str()).collect();
                assert_eq!(unique.len(), 10);
            }
        }
    }

    #[test]
    fn tier_mix_per_difficulty() {
        let (senior, _) = manual_session(Tier::Senior, 7);
        let c = counts(senior.questions());
        assert_eq!(c.get(&Difficulty::Base), Some(&5));
        assert_eq!(c.get(&Difficulty::Advanced), Some(&3));
        assert_eq!(c.get(&Difficulty::Intermediate), Some(&2));
        assert_eq!(c.get(&Difficulty::Basic), None);

        let (mid, _) = manual_session(Tier::MidLevel, 7);
        let c = counts(mid.questions());
        assert_eq!(c.get(&Difficulty::Intermediate), Some(&3));
        assert_eq!(c.get(&Difficulty::Basic), Some(&2));

        for tier in [Tier::Junior, Tier::Unknown] {
            let (s, _) = manual_session(tier, 7);
            let c = counts(s.questions());
            assert_eq!(c.get(&Difficulty::Basic), Some(&5));
            assert_eq!(c.get(&Difficulty::Base), Some(&5));
        }
    }

    #[test]
    fn same_seed_same_order() {
        let ids = |s: &InterviewSession| -> Vec<String> {
            s.questions().iter().map(|q| q.id.clone()).collect()
        };
        let (a, _) = manual_session(Tier::Senior, 42);
        let (b, _) = manual_session(Tier::Senior, 42);
        assert_eq!(ids(&a), ids(&b));

        let differs = (0..10).any(|seed| {
            let (other, _) = manual_session(Tier::Senior, seed);
            ids(&other) != ids(&a)
        });
        assert!(differs);
    }

    #[test]
    fn shuffle_mixes_generic_and_technical() {
        // Over many seeds, the first question is sometimes technical.
        let technical_first = (0..50).any(|seed| {
            let (s, _) = manual_session(Tier::Junior, seed);
            s.questions()[0].kind == QuestionKind::Technical
        });
        assert!(technical_first);
    }

    #[test]
    fn completes_when_all_answered_in_time() {
        let (mut session, clock) = manual_session(Tier::MidLevel, 3);
        assert_eq!(session.state(), SessionState::Created);

        let first = session.start().unwrap().clone();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.current_question(), Some(&first));

        for i in 0..10 {
            clock.advance(chrono::Duration::seconds(60));
            let answer = strong_answer(session.current_question().unwrap());
            let progress = session.submit_answer(&answer).unwrap();
            if i < 9 {
                assert!(matches!(progress, Progress::Next(_)));
            } else {
                assert_eq!(progress, Progress::Completed);
            }
        }

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.answered(), 10);
        assert!(session.current_question().is_none());
        let score = session.score();
        assert_eq!(score.total, 10.0);
        assert_eq!(score.generic, 5.0);
        assert_eq!(score.technical, 5.0);
    }

    #[test]
    fn score_always_matches_transcript() {
        let (mut session, _) = manual_session(Tier::Senior, 11);
        session.start().unwrap();
        let replies = ["", "yes", "memory yield", "decoupling", "x"];
        let mut i = 0;
        while session.state() == SessionState::Running {
            session.submit_answer(replies[i % replies.len()]).unwrap();
            i += 1;

            let transcript_sum: f64 = session.transcript().iter().map(|a| a.points()).sum();
            let score = session.score();
            assert_eq!(score.total, transcript_sum);
            assert_eq!(score.total, score.generic + score.technical);
            assert!(score.generic <= 5.0 && score.technical <= 5.0);
            for a in session.transcript() {
                assert!([0.0, 0.5, 1.0].contains(&a.points()));
            }
        }
        // every generic answer earns at least half a point
        assert!(session.score().generic >= 2.5);
    }

    #[test]
    fn times_out_after_budget() {
        let (mut session, clock) = manual_session(Tier::Junior, 5);
        session.start().unwrap();
        session.submit_answer("first").unwrap();

        clock.advance(chrono::Duration::minutes(20));
        assert!(!session.check_time());
        // the late answer is still recorded
        let progress = session.submit_answer("late").unwrap();
        assert_eq!(progress, Progress::TimedOut);
        assert_eq!(session.state(), SessionState::TimedOut);
        assert_eq!(session.answered(), 2);
        assert_eq!(session.elapsed(), Duration::from_secs(20 * 60));
        assert_eq!(session.remaining(), Duration::ZERO);
    }

    #[test]
    fn last_answer_past_deadline_is_timed_out() {
        let (mut session, clock) = manual_session(Tier::Junior, 5);
        session.start().unwrap();
        for _ in 0..9 {
            session.submit_answer("ok").unwrap();
        }
        clock.advance(chrono::Duration::minutes(21));
        assert_eq!(session.submit_answer("ok").unwrap(), Progress::TimedOut);
    }

    #[test]
    fn check_time_is_idempotent() {
        let (mut session, clock) = manual_session(Tier::Junior, 1);
        assert!(session.check_time());
        assert_eq!(session.elapsed(), Duration::ZERO);

        session.start().unwrap();
        clock.advance(chrono::Duration::minutes(5));
        assert_eq!(session.check_time(), session.check_time());
        assert_eq!(session.remaining(), Duration::from_secs(15 * 60));
        assert_eq!(session.answered(), 0);
    }

    #[test]
    fn elapsed_freezes_when_finished() {
        let (mut session, clock) = manual_session(Tier::Junior, 1);
        session.start().unwrap();
        for _ in 0..10 {
            clock.advance(chrono::Duration::seconds(30));
            session.submit_answer("answer").unwrap();
        }
        clock.advance(chrono::Duration::hours(1));
        assert_eq!(session.elapsed(), Duration::from_secs(300));
    }

    #[test]
    fn protocol_errors() {
        let (mut session, _) = manual_session(Tier::Junior, 9);
        let err = session.submit_answer("too early").unwrap_err();
        assert_eq!(
            err,
            SessionError::Protocol(ProtocolError::NotRunning {
                state: SessionState::Created
            })
        );

        session.start().unwrap();
        assert_eq!(
            session.start().unwrap_err(),
            SessionError::Protocol(ProtocolError::AlreadyStarted)
        );

        while session.state() == SessionState::Running {
            session.submit_answer("a").unwrap();
        }
        let err = session.submit_answer("after the end").unwrap_err();
        assert!(err.is_protocol());
        assert_eq!(session.answered(), 10);
    }

    fn synthetic_bank(per_difficulty: usize) -> QuestionBank {
        let mut questions = Vec::new();
        for difficulty in Difficulty::ALL {
            for i in 0..per_difficulty {
                questions.push(Question {
                    id: format!("{difficulty}-{i}"),
                    kind: if difficulty == Difficulty::Base {
                        QuestionKind::Generic
                    } else {
                        QuestionKind::Technical
                    },
                    difficulty,
                    prompt: "?".into(),
                    keywords: vec!["k".into()],
                    model_answer: String::new(),
                });
            }
        }
        QuestionBank {
            id: "synthetic".into(),
            name: "Synthetic".into(),
            description: String::new(),
            questions,
        }
    }

    #[test]
    fn config_errors_fail_at_creation() {
        let config = ScreeningConfig::default();

        let empty = QuestionBank {
            id: "e".into(),
            name: "E".into(),
            description: String::new(),
            questions: vec![],
        };
        let err = InterviewSession::new(&empty, Tier::Junior, &config, 0).unwrap_err();
        assert_eq!(err, SessionError::Config(ConfigError::EmptyBank));

        let mut small = synthetic_bank(5);
        small
            .questions
            .retain(|q| !(q.difficulty == Difficulty::Advanced && q.id != "advanced-0"));
        // the minimum applies even to tiers that never draw advanced questions
        let err = InterviewSession::new(&small, Tier::Junior, &config, 0).unwrap_err();
        assert_eq!(
            err,
            SessionError::Config(ConfigError::InsufficientQuestions {
                difficulty: Difficulty::Advanced,
                required: 5,
                available: 1,
            })
        );

        let mut dupes = synthetic_bank(5);
        dupes.questions[1].id = dupes.questions[0].id.clone();
        let err = InterviewSession::new(&dupes, Tier::Junior, &config, 0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(ConfigError::DuplicateQuestionId(_))
        ));
    }

    #[test]
    fn technical_question_at_base_is_rejected() {
        let mut bank = synthetic_bank(5);
        bank.questions[0].kind = QuestionKind::Technical;
        let id = bank.questions[0].id.clone();

        let err = InterviewSession::new(&bank, Tier::Senior, &ScreeningConfig::default(), 0)
            .unwrap_err();
        assert_eq!(err, SessionError::Config(ConfigError::TechnicalAtBase(id)));
    }

    #[test]
    fn tier_plan_larger_than_minimum_is_checked() {
        let mut config = ScreeningConfig::default();
        config.min_per_difficulty = 1;
        config.tiers.senior = vec![crate::config::Draw::new(Difficulty::Advanced, 4)];
        let bank = synthetic_bank(3);
        let err = InterviewSession::new(&bank, Tier::Senior, &config, 0).unwrap_err();
        assert!(err.is_config());

        // a custom mix with smaller counts works on a small bank
        config.generic_count = 2;
        config.tiers.junior = vec![
            crate::config::Draw::new(Difficulty::Basic, 1),
            crate::config::Draw::new(Difficulty::Basic, 2),
        ];
        let session = InterviewSession::new(&bank, Tier::Junior, &config, 0).unwrap();
        assert_eq!(session.total_questions(), 5);
        let unique: HashSet<_> = session.questions().iter().map(|q| &q.id).collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn report_snapshot() {
        let (mut session, clock) = manual_session(Tier::Senior, 2);
        session.start().unwrap();
        clock.advance(chrono::Duration::seconds(45));
        let q = session.current_question().unwrap().clone();
        session.submit_answer(&strong_answer(&q)).unwrap();

        let report = session.to_report("alice.pdf");
        assert_eq!(report.candidate, "alice.pdf");
        assert_eq!(report.tier, Tier::Senior);
        assert_eq!(report.seed, 2);
        assert_eq!(report.outcome, SessionState::Running);
        assert_eq!(report.questions_total, 10);
        assert_eq!(report.generic_questions, 5);
        assert_eq!(report.technical_questions, 5);
        assert_eq!(report.transcript.len(), 1);
        assert_eq!(report.transcript[0].credit, Credit::Full);
        assert_eq!(report.elapsed_secs, 45);
    }
}
