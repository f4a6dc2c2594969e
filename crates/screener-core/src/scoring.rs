//! Rule-based answer scoring and session score aggregation.

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionKind};

/// Credit earned by a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Credit {
    None,
    Partial,
    Full,
}

impl Credit {
    pub fn points(&self) -> f64 {
        match self {
            Credit::None => 0.0,
            Credit::Partial => 0.5,
            Credit::Full => 1.0,
        }
    }
}

/// Categorised feedback attached to a scored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    AllConcepts,
    SomeConcepts,
    MissedConcepts,
    Substantial,
    TooBrief,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::AllConcepts => "Full credit. Correctly identified all key concepts.",
            Feedback::SomeConcepts => {
                "Partial credit. Identified some key concepts but lacked complete detail."
            }
            Feedback::MissedConcepts => {
                "No credit. Did not address the core technical concept required."
            }
            Feedback::Substantial => "Full credit. Provided a thoughtful and substantial response.",
            Feedback::TooBrief => "Partial credit. Response was too brief or lacked depth.",
        }
    }
}

/// One answered question. Appended to the transcript and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub question_id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub model_answer: String,
    /// The candidate's response, exactly as submitted.
    pub response: String,
    pub credit: Credit,
    pub feedback: Feedback,
}

impl ScoredAnswer {
    pub fn points(&self) -> f64 {
        self.credit.points()
    }
}

/// Score one response against its question.
///
/// Technical answers need every required keyword for full credit and at
/// least one for partial credit. Generic answers earn full credit above
/// `generic_full_credit_chars` characters and partial credit otherwise;
/// they never score zero.
pub fn score_answer(
    question: &Question,
    response: &str,
    generic_full_credit_chars: usize,
) -> (Credit, Feedback) {
    match question.kind {
        QuestionKind::Technical => {
            let normalized = response.to_lowercase();
            let hit = |k: &String| normalized.contains(k.as_str());

            // all-match is checked first; it implies any-match
            if question.keywords.iter().all(hit) {
                (Credit::Full, Feedback::AllConcepts)
            } else if question.keywords.iter().any(hit) {
                (Credit::Partial, Feedback::SomeConcepts)
            } else {
                (Credit::None, Feedback::MissedConcepts)
            }
        }
        QuestionKind::Generic => {
            if response.chars().count() > generic_full_credit_chars {
                (Credit::Full, Feedback::Substantial)
            } else {
                (Credit::Partial, Feedback::TooBrief)
            }
        }
    }
}

/// Aggregate score of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScore {
    pub generic: f64,
    pub technical: f64,
    pub total: f64,
}

impl SessionScore {
    /// Recompute the score from scratch over a transcript.
    pub fn from_transcript(transcript: &[ScoredAnswer]) -> Self {
        let sum = |kind: QuestionKind| -> f64 {
            transcript
                .iter()
                .filter(|a| a.kind == kind)
                .map(ScoredAnswer::points)
                .sum()
        };
        let generic = sum(QuestionKind::Generic);
        let technical = sum(QuestionKind::Technical);
        Self {
            generic,
            technical,
            total: generic + technical,
        }
    }
}
