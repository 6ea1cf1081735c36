// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    quiz::{QuizSession, QuizSnapshot, SubmitOutcome},
    utils::sound::SoundEffect,
};

/// DTO for answering the current question.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Index of the chosen option (0-3).
    pub choice: usize,
}

/// What happened to a submitted answer.
#[derive(Debug, Serialize)]
pub struct AnswerOutcome {
    /// False when the question was already answered or the quiz is over.
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl From<SubmitOutcome> for AnswerOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Answered { correct, .. } => Self {
                accepted: true,
                correct: Some(correct),
            },
            SubmitOutcome::Ignored => Self {
                accepted: false,
                correct: None,
            },
        }
    }
}

/// A quiz run as returned by every session endpoint.
/// `signals` holds the feedback sounds emitted since the previous response.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub state: QuizSnapshot,
    pub signals: Vec<SoundEffect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AnswerOutcome>,
}

impl SessionResponse {
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            id: session.id(),
            state: session.snapshot(),
            signals: session.drain_signals(),
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: SubmitOutcome) -> Self {
        self.outcome = Some(outcome.into());
        self
    }
}
