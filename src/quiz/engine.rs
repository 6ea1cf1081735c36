// src/quiz/engine.rs

use std::sync::Arc;

use serde::Serialize;

use crate::{
    models::question::{OPTION_COUNT, Question},
    utils::sound::{FeedbackSink, SoundEffect},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("choice {choice} is out of range (0..{option_count})")]
    ChoiceOutOfRange { choice: usize, option_count: usize },

    #[error("a quiz needs at least one question")]
    EmptyQuestionBank,
}

/// Where a quiz run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    InProgress {
        current_index: usize,
        score: usize,
        selected: Option<usize>,
    },
    Finished {
        score: usize,
    },
}

impl QuizState {
    pub const INITIAL: QuizState = QuizState::InProgress {
        current_index: 0,
        score: 0,
        selected: None,
    };
}

/// Identifies the answer a delayed advance belongs to.
/// A restart or a newer answer makes older tickets stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The answer was recorded; advance with `ticket` once the feedback delay has passed.
    Answered { correct: bool, ticket: AdvanceTicket },
    /// The quiz is finished or the current question was already answered.
    Ignored,
}

/// How a finished run is ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Legend,
    Roadie,
    Rookie,
}

impl Verdict {
    pub fn for_score(score: usize, total: usize) -> Self {
        if score == total {
            Verdict::Legend
        } else if score * 2 > total {
            Verdict::Roadie
        } else {
            Verdict::Rookie
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Legend => "LEGENDARISK ROCKSTJÄRNA! Du är redo för 1989.",
            Verdict::Roadie => "Roadie-status uppnådd. Fortsätt lyssna på vinylen!",
            Verdict::Rookie => "Kanske dags för en turné i Falköping för att lära dig mer?",
        }
    }
}

/// Flat view of a run, as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSnapshot {
    pub current_index: usize,
    pub score: usize,
    pub selected: Option<usize>,
    pub finished: bool,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict_message: Option<&'static str>,
}

/// Sequential trivia state machine.
///
/// Answers are scored by `submit`; moving on to the next question is a
/// separate `advance` step so the caller can show the result first.
pub struct QuizEngine {
    questions: &'static [Question],
    state: QuizState,
    epoch: u64,
    feedback: Arc<dyn FeedbackSink>,
}

impl QuizEngine {
    /// Starts a run at the first question and emits `start`.
    pub fn new(
        questions: &'static [Question],
        feedback: Arc<dyn FeedbackSink>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionBank);
        }
        feedback.emit(SoundEffect::Start);
        Ok(Self {
            questions,
            state: QuizState::INITIAL,
            epoch: 0,
            feedback,
        })
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// The question being asked, or `None` once finished.
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            QuizState::InProgress { current_index, .. } => self.questions.get(current_index),
            QuizState::Finished { .. } => None,
        }
    }

    /// Records an answer for the current question.
    ///
    /// Only the first answer to a question counts; later ones and answers
    /// after the end are ignored without touching the state.
    pub fn submit(&mut self, choice_index: usize) -> Result<SubmitOutcome, QuizError> {
        let QuizState::InProgress {
            current_index,
            score,
            selected: None,
        } = self.state
        else {
            return Ok(SubmitOutcome::Ignored);
        };

        let question = &self.questions[current_index];
        if choice_index >= question.options.len() {
            return Err(QuizError::ChoiceOutOfRange {
                choice: choice_index,
                option_count: OPTION_COUNT,
            });
        }

        let correct = question.is_correct(choice_index);
        self.state = QuizState::InProgress {
            current_index,
            score: if correct { score + 1 } else { score },
            selected: Some(choice_index),
        };
        self.epoch += 1;

        self.feedback.emit(if correct {
            SoundEffect::Correct
        } else {
            SoundEffect::Incorrect
        });

        Ok(SubmitOutcome::Answered {
            correct,
            ticket: AdvanceTicket(self.epoch),
        })
    }

    /// Moves past an answered question. Returns whether anything changed.
    ///
    /// A stale ticket (the run was restarted or moved on since) is a no-op.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> bool {
        if ticket.0 != self.epoch {
            return false;
        }
        let QuizState::InProgress {
            current_index,
            score,
            selected: Some(_),
        } = self.state
        else {
            return false;
        };

        self.epoch += 1;
        if current_index + 1 < self.questions.len() {
            self.state = QuizState::InProgress {
                current_index: current_index + 1,
                score,
                selected: None,
            };
        } else {
            self.state = QuizState::Finished { score };
            self.feedback.emit(SoundEffect::End);
        }
        true
    }

    /// Back to the first question with a zero score, from any state.
    pub fn restart(&mut self) {
        self.state = QuizState::INITIAL;
        self.epoch += 1;
        self.feedback.emit(SoundEffect::Start);
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let total = self.total();
        match self.state {
            QuizState::InProgress {
                current_index,
                score,
                selected,
            } => QuizSnapshot {
                current_index,
                score,
                selected,
                finished: false,
                total,
                verdict: None,
                verdict_message: None,
            },
            QuizState::Finished { score } => {
                let verdict = Verdict::for_score(score, total);
                QuizSnapshot {
                    current_index: total,
                    score,
                    selected: None,
                    finished: true,
                    total,
                    verdict: Some(verdict),
                    verdict_message: Some(verdict.message()),
                }
            }
        }
    }
}

impl std::fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizEngine")
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("total", &self.questions.len())
            .finish()
    }
}
