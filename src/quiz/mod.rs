// src/quiz/mod.rs

pub mod bank;
pub mod engine;
pub mod session;

pub use bank::TRIVIA_QUESTIONS;
pub use engine::{AdvanceTicket, QuizEngine, QuizError, QuizSnapshot, QuizState, SubmitOutcome, Verdict};
pub use session::{QuizSession, SessionRegistry};
