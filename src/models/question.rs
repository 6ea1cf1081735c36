// src/models/question.rs

use serde::Serialize;

/// Number of answer options every trivia question carries.
pub const OPTION_COUNT: usize = 4;

/// A static trivia question, compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// The text of the question.
    pub prompt: &'static str,

    /// Candidate answers, shown in this order.
    pub options: [&'static str; OPTION_COUNT],

    /// Index into `options` of the correct answer.
    pub correct_index: usize,
}

impl Question {
    /// Builds a question, rejecting an out-of-range answer index.
    /// Used in `const` context, so a bad bank entry fails the build.
    pub const fn new(
        prompt: &'static str,
        options: [&'static str; OPTION_COUNT],
        correct_index: usize,
    ) -> Self {
        assert!(correct_index < OPTION_COUNT, "correct_index out of range");
        Self {
            prompt,
            options,
            correct_index,
        }
    }

    pub fn is_correct(&self, choice_index: usize) -> bool {
        choice_index == self.correct_index
    }
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub index: usize,
    pub prompt: &'static str,
    pub options: [&'static str; OPTION_COUNT],
}

impl PublicQuestion {
    pub fn from_question(index: usize, question: &Question) -> Self {
        Self {
            index,
            prompt: question.prompt,
            options: question.options,
        }
    }
}
