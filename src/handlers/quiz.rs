// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz::{AnswerRequest, SessionResponse},
    },
    quiz::{QuizSession, SessionRegistry},
};

/// Lists the trivia questions without their answers.
pub async fn list_questions(
    State(quizzes): State<Arc<SessionRegistry>>,
) -> Result<impl IntoResponse, AppError> {
    let questions: Vec<PublicQuestion> = quizzes
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| PublicQuestion::from_question(index, question))
        .collect();

    Ok(Json(questions))
}

/// Starts a new quiz run at the first question.
pub async fn start_session(
    State(quizzes): State<Arc<SessionRegistry>>,
) -> Result<impl IntoResponse, AppError> {
    let session = quizzes.start()?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from_session(&session)),
    ))
}

/// Current state of a run, plus any signals emitted since the last call
/// (e.g. `end` after the final auto-advance).
pub async fn get_session(
    State(quizzes): State<Arc<SessionRegistry>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&quizzes, &id)?;

    Ok(Json(SessionResponse::from_session(&session)))
}

/// Answers the current question.
///
/// * Only the first answer to a question is scored; repeats are reported as not accepted.
/// * The run moves on by itself after the configured feedback delay.
pub async fn answer(
    State(quizzes): State<Arc<SessionRegistry>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&quizzes, &id)?;
    let outcome = session.submit(req.choice)?;

    Ok(Json(
        SessionResponse::from_session(&session).with_outcome(outcome),
    ))
}

/// Resets a run to the first question, cancelling any pending advance.
pub async fn restart(
    State(quizzes): State<Arc<SessionRegistry>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&quizzes, &id)?;
    session.restart();

    Ok(Json(SessionResponse::from_session(&session)))
}

/// Tears a run down.
pub async fn end_session(
    State(quizzes): State<Arc<SessionRegistry>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !quizzes.end(&id) {
        return Err(AppError::NotFound("Quiz session not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn find_session(quizzes: &SessionRegistry, id: &Uuid) -> Result<Arc<QuizSession>, AppError> {
    quizzes
        .get(id)
        .ok_or(AppError::NotFound("Quiz session not found".to_string()))
}
