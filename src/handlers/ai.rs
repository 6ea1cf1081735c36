// src/handlers/ai.rs

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::persona::{
        AlbumArtRequest, AlbumArtResponse, BalladRequest, BalladResponse, PersonaRequest,
        PersonaResponse,
    },
    state::AppState,
    utils::{
        inflight::InFlightGuard,
        share::{album_share, persona_share},
        sound::GENERATION_SUCCEEDED,
    },
};

/// Header the front-end sends to identify one browser tab.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Generate a rock persona from a name and a favorite food.
pub async fn generate_persona(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PersonaRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let name = required(&payload.name, "Name")?;
    let food = required(&payload.favorite_food, "Favorite food")?;

    let _guard = claim(&state, &headers, "persona")?;

    let persona = state.ai.generate_persona(name, food).await?;
    tracing::info!("Generated persona {}", persona.stage_name);

    let share = persona_share(&persona.stage_name, &state.config.public_url);
    Ok(Json(PersonaResponse {
        persona,
        share,
        signals: GENERATION_SUCCEEDED.to_vec(),
    }))
}

/// Rewrite everyday text as an 80s power ballad.
pub async fn rewrite_ballad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BalladRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let input = required(&payload.input, "Input")?;

    let _guard = claim(&state, &headers, "ballad")?;

    let lyrics = state.ai.rewrite_as_ballad(input).await?;
    Ok(Json(BalladResponse {
        lyrics,
        signals: GENERATION_SUCCEEDED.to_vec(),
    }))
}

/// Generate a square album cover for the given title.
pub async fn generate_album_art(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AlbumArtRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let title = required(&payload.title, "Title")?;

    let _guard = claim(&state, &headers, "album-art")?;

    let image = state.ai.generate_album_art(title).await?;
    let share = album_share(title, &state.config.public_url);
    Ok(Json(AlbumArtResponse {
        image,
        share,
        signals: GENERATION_SUCCEEDED.to_vec(),
    }))
}

/// Refuses a second call while the same client's previous one is running.
fn claim(state: &AppState, headers: &HeaderMap, operation: &str) -> Result<InFlightGuard, AppError> {
    let client = headers
        .get(CLIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("anonymous");

    state.inflight.try_acquire(client, operation).ok_or_else(|| {
        tracing::warn!("Duplicate {} request from client {}", operation, client);
        AppError::Conflict("A request is already in progress".to_string())
    })
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}
