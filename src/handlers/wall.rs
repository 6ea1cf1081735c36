// src/handlers/wall.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::shout_out::{ClearWallParams, ClearedWall, CreateShoutOutRequest, CreatedShoutOut},
    utils::sound::{GENERATION_SUCCEEDED, SoundEffect},
    wall::{Confirmation, WallStore},
};

/// List shout-outs (most recently posted first).
pub async fn list_shout_outs(
    State(wall): State<Arc<WallStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(wall.list().await))
}

/// Post a new shout-out.
/// Author (max 30 chars) and text (max 100 chars) are trimmed and must not be empty.
pub async fn create_shout_out(
    State(wall): State<Arc<WallStore>>,
    Json(payload): Json<CreateShoutOutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let shout_out = wall.append(&payload.author, &payload.text).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedShoutOut {
            shout_out,
            signals: GENERATION_SUCCEEDED.to_vec(),
        }),
    ))
}

/// Clear the whole wall.
/// Requires `?confirm=true`; anything else leaves the wall untouched.
pub async fn clear_wall(
    State(wall): State<Arc<WallStore>>,
    Query(params): Query<ClearWallParams>,
) -> Result<impl IntoResponse, AppError> {
    if !wall.clear(Confirmation::from(params.confirm)).await? {
        return Err(AppError::BadRequest(
            "Confirmation required to clear the wall".to_string(),
        ));
    }

    Ok(Json(ClearedWall {
        cleared: true,
        signals: vec![SoundEffect::Incorrect],
    }))
}
