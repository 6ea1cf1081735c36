// src/handlers/feedback.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    config::Config,
    error::AppError,
    utils::{
        share::site_share,
        sound::{MASTER_GAIN, SoundEffect, Tone},
    },
};

#[derive(Debug, Serialize)]
pub struct SoundResponse {
    pub effect: SoundEffect,
    pub master_gain: f32,
    pub tones: Vec<Tone>,
}

impl SoundResponse {
    fn for_effect(effect: SoundEffect) -> Self {
        Self {
            effect,
            master_gain: MASTER_GAIN,
            tones: effect.tones(),
        }
    }
}

/// Tone sequences for every feedback sound.
pub async fn list_sounds() -> impl IntoResponse {
    let sounds: Vec<SoundResponse> = SoundEffect::ALL
        .into_iter()
        .map(SoundResponse::for_effect)
        .collect();
    Json(sounds)
}

/// Tone sequence for one feedback sound.
pub async fn get_sound(Path(name): Path<String>) -> Result<impl IntoResponse, AppError> {
    let effect = SoundEffect::parse(&name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown sound effect '{}'", name)))?;

    Ok(Json(SoundResponse::for_effect(effect)))
}

/// Share payload and QR code for the portal.
pub async fn share_site(State(config): State<Config>) -> Result<impl IntoResponse, AppError> {
    let share = site_share(&config.public_url)
        .map_err(|e| AppError::InternalServerError(format!("Invalid share URL: {}", e)))?;

    Ok(Json(share))
}
