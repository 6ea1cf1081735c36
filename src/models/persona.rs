// src/models/persona.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::{share::SharePayload, sound::SoundEffect};

/// An AI-generated rock persona.
/// Field names match the JSON schema requested from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub stage_name: String,
    pub role: String,
    pub instrument: String,
    pub backstory: String,
}

/// A generated album cover as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumArt {
    pub mime_type: String,
    pub data_url: String,
}

/// DTO for requesting a persona.
#[derive(Debug, Deserialize, Validate)]
pub struct PersonaRequest {
    #[validate(length(min = 1, max = 60, message = "Name must be between 1 and 60 chars"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 60,
        message = "Favorite food must be between 1 and 60 chars"
    ))]
    pub favorite_food: String,
}

/// DTO for rewriting text as a power ballad.
#[derive(Debug, Deserialize, Validate)]
pub struct BalladRequest {
    #[validate(length(min = 1, max = 2000, message = "Input must be between 1 and 2000 chars"))]
    pub input: String,
}

/// DTO for generating album art.
#[derive(Debug, Deserialize, Validate)]
pub struct AlbumArtRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 chars"))]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct PersonaResponse {
    pub persona: Persona,
    pub share: SharePayload,
    pub signals: Vec<SoundEffect>,
}

#[derive(Debug, Serialize)]
pub struct BalladResponse {
    pub lyrics: String,
    pub signals: Vec<SoundEffect>,
}

#[derive(Debug, Serialize)]
pub struct AlbumArtResponse {
    pub image: AlbumArt,
    pub share: SharePayload,
    pub signals: Vec<SoundEffect>,
}
