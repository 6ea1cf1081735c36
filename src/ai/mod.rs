// src/ai/mod.rs

pub mod extract;
pub mod gemini;

use async_trait::async_trait;

use crate::models::persona::{AlbumArt, Persona};

pub use extract::extract_json;
pub use gemini::GeminiClient;

/// Failures of the generative-AI collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty reply")]
    EmptyReply,

    #[error("could not parse reply: {0}")]
    Parse(String),

    #[error("no image in reply")]
    NoImage,

    #[error("invalid image payload: {0}")]
    InvalidImage(#[from] base64::DecodeError),
}

impl AiError {
    /// Localized message safe to show the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AiError::EmptyReply => "AI:n svarade med tom text.",
            AiError::Parse(_) => "Kunde inte tolka datan från AI:n.",
            AiError::NoImage | AiError::InvalidImage(_) => "Ingen bild genererades.",
            AiError::MissingApiKey | AiError::Http(_) | AiError::Status { .. } => {
                "Strömavbrott i Falköping! AI:n kunde inte svara. Försök igen."
            }
        }
    }
}

/// The three generative features of the portal.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    async fn generate_persona(&self, name: &str, favorite_food: &str) -> Result<Persona, AiError>;

    async fn rewrite_as_ballad(&self, input: &str) -> Result<String, AiError>;

    async fn generate_album_art(&self, title: &str) -> Result<AlbumArt, AiError>;
}
