// src/ai/gemini.rs

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    ai::{AiError, GenerativeService, extract_json},
    config::Config,
    models::persona::{AlbumArt, Persona},
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        if config.gemini_api_key.is_none() {
            tracing::warn!(
                "No GEMINI_API_KEY configured; persona, ballad and album art requests will fail"
            );
        }

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.gemini_api_key.clone(),
            text_model: config.gemini_text_model.clone(),
            image_model: config.gemini_image_model.clone(),
        }
    }

    /// Points the client at another endpoint, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(&self, model: &str, body: Value) -> Result<GenerateResponse, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        tracing::debug!("Calling {} via {}", model, self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Model {} returned {}: {}", model, status, body);
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateResponse>().await?)
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate_persona(&self, name: &str, favorite_food: &str) -> Result<Persona, AiError> {
        let prompt = format!(
            "Generate a fun 80s hard rock stage name and persona for someone named \"{}\" who likes \"{}\". \
             Return ONLY a JSON object with stageName, role, instrument, and backstory. Style: Nestor band vibe.",
            name, favorite_food
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "stageName": { "type": "STRING" },
                        "role": { "type": "STRING" },
                        "instrument": { "type": "STRING" },
                        "backstory": { "type": "STRING" }
                    },
                    "required": ["stageName", "role", "instrument", "backstory"]
                }
            }
        });

        let response = self.generate(&self.text_model, body).await?;
        extract_json(&response.text())
    }

    async fn rewrite_as_ballad(&self, input: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Rewrite the following as a dramatic 80s power ballad in the style of Nestor: \"{}\". Include [Verse] and [Chorus].",
            input
        );

        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let lyrics = self.generate(&self.text_model, body).await?.text();
        if lyrics.trim().is_empty() {
            return Err(AiError::EmptyReply);
        }
        Ok(lyrics)
    }

    async fn generate_album_art(&self, title: &str) -> Result<AlbumArt, AiError> {
        let prompt = format!(
            "An 80s melodic hard rock album cover for a band called NESTOR. The album title is \"{}\". \
             Neon pink and cyan color palette, grid background, chrome lettering.",
            title
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": "1:1" }
            }
        });

        let response = self.generate(&self.image_model, body).await?;
        let image = response.first_image().ok_or(AiError::NoImage)?;

        // Reject payloads the browser could not decode.
        STANDARD.decode(&image.data)?;

        let mime_type = image
            .mime_type
            .clone()
            .unwrap_or_else(|| "image/png".to_string());

        Ok(AlbumArt {
            data_url: format!("data:{};base64,{}", mime_type, image.data),
            mime_type,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    fn first_image(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}
