// src/models/shout_out.rs

use serde::{Deserialize, Serialize};

use crate::utils::sound::SoundEffect;

/// Maximum length of a display name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 30;

/// Maximum length of a message body, in characters.
pub const MAX_TEXT_CHARS: usize = 100;

/// One fan-wall message.
///
/// Entries are immutable once created. The aliases accept wall documents
/// written by the browser-only version of the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoutOut {
    pub id: String,

    #[serde(alias = "name")]
    pub author: String,

    #[serde(alias = "message")]
    pub text: String,

    /// Localized creation time, captured once.
    #[serde(alias = "timestamp")]
    pub created_at: String,
}

/// DTO for posting a new shout-out.
/// Trimming and length checks happen in the store.
#[derive(Debug, Deserialize)]
pub struct CreateShoutOutRequest {
    pub author: String,
    pub text: String,
}

/// Query parameters for clearing the wall.
#[derive(Debug, Default, Deserialize)]
pub struct ClearWallParams {
    #[serde(default)]
    pub confirm: bool,
}

/// A freshly posted shout-out, with the sounds to play for it.
#[derive(Debug, Serialize)]
pub struct CreatedShoutOut {
    #[serde(flatten)]
    pub shout_out: ShoutOut,
    pub signals: Vec<SoundEffect>,
}

#[derive(Debug, Serialize)]
pub struct ClearedWall {
    pub cleared: bool,
    pub signals: Vec<SoundEffect>,
}
