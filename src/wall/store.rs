// src/wall/store.rs

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::{
    models::shout_out::{MAX_AUTHOR_CHARS, MAX_TEXT_CHARS, ShoutOut},
    utils::locale::format_sv_timestamp,
    wall::storage::{DocumentStorage, StorageError},
};

/// Key the wall document is stored under.
pub const WALL_KEY: &str = "nestor_fan_wall";

#[derive(Debug, thiserror::Error)]
pub enum WallError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("failed to encode wall document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Explicit yes/no answer required before the wall may be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// The fan wall: newest first, persisted as one JSON document.
///
/// Each write serializes the complete collection and stores it before the
/// in-memory copy is replaced, all under one lock.
pub struct WallStore {
    storage: Arc<dyn DocumentStorage>,
    entries: Mutex<WallEntries>,
}

#[derive(Debug, Default)]
struct WallEntries {
    items: Vec<ShoutOut>,
    last_id: i64,
}

impl WallStore {
    /// Loads the persisted wall.
    ///
    /// A document that does not parse is logged and replaced by an empty wall.
    /// Storage failures are returned.
    pub async fn open(storage: Arc<dyn DocumentStorage>) -> Result<Self, WallError> {
        let items = match storage.load(WALL_KEY).await? {
            Some(document) => match serde_json::from_str::<Vec<ShoutOut>>(&document) {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Failed to parse fan wall messages, starting empty: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let last_id = items
            .iter()
            .filter_map(|s| s.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        tracing::info!("Fan wall loaded with {} messages", items.len());

        Ok(Self {
            storage,
            entries: Mutex::new(WallEntries { items, last_id }),
        })
    }

    /// Snapshot of the wall, most recently added first.
    pub async fn list(&self) -> Vec<ShoutOut> {
        self.entries.lock().await.items.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Adds a message to the top of the wall and persists the wall.
    ///
    /// Both values are trimmed; empty or over-long values are rejected,
    /// never truncated.
    pub async fn append(&self, author: &str, text: &str) -> Result<ShoutOut, WallError> {
        let author = validate_field("author", author, MAX_AUTHOR_CHARS)?;
        let text = validate_field("text", text, MAX_TEXT_CHARS)?;

        let mut entries = self.entries.lock().await;

        let now = Local::now();
        // Millisecond ids, bumped when two posts land in the same millisecond.
        let id = now.timestamp_millis().max(entries.last_id + 1);

        let shout_out = ShoutOut {
            id: id.to_string(),
            author: author.to_string(),
            text: text.to_string(),
            created_at: format_sv_timestamp(&now),
        };

        let mut updated = Vec::with_capacity(entries.items.len() + 1);
        updated.push(shout_out.clone());
        updated.extend(entries.items.iter().cloned());

        let document = serde_json::to_string(&updated)?;
        self.storage.save(WALL_KEY, &document).await?;

        entries.items = updated;
        entries.last_id = id;

        tracing::info!("New shout-out {} from {}", shout_out.id, shout_out.author);
        Ok(shout_out)
    }

    /// Empties the wall. Does nothing unless confirmed.
    /// Returns whether the wall was cleared.
    pub async fn clear(&self, confirmation: Confirmation) -> Result<bool, WallError> {
        if confirmation != Confirmation::Confirmed {
            tracing::debug!("Fan wall clear declined");
            return Ok(false);
        }

        let mut entries = self.entries.lock().await;
        self.storage.remove(WALL_KEY).await?;
        let removed = entries.items.len();
        entries.items.clear();

        tracing::warn!("Fan wall cleared ({} messages removed)", removed);
        Ok(true)
    }
}

impl std::fmt::Debug for WallStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallStore").finish_non_exhaustive()
    }
}

fn validate_field<'a>(field: &'static str, value: &'a str, max: usize) -> Result<&'a str, WallError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WallError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(WallError::TooLong { field, max });
    }
    Ok(trimmed)
}
