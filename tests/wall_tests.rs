// tests/wall_tests.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use fanportal::models::shout_out::ShoutOut;
use fanportal::wall::{
    Confirmation, DocumentStorage, MemoryStorage, SqliteStorage, StorageError, WALL_KEY,
    WallError, WallStore,
};
use sqlx::sqlite::SqlitePoolOptions;

/// Memory storage whose writes can be switched to fail.
#[derive(Default)]
struct FailingStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FailingStorage {
    fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStorage for FailingStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, document: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.save(key, document).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(key).await
    }
}

async fn memory_wall() -> (WallStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let wall = WallStore::open(storage.clone()).await.unwrap();
    (wall, storage)
}

async fn sqlite_storage() -> Arc<SqliteStorage> {
    // A single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    Arc::new(SqliteStorage::new(pool).await.expect("Failed to migrate"))
}

#[tokio::test]
async fn append_to_empty_wall() {
    let (wall, _) = memory_wall().await;

    let created = wall.append("Rocker", "Rock on!").await.unwrap();

    let entries = wall.list().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], created);
    assert_eq!(created.author, "Rocker");
    assert_eq!(created.text, "Rock on!");
    assert!(!created.id.is_empty());
    assert!(!created.created_at.is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let (wall, _) = memory_wall().await;

    for i in 0..5 {
        wall.append(&format!("Fan {}", i), &format!("Message {}", i))
            .await
            .unwrap();
    }

    let entries = wall.list().await;
    let authors: Vec<&str> = entries.iter().map(|s| s.author.as_str()).collect();
    assert_eq!(authors, vec!["Fan 4", "Fan 3", "Fan 2", "Fan 1", "Fan 0"]);
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
    let (wall, _) = memory_wall().await;

    let mut ids = Vec::new();
    for _ in 0..20 {
        let s = wall.append("Speedy", "Same millisecond?").await.unwrap();
        ids.push(s.id.parse::<i64>().unwrap());
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn values_are_trimmed() {
    let (wall, _) = memory_wall().await;

    let created = wall.append("  Rocker  ", "\tRock on!\n").await.unwrap();

    assert_eq!(created.author, "Rocker");
    assert_eq!(created.text, "Rock on!");
}

#[tokio::test]
async fn blank_author_or_text_is_rejected() {
    let (wall, storage) = memory_wall().await;
    wall.append("Rocker", "Rock on!").await.unwrap();
    let before = wall.list().await;

    for (author, text) in [("", "hello"), ("   ", "hello"), ("Rocker", ""), ("Rocker", " \n ")] {
        let err = wall.append(author, text).await.unwrap_err();
        assert!(matches!(err, WallError::Empty { .. }), "{:?}", err);
    }

    assert_eq!(wall.list().await, before);
    let persisted: Vec<ShoutOut> = serde_json::from_str(&storage.get(WALL_KEY).unwrap()).unwrap();
    assert_eq!(persisted, before);
}

#[tokio::test]
async fn over_long_values_are_rejected_not_truncated() {
    let (wall, _) = memory_wall().await;

    let err = wall.append(&"a".repeat(31), "hi").await.unwrap_err();
    assert!(matches!(err, WallError::TooLong { field: "author", max: 30 }));

    let err = wall.append("Rocker", &"b".repeat(101)).await.unwrap_err();
    assert!(matches!(err, WallError::TooLong { field: "text", max: 100 }));

    assert!(wall.is_empty().await);

    // Limits count characters, not bytes.
    let created = wall.append(&"ö".repeat(30), &"å".repeat(100)).await.unwrap();
    assert_eq!(created.author.chars().count(), 30);
}

#[tokio::test]
async fn clear_requires_confirmation() {
    let (wall, storage) = memory_wall().await;
    wall.append("Rocker", "Rock on!").await.unwrap();

    assert!(!wall.clear(Confirmation::Declined).await.unwrap());
    assert_eq!(wall.len().await, 1);
    assert!(storage.get(WALL_KEY).is_some());

    assert!(wall.clear(Confirmation::Confirmed).await.unwrap());
    assert!(wall.list().await.is_empty());
    assert!(storage.get(WALL_KEY).is_none());
}

#[tokio::test]
async fn append_persists_before_returning() {
    let (wall, storage) = memory_wall().await;

    let created = wall.append("Rocker", "Rock on!").await.unwrap();

    let persisted: Vec<ShoutOut> = serde_json::from_str(&storage.get(WALL_KEY).unwrap()).unwrap();
    assert_eq!(persisted, vec![created]);
}

#[tokio::test]
async fn failed_append_leaves_wall_unchanged() {
    let storage = Arc::new(FailingStorage::default());
    let wall = WallStore::open(storage.clone()).await.unwrap();
    wall.append("Rocker", "Rock on!").await.unwrap();
    let before = wall.list().await;

    storage.fail_writes();
    let err = wall.append("Roadie", "Lost in the mail").await.unwrap_err();

    assert!(matches!(err, WallError::Storage(_)), "{:?}", err);
    assert_eq!(wall.list().await, before);
    let persisted: Vec<ShoutOut> =
        serde_json::from_str(&storage.inner.get(WALL_KEY).unwrap()).unwrap();
    assert_eq!(persisted, before);
}

#[tokio::test]
async fn failed_clear_leaves_wall_unchanged() {
    let storage = Arc::new(FailingStorage::default());
    let wall = WallStore::open(storage.clone()).await.unwrap();
    wall.append("Rocker", "Rock on!").await.unwrap();
    wall.append("Roadie", "Kids in a Ghost Town!").await.unwrap();
    let before = wall.list().await;

    storage.fail_writes();
    let err = wall.clear(Confirmation::Confirmed).await.unwrap_err();

    assert!(matches!(err, WallError::Storage(_)), "{:?}", err);
    assert_eq!(wall.list().await, before);
    assert!(storage.inner.get(WALL_KEY).is_some());
}

#[tokio::test]
async fn reload_preserves_entries_and_order() {
    let storage = Arc::new(MemoryStorage::new());
    let wall = WallStore::open(storage.clone()).await.unwrap();
    wall.append("One", "first").await.unwrap();
    wall.append("Two", "second").await.unwrap();
    wall.append("Three", "third").await.unwrap();
    let before = wall.list().await;
    drop(wall);

    let reopened = WallStore::open(storage).await.unwrap();

    assert_eq!(reopened.list().await, before);

    // New ids keep increasing past the reloaded ones.
    let next = reopened.append("Four", "fourth").await.unwrap();
    let newest_before: i64 = before[0].id.parse().unwrap();
    assert!(next.id.parse::<i64>().unwrap() > newest_before);
}

#[tokio::test]
async fn malformed_document_degrades_to_empty_wall() {
    let storage = Arc::new(MemoryStorage::with_document(WALL_KEY, "{not json"));

    let wall = WallStore::open(storage.clone()).await.unwrap();
    assert!(wall.list().await.is_empty());

    // The wall keeps working and overwrites the bad document.
    wall.append("Rocker", "Rock on!").await.unwrap();
    let persisted: Vec<ShoutOut> = serde_json::from_str(&storage.get(WALL_KEY).unwrap()).unwrap();
    assert_eq!(persisted.len(), 1);
}

#[tokio::test]
async fn wrong_shape_document_degrades_to_empty_wall() {
    let storage = Arc::new(MemoryStorage::with_document(WALL_KEY, r#"{"id": "1"}"#));

    let wall = WallStore::open(storage).await.unwrap();

    assert!(wall.list().await.is_empty());
}

#[tokio::test]
async fn legacy_browser_document_is_readable() {
    let legacy = r#"[
        {"id": "1735000000000", "name": "Gamla Fansen", "message": "Falköping 4-ever", "timestamp": "24 dec. 2024 10:00"}
    ]"#;
    let storage = Arc::new(MemoryStorage::with_document(WALL_KEY, legacy));

    let wall = WallStore::open(storage).await.unwrap();

    let entries = wall.list().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].author, "Gamla Fansen");
    assert_eq!(entries[0].text, "Falköping 4-ever");
    assert_eq!(entries[0].created_at, "24 dec. 2024 10:00");
}

#[tokio::test]
async fn sqlite_storage_round_trip() {
    let storage = sqlite_storage().await;

    assert_eq!(storage.load("missing").await.unwrap(), None);

    storage.save("doc", "[1]").await.unwrap();
    storage.save("doc", "[1,2]").await.unwrap();
    assert_eq!(storage.load("doc").await.unwrap().as_deref(), Some("[1,2]"));

    storage.remove("doc").await.unwrap();
    assert_eq!(storage.load("doc").await.unwrap(), None);
}

#[tokio::test]
async fn wall_survives_reopen_on_sqlite() {
    let storage = sqlite_storage().await;

    let wall = WallStore::open(storage.clone()).await.unwrap();
    wall.append("Rocker", "Rock on!").await.unwrap();
    wall.append("Roadie", "Kids in a Ghost Town!").await.unwrap();
    let before = wall.list().await;

    let reopened = WallStore::open(storage.clone()).await.unwrap();
    assert_eq!(reopened.list().await, before);

    assert!(reopened.clear(Confirmation::Confirmed).await.unwrap());
    let after_clear = WallStore::open(storage).await.unwrap();
    assert!(after_clear.list().await.is_empty());
}
