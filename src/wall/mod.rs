// src/wall/mod.rs

pub mod storage;
pub mod store;

pub use storage::{DocumentStorage, MemoryStorage, SqliteStorage, StorageError};
pub use store::{Confirmation, WALL_KEY, WallError, WallStore};
