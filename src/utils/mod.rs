// src/utils/mod.rs

pub mod inflight;
pub mod locale;
pub mod share;
pub mod sound;
