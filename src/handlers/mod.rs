// src/handlers/mod.rs

pub mod ai;
pub mod feedback;
pub mod quiz;
pub mod wall;
