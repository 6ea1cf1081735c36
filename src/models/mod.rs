// src/models/mod.rs

pub mod persona;
pub mod question;
pub mod quiz;
pub mod shout_out;
