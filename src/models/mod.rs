// src/models/mod.rs

pub mod answer;
pub mod quiz_config;
pub mod report;
pub mod session;
pub mod violation;
