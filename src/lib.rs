// src/lib.rs

pub mod api;
pub mod config;
pub mod environment;
pub mod error;
pub mod models;
pub mod session;

// Re-export specific items for convenience if needed
pub use api::{HttpScoringApi, ScoringApi};
pub use error::AppError;
pub use session::controller::{ProctoredSessionController, SessionUpdate};
