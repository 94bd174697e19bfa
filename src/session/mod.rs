// src/session/mod.rs

pub mod clock;
pub mod controller;
pub mod gate;
pub mod monitor;
pub mod policy;
