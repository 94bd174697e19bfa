// src/environment.rs

use async_trait::async_trait;

use crate::error::AppError;

/// Normalized environment signals the embedder feeds into the controller.
///
/// These replace direct document/window listeners so the session core can be
/// driven (and tested) without a real display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentSignal {
    /// The exam document became non-visible.
    VisibilityHidden,
    /// The application window lost input focus.
    FocusLost,
    /// Fullscreen presentation state changed.
    FullscreenChanged { active: bool },
}

/// Injected fullscreen capability. Acquired when the exam starts and
/// released on termination, on every exit path.
#[async_trait]
pub trait FullscreenControl: Send + Sync {
    async fn request(&self) -> Result<(), AppError>;
    async fn exit(&self) -> Result<(), AppError>;
}

/// Fullscreen control for headless embedders; every call succeeds.
#[derive(Debug, Default)]
pub struct HeadlessFullscreen;

#[async_trait]
impl FullscreenControl for HeadlessFullscreen {
    async fn request(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn exit(&self) -> Result<(), AppError> {
        Ok(())
    }
}
