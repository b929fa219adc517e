//! Error types for zap-ui.

use thiserror::Error;

use crate::api::types::{ElementId, NodeId};

/// Everything a public zap-ui operation can report.
#[derive(Error, Debug)]
pub enum UiError {
    /// Viewport aspect ratio must be finite and positive.
    #[error("invalid aspect ratio: {0} (must be > 0)")]
    InvalidAspect(f32),

    /// Calibrated vertical half-extent must be finite and positive.
    #[error("invalid vertical half-height: {0} (must be > 0)")]
    InvalidHalfHeight(f32),

    /// Tween duration in frames.
    #[error("invalid frame duration: {0} (must be >= 1)")]
    InvalidFrameDuration(u32),

    /// Target frame rate used by the frame clock.
    #[error("invalid target frame rate: {0} (must be >= 1)")]
    InvalidFrameRate(u32),

    /// Handle refers to a node that was destroyed or never existed.
    #[error("scene node not found: {0}")]
    NodeNotFound(NodeId),

    /// Handle refers to an element that was despawned or never existed.
    #[error("ui element not found: {0}")]
    ElementNotFound(ElementId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    AttachCycle { child: NodeId, parent: NodeId },

    /// Malformed JSON configuration.
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for zap-ui operations
pub type Result<T> = std::result::Result<T, UiError>;
