pub mod api;
pub mod core;
pub mod components;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::UiConfig;
pub use api::context::UiContext;
pub use api::element::{ElementDesc, UiElement};
pub use api::types::{ElementId, NodeId, TweenSlot};
pub use assets::manifest::{CurveDescriptor, MotionManifest, MotionPathDescriptor};
pub use components::quad::{QuadMesh, QuadVertex};
pub use crate::core::coords::{pivot_offset, pivot_rect, viewport_to_world, CoordinateMapper, PivotRect};
pub use crate::core::scene::{LocalTransform, SceneGraph, SceneNode};
pub use crate::core::time::FrameClock;
pub use error::{Result, UiError};

pub use extensions::{
    CubicBezier, EasePreset, lerp, lerp_vec2, lerp_vec3,
    TransformController, TransformState, orientation,
    TweenEngine, TweenKeyframe,
};
