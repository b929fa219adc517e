// extensions/mod.rs
//
// Transform and tween layers on top of the core scene graph.
// Elements opt in by owning a TransformController and a TweenEngine.

pub mod bezier;
pub mod transform;
pub mod tween;

pub use bezier::{CubicBezier, EasePreset, lerp, lerp_vec2, lerp_vec3};
pub use transform::{TransformController, TransformState, orientation};
pub use tween::{TweenEngine, TweenKeyframe};
