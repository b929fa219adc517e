use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use crate::api::types::TweenSlot;
use crate::error::{Result, UiError};
use crate::extensions::bezier::{CubicBezier, EasePreset};

/// Motion paths for named elements, loaded from JSON at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionManifest {
    #[serde(default)]
    pub paths: Vec<MotionPathDescriptor>,
}

/// One tween definition targeting an element by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionPathDescriptor {
    /// Element name as given in its `ElementDesc`.
    pub element: String,
    pub slot: TweenSlot,
    pub target: Vec3,
    /// Pivot reached at the end of the curve (default: centre).
    #[serde(default = "default_pivot")]
    pub target_pivot: Vec2,
    /// Named preset or explicit control points (default: linear).
    #[serde(default)]
    pub curve: CurveDescriptor,
    pub total_frames: u32,
}

/// Either a preset name (`"ease_in"`) or `{ "p0": [x, y], ..., "p3": [x, y] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurveDescriptor {
    Preset(EasePreset),
    Points(CubicBezier),
}

impl Default for CurveDescriptor {
    fn default() -> Self {
        CurveDescriptor::Preset(EasePreset::Linear)
    }
}

impl CurveDescriptor {
    pub fn bezier(&self) -> CubicBezier {
        match *self {
            CurveDescriptor::Preset(preset) => preset.curve(),
            CurveDescriptor::Points(curve) => curve,
        }
    }
}

fn default_pivot() -> Vec2 {
    Vec2::splat(0.5)
}

impl MotionManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("motion manifest: {}", e);
            UiError::Config(e)
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject paths with a zero frame duration.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.paths.iter().find(|p| p.total_frames == 0) {
            log::warn!("motion manifest: {} has zero frame duration", bad.element);
            return Err(UiError::InvalidFrameDuration(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preset_and_defaults() {
        let json = r#"{
            "paths": [
                { "element": "title", "slot": "position", "target": [0.5, 0.1, 0], "total_frames": 60 }
            ]
        }"#;
        let manifest = MotionManifest::from_json(json).unwrap();
        let path = &manifest.paths[0];
        assert_eq!(path.slot, TweenSlot::Position);
        assert_eq!(path.target_pivot, Vec2::splat(0.5));
        assert_eq!(path.curve, CurveDescriptor::Preset(EasePreset::Linear));
    }

    #[test]
    fn parse_explicit_control_points() {
        let json = r#"{
            "paths": [
                {
                    "element": "badge",
                    "slot": "scale",
                    "target": [2, 2, 1],
                    "target_pivot": [0, 0],
                    "curve": { "p0": [0, 0], "p1": [0.3, 1.2], "p2": [0.6, 1.1], "p3": [1, 1] },
                    "total_frames": 20
                }
            ]
        }"#;
        let manifest = MotionManifest::from_json(json).unwrap();
        let curve = manifest.paths[0].curve.bezier();
        assert_eq!(curve.p1, Vec2::new(0.3, 1.2));
        assert_eq!(manifest.paths[0].target_pivot, Vec2::ZERO);
    }

    #[test]
    fn zero_frames_is_rejected() {
        let json = r#"{ "paths": [ { "element": "x", "slot": "rotation", "target": [0, 0, 1], "total_frames": 0 } ] }"#;
        assert!(matches!(MotionManifest::from_json(json), Err(UiError::InvalidFrameDuration(0))));
    }

    #[test]
    fn unknown_slot_is_config_error() {
        let json = r#"{ "paths": [ { "element": "x", "slot": "alpha", "target": [0, 0, 0], "total_frames": 2 } ] }"#;
        assert!(matches!(MotionManifest::from_json(json), Err(UiError::Config(_))));
    }
}
