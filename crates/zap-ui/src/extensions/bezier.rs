// extensions/bezier.rs
//
// Cubic Bezier easing curves and interpolation helpers.
// No dependencies on the scene graph, just math.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Cubic Bezier curve over four 2D control points.
///
/// Used as an easing curve: the y component of the evaluated point is the
/// eased fraction. x only orders the control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::linear()
    }
}

impl CubicBezier {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Curve from (0, 0) to (1, 1) whose inner control points sit at x = 1/3
    /// and x = 2/3 with heights `y1` and `y2`.
    pub fn easing(y1: f32, y2: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(1.0 / 3.0, y1), Vec2::new(2.0 / 3.0, y2), Vec2::ONE)
    }

    /// Control points on the identity line: eased fraction == t.
    pub fn linear() -> Self {
        Self::easing(1.0 / 3.0, 2.0 / 3.0)
    }

    /// Point on the curve at `t`, Bernstein form, per axis.
    #[inline]
    pub fn evaluate(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * t * u * u)
            + self.p2 * (3.0 * t * t * u)
            + self.p3 * (t * t * t)
    }

    /// Eased fraction at `t`.
    #[inline]
    pub fn ease(&self, t: f32) -> f32 {
        self.evaluate(t).y
    }
}

/// Named curves. Only the control-point heights matter for easing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasePreset {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start: t^3.
    EaseIn,
    /// Slow end: 1 - (1 - t)^3.
    EaseOut,
    /// Slow start and end: smoothstep.
    EaseInOut,
}

impl EasePreset {
    pub fn curve(self) -> CubicBezier {
        match self {
            EasePreset::Linear => CubicBezier::linear(),
            EasePreset::EaseIn => CubicBezier::easing(0.0, 0.0),
            EasePreset::EaseOut => CubicBezier::easing(1.0, 1.0),
            EasePreset::EaseInOut => CubicBezier::easing(0.0, 1.0),
        }
    }
}

impl From<EasePreset> for CubicBezier {
    fn from(preset: EasePreset) -> Self {
        preset.curve()
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}
