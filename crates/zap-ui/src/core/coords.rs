// core/coords.rs
//
// Viewport → world mapping and pivot rectangles.
// Viewport space: origin top-left, x right, y down, both in [0, 1].
// World space: origin at the viewport centre, x right, y up.

use glam::{Vec2, Vec3};
use crate::api::config::UiConfig;
use crate::error::{Result, UiError};

/// Element rectangle relative to its pivot, in world units.
/// `top > bottom` (world y points up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PivotRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Centre of the rectangle relative to the pivot.
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Corners in quad order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right, self.top),
            Vec2::new(self.right, self.bottom),
            Vec2::new(self.left, self.bottom),
        ]
    }
}

/// Rectangle of a `full_width` × `full_height` element anchored at `pivot`.
/// The pivot point sits at the origin; (0, 0) pivots on the top-left corner.
#[inline]
pub fn pivot_rect(pivot: Vec2, full_width: f32, full_height: f32) -> PivotRect {
    let left = -pivot.x * full_width;
    let top = pivot.y * full_height;
    PivotRect {
        left,
        right: left + full_width,
        top,
        bottom: top - full_height,
    }
}

/// Offset of the pivot from the rectangle centre, in the element's local frame.
#[inline]
pub fn pivot_offset(pivot: Vec2, size: Vec2) -> Vec3 {
    Vec3::new((pivot.x - 0.5) * size.x, (0.5 - pivot.y) * size.y, 0.0)
}

/// Map a normalized viewport point to world space.
///
/// Fails on a non-positive aspect or half height instead of clamping them.
pub fn viewport_to_world(
    norm_x: f32,
    norm_y: f32,
    depth_z: f32,
    v_half_height: f32,
    aspect: f32,
    depth_scale: f32,
) -> Result<Vec3> {
    check_projection(v_half_height, aspect)?;
    Ok(Vec3::new(
        (norm_x - 0.5) * v_half_height * aspect * 2.0,
        -(norm_y - 0.5) * v_half_height * 2.0,
        depth_z * depth_scale,
    ))
}

fn check_projection(v_half_height: f32, aspect: f32) -> Result<()> {
    if !(aspect.is_finite() && aspect > 0.0) {
        log::warn!("rejected viewport aspect {}", aspect);
        return Err(UiError::InvalidAspect(aspect));
    }
    if !(v_half_height.is_finite() && v_half_height > 0.0) {
        log::warn!("rejected viewport half height {}", v_half_height);
        return Err(UiError::InvalidHalfHeight(v_half_height));
    }
    Ok(())
}

/// Validated mapping constants, copied into every controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    v_half_height: f32,
    aspect: f32,
    depth_scale: f32,
}

impl CoordinateMapper {
    pub fn new(v_half_height: f32, aspect: f32, depth_scale: f32) -> Result<Self> {
        check_projection(v_half_height, aspect)?;
        Ok(Self { v_half_height, aspect, depth_scale })
    }

    pub fn from_config(config: &UiConfig) -> Result<Self> {
        Self::new(config.v_half_height, config.aspect, config.depth_scale)
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn v_half_height(&self) -> f32 {
        self.v_half_height
    }

    /// World position of a normalized viewport point.
    pub fn to_world(&self, norm: Vec3) -> Vec3 {
        // Aspect was validated at construction.
        Vec3::new(
            (norm.x - 0.5) * self.half_width() * 2.0,
            -(norm.y - 0.5) * self.v_half_height * 2.0,
            norm.z * self.depth_scale,
        )
    }

    /// World width/height of a size given in normalized viewport units.
    pub fn viewport_extent(&self, size: Vec2) -> Vec2 {
        Vec2::new(size.x * self.half_width() * 2.0, size.y * self.v_half_height * 2.0)
    }

    fn half_width(&self) -> f32 {
        self.v_half_height * self.aspect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 5.0;
    const A: f32 = 16.0 / 9.0;

    #[test]
    fn viewport_center_is_world_origin() {
        let w = viewport_to_world(0.5, 0.5, 0.0, H, A, 1.0).unwrap();
        assert!(w.length() < 1e-6, "got {:?}", w);
    }

    #[test]
    fn corners_are_symmetric() {
        let tl = viewport_to_world(0.0, 0.0, 0.0, H, A, 1.0).unwrap();
        let br = viewport_to_world(1.0, 1.0, 0.0, H, A, 1.0).unwrap();
        assert!((tl.x + H * A).abs() < 1e-5);
        assert!((tl.y - H).abs() < 1e-5);
        assert!((tl + br).length() < 1e-5);
    }

    #[test]
    fn depth_is_scaled() {
        let w = viewport_to_world(0.5, 0.5, 2.0, H, A, -0.5).unwrap();
        assert!((w.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_positive_aspect_is_an_error() {
        assert!(matches!(
            viewport_to_world(0.5, 0.5, 0.0, H, 0.0, 1.0),
            Err(UiError::InvalidAspect(_))
        ));
        assert!(matches!(CoordinateMapper::new(H, -1.0, 1.0), Err(UiError::InvalidAspect(_))));
        assert!(matches!(CoordinateMapper::new(0.0, A, 1.0), Err(UiError::InvalidHalfHeight(_))));
    }

    #[test]
    fn non_positive_half_height_is_an_error() {
        assert!(matches!(
            viewport_to_world(0.5, 0.5, 0.0, 0.0, A, 1.0),
            Err(UiError::InvalidHalfHeight(_))
        ));
        assert!(matches!(
            viewport_to_world(0.5, 0.5, 0.0, f32::NAN, A, 1.0),
            Err(UiError::InvalidHalfHeight(_))
        ));
    }

    #[test]
    fn mapper_matches_free_function() {
        let mapper = CoordinateMapper::new(H, A, 1.0).unwrap();
        let expected = viewport_to_world(0.2, 0.7, 1.0, H, A, 1.0).unwrap();
        assert!((mapper.to_world(Vec3::new(0.2, 0.7, 1.0)) - expected).length() < 1e-6);
    }

    #[test]
    fn full_viewport_extent() {
        let mapper = CoordinateMapper::new(H, A, 1.0).unwrap();
        let size = mapper.viewport_extent(Vec2::ONE);
        assert!((size.x - 2.0 * H * A).abs() < 1e-5);
        assert!((size.y - 2.0 * H).abs() < 1e-5);
    }

    #[test]
    fn pivot_rect_top_left() {
        let r = pivot_rect(Vec2::ZERO, 4.0, 2.0);
        assert_eq!(r, PivotRect { left: 0.0, right: 4.0, top: 0.0, bottom: -2.0 });
    }

    #[test]
    fn pivot_rect_centered() {
        let r = pivot_rect(Vec2::splat(0.5), 4.0, 2.0);
        assert_eq!(r.center(), Vec2::ZERO);
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 2.0);
    }

    #[test]
    fn pivot_offset_is_negated_rect_center() {
        let pivot = Vec2::new(0.2, 0.9);
        let size = Vec2::new(3.0, 1.5);
        let r = pivot_rect(pivot, size.x, size.y);
        let off = pivot_offset(pivot, size);
        assert!((off.truncate() + r.center()).length() < 1e-6);
    }
}
