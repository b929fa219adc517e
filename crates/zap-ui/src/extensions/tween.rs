// extensions/tween.rs
//
// Frame-driven motion tweens for one TransformController.
// One keyframe slot per property (Position, Scale, Rotation), all sharing a
// single looping phase. Every apply step resets the controller to its
// baseline and re-applies the slots in TweenSlot::APPLY_ORDER.
//
// Usage:
//   let mut tweens = TweenEngine::new(wait_frames);
//   tweens.set_motion_path_bezier(&ctrl, TweenSlot::Position, target, pivot, curve, 60)?;
//   tweens.tick(&mut ctrl, &mut graph)?;  // Once per frame

use glam::{Vec2, Vec3};
use crate::api::types::TweenSlot;
use crate::core::scene::SceneGraph;
use crate::error::{Result, UiError};
use super::bezier::{lerp_vec2, lerp_vec3, CubicBezier};
use super::transform::TransformController;

/// Motion definition for a single property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenKeyframe {
    pub target: Vec3,
    pub target_pivot: Vec2,
    pub curve: CubicBezier,
    /// Property value when the keyframe was defined.
    pub origin: Vec3,
    /// Pivot when the keyframe was defined.
    pub origin_pivot: Vec2,
}

impl TweenKeyframe {
    /// Interpolated value and pivot at phase `t` in [0, 1].
    pub fn sample(&self, t: f32) -> (Vec3, Vec2) {
        let f = self.curve.ease(t);
        (
            lerp_vec3(self.origin, self.target, f),
            lerp_vec2(self.origin_pivot, self.target_pivot, f),
        )
    }
}

/// Per-element tween state machine.
#[derive(Debug, Clone, Default)]
pub struct TweenEngine {
    slots: [Option<TweenKeyframe>; 3],
    /// Apply steps per loop. Values <= 1 disable ticking.
    total_frames: u32,
    /// Ticks between apply steps.
    wait_frames: u32,
    /// Ticks left until the next apply step.
    countdown: u32,
    /// Apply steps taken in the current loop.
    distance: u32,
    /// Phase used by the most recent apply step.
    last_t: Option<f32>,
}

impl TweenEngine {
    pub fn new(wait_frames: u32) -> Self {
        Self {
            wait_frames,
            ..Self::default()
        }
    }

    /// Define (or replace) the motion for `slot`, starting from the
    /// controller's current value and pivot. Restarts the shared phase.
    pub fn set_motion_path_bezier(
        &mut self,
        controller: &TransformController,
        slot: TweenSlot,
        target: Vec3,
        target_pivot: Vec2,
        curve: CubicBezier,
        total_frames: u32,
    ) -> Result<()> {
        if total_frames == 0 {
            log::warn!("{:?} tween rejected: zero frame duration", slot);
            return Err(UiError::InvalidFrameDuration(total_frames));
        }

        let keyframe = TweenKeyframe {
            target,
            target_pivot,
            curve,
            origin: controller.state().value(slot),
            origin_pivot: controller.pivot(),
        };
        log::debug!(
            "{:?} tween: {:?} -> {:?} over {} frames",
            slot, keyframe.origin, target, total_frames
        );

        self.slots[slot.index()] = Some(keyframe);
        self.total_frames = total_frames;
        self.arm();
        Ok(())
    }

    /// Change the loop length. 1 keeps the keyframes but stops ticking.
    pub fn set_total_frames(&mut self, total_frames: u32) -> Result<()> {
        if total_frames == 0 {
            log::warn!("tween loop length rejected: zero frame duration");
            return Err(UiError::InvalidFrameDuration(total_frames));
        }
        self.total_frames = total_frames;
        if self.distance >= total_frames {
            self.distance = 0;
        }
        Ok(())
    }

    /// Change the throttle. Takes effect after the next apply step.
    pub fn set_wait_frames(&mut self, wait_frames: u32) {
        self.wait_frames = wait_frames;
    }

    /// Whether `tick` does anything.
    pub fn is_update(&self) -> bool {
        self.total_frames > 1 && self.slots.iter().any(Option::is_some)
    }

    /// Advance one frame. Returns true when an apply step ran.
    pub fn tick(&mut self, controller: &mut TransformController, graph: &mut SceneGraph) -> Result<bool> {
        if !self.is_update() {
            return Ok(false);
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return Ok(false);
        }
        self.countdown = self.wait_frames;

        controller.reset_transform(graph)?;
        let t = self.distance as f32 / self.total_frames as f32;

        for slot in TweenSlot::APPLY_ORDER {
            let Some(keyframe) = &self.slots[slot.index()] else { continue };
            let (value, pivot) = keyframe.sample(t);
            controller.set_pivot(pivot.x, pivot.y);
            match slot {
                TweenSlot::Position => controller.set_position(graph, value)?,
                TweenSlot::Scale => controller.set_scale(graph, value)?,
                TweenSlot::Rotation => controller.set_rotation(graph, value.round())?,
            }
        }
        log::trace!("tween step t={:.3} ({}/{})", t, self.distance, self.total_frames);

        self.last_t = Some(t);
        self.distance += 1;
        if self.distance >= self.total_frames {
            self.distance = 0;
        }
        Ok(true)
    }

    /// Jump back to the start of the loop.
    pub fn rewind(&mut self) {
        self.distance = 0;
    }

    pub fn keyframe(&self, slot: TweenSlot) -> Option<&TweenKeyframe> {
        self.slots[slot.index()].as_ref()
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn wait_frames(&self) -> u32 {
        self.wait_frames
    }

    pub fn last_t(&self) -> Option<f32> {
        self.last_t
    }

    /// The first window after a definition is one tick longer than the
    /// steady-state throttle.
    fn arm(&mut self) {
        self.distance = 0;
        self.countdown = self.wait_frames + 1;
        self.last_t = None;
    }
}
