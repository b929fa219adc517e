use glam::{Vec2, Vec3};
use crate::api::types::{ElementId, TweenSlot};
use crate::core::coords::CoordinateMapper;
use crate::core::scene::SceneGraph;
use crate::core::time::FrameClock;
use crate::error::Result;
use crate::extensions::bezier::CubicBezier;
use crate::extensions::transform::TransformController;
use crate::extensions::tween::TweenEngine;

/// Construction parameters for a UI element.
#[derive(Debug, Clone)]
pub struct ElementDesc {
    pub name: String,
    /// Unscaled size in normalized viewport units (default: 0.1 × 0.1).
    pub size: Vec2,
    /// Whether the element gets a quad (default: true).
    pub renderable: bool,
    /// Whether the element gets a wrapper node for pivot-correct rotation (default: false).
    pub pivot_wrapper: bool,
    /// Element whose content node this element hangs under.
    pub parent: Option<ElementId>,
    /// Reset the transform and rewind tweens once per clock window.
    pub periodic_reset: bool,
}

impl ElementDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: Vec2::splat(0.1),
            renderable: true,
            pivot_wrapper: false,
            parent: None,
            periodic_reset: false,
        }
    }

    // -- Builder pattern --

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_pivot_wrapper(mut self, pivot_wrapper: bool) -> Self {
        self.pivot_wrapper = pivot_wrapper;
        self
    }

    pub fn without_visual(mut self) -> Self {
        self.renderable = false;
        self
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_periodic_reset(mut self, periodic_reset: bool) -> Self {
        self.periodic_reset = periodic_reset;
        self
    }
}

/// A UI element: transform controller plus its tweens.
#[derive(Debug, Clone)]
pub struct UiElement {
    pub id: ElementId,
    pub name: String,
    controller: TransformController,
    tweens: TweenEngine,
    periodic_reset: bool,
}

impl UiElement {
    pub fn new(
        id: ElementId,
        desc: &ElementDesc,
        graph: &mut SceneGraph,
        mapper: CoordinateMapper,
        wait_frames: u32,
    ) -> Result<Self> {
        let controller = TransformController::spawn(graph, mapper, desc)?;
        Ok(Self {
            id,
            name: desc.name.clone(),
            controller,
            tweens: TweenEngine::new(wait_frames),
            periodic_reset: desc.periodic_reset,
        })
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransformController {
        &mut self.controller
    }

    pub fn tweens(&self) -> &TweenEngine {
        &self.tweens
    }

    pub fn tweens_mut(&mut self) -> &mut TweenEngine {
        &mut self.tweens
    }

    /// Define the motion for one property, starting from its current value.
    pub fn set_motion_path_bezier(
        &mut self,
        slot: TweenSlot,
        target: Vec3,
        target_pivot: Vec2,
        curve: CubicBezier,
        total_frames: u32,
    ) -> Result<()> {
        self.tweens
            .set_motion_path_bezier(&self.controller, slot, target, target_pivot, curve, total_frames)
    }

    /// Per-frame update.
    pub fn update(&mut self, graph: &mut SceneGraph, clock: &FrameClock) -> Result<()> {
        if self.periodic_reset && clock.frames() == 0 {
            log::trace!("{}: periodic reset", self.name);
            self.controller.reset_transform(graph)?;
            self.tweens.rewind();
        }
        if self.tweens.is_update() {
            self.tweens.tick(&mut self.controller, graph)?;
        }
        Ok(())
    }

    /// Release the element's nodes. Safe to call more than once.
    pub fn destroy(&mut self, graph: &mut SceneGraph) -> bool {
        self.controller.destroy(graph)
    }
}
