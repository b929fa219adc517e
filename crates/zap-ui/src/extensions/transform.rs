// extensions/transform.rs
//
// Pivot-anchored UI transforms written onto scene nodes.
//
// An element is a content node carrying the quad, optionally parented under
// a wrapper "controller" node. The content node's origin is always the pivot,
// and the pivot always lands on the element's mapped position. With a
// wrapper, the wrapper carries rotation about the rectangle centre and its
// position absorbs the pivot offset plus the rotation correction. Without
// one, rotation lands directly on the content node.
//
// Usage:
//   let mut ctrl = TransformController::spawn(&mut graph, mapper, &desc)?;
//   ctrl.set_pivot(0.0, 0.0);
//   ctrl.set_rotation(&mut graph, Vec3::new(0.0, 0.0, 45.0))?;

use glam::{Quat, Vec2, Vec3};
use crate::api::element::ElementDesc;
use crate::api::types::{NodeId, TweenSlot};
use crate::components::quad::QuadMesh;
use crate::core::coords::{pivot_offset, pivot_rect, CoordinateMapper};
use crate::core::scene::{SceneGraph, SceneNode};
use crate::error::Result;

/// Position, scale, rotation and pivot of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// x/y in normalized viewport units (top-left origin), z depth offset.
    pub position: Vec3,
    /// 1.0 = unscaled.
    pub scale: Vec3,
    /// Euler angles in degrees, applied Y, then X, then Z.
    pub rotation: Vec3,
    /// (0, 0) = top-left corner of the element rectangle.
    pub pivot: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 0.5, 0.0),
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            pivot: Vec2::splat(0.5),
        }
    }
}

impl TransformState {
    /// Current value of the property animated by `slot`.
    pub fn value(&self, slot: TweenSlot) -> Vec3 {
        match slot {
            TweenSlot::Position => self.position,
            TweenSlot::Scale => self.scale,
            TweenSlot::Rotation => self.rotation,
        }
    }
}

/// Orientation for Euler angles in degrees: Y is applied first, then X, then Z.
pub fn orientation(rotation_deg: Vec3) -> Quat {
    Quat::from_rotation_z(rotation_deg.z.to_radians())
        * Quat::from_rotation_x(rotation_deg.x.to_radians())
        * Quat::from_rotation_y(rotation_deg.y.to_radians())
}

/// Owns the node(s) of one UI element and keeps them in sync with its [`TransformState`].
#[derive(Debug, Clone)]
pub struct TransformController {
    content: NodeId,
    wrapper: Option<NodeId>,
    mapper: CoordinateMapper,
    /// Unscaled element size in world units.
    base_size: Vec2,
    state: TransformState,
    /// Content node position inside the wrapper: pivot relative to the rectangle centre.
    offset: Vec3,
    /// Wrapper displacement that keeps the pivot fixed under the current rotation.
    correction: Vec3,
}

impl TransformController {
    /// Create the element's node(s) as roots of `graph` and write the baseline transform.
    pub fn spawn(graph: &mut SceneGraph, mapper: CoordinateMapper, desc: &ElementDesc) -> Result<Self> {
        let base_size = mapper.viewport_extent(desc.size);

        let mut content_node = SceneNode::new(desc.name.clone());
        if desc.renderable {
            content_node = content_node
                .with_visual(QuadMesh::from_rect(&pivot_rect(Vec2::splat(0.5), base_size.x, base_size.y)));
        }
        let content = graph.spawn(content_node);

        let wrapper = if desc.pivot_wrapper {
            let wrapper = graph.spawn(SceneNode::new(format!("{}/controller", desc.name)));
            graph.attach(content, wrapper)?;
            Some(wrapper)
        } else {
            None
        };

        let mut controller = Self {
            content,
            wrapper,
            mapper,
            base_size,
            state: TransformState::default(),
            offset: Vec3::ZERO,
            correction: Vec3::ZERO,
        };
        controller.reset_transform(graph)?;
        Ok(controller)
    }

    /// Node carrying the quad.
    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn wrapper(&self) -> Option<NodeId> {
        self.wrapper
    }

    /// Top-most node of the element: the wrapper if present, else the content node.
    pub fn root(&self) -> NodeId {
        self.wrapper.unwrap_or(self.content)
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn scale(&self) -> Vec3 {
        self.state.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.state.rotation
    }

    pub fn pivot(&self) -> Vec2 {
        self.state.pivot
    }

    pub fn base_size(&self) -> Vec2 {
        self.base_size
    }

    /// Scaled element size in world units.
    pub fn size(&self) -> Vec2 {
        self.base_size * self.state.scale.truncate()
    }

    /// Wrapper displacement that holds the pivot in place under the current rotation.
    pub fn correction(&self) -> Vec3 {
        self.correction
    }

    /// Move the element's pivot to `position`, in normalized viewport units.
    pub fn set_position(&mut self, graph: &mut SceneGraph, position: Vec3) -> Result<()> {
        self.state.position = position;
        self.write_placement(graph)
    }

    /// Resize the element. Regenerates the quad around the current pivot;
    /// the pivot stays where it is.
    pub fn set_scale(&mut self, graph: &mut SceneGraph, scale: Vec3) -> Result<()> {
        self.state.scale = scale;
        self.write_geometry(graph)
    }

    /// Rotate the element (degrees). With a wrapper, the pivot stays put.
    pub fn set_rotation(&mut self, graph: &mut SceneGraph, rotation_deg: Vec3) -> Result<()> {
        self.state.rotation = rotation_deg;
        let q = orientation(rotation_deg);

        match self.wrapper {
            Some(wrapper) => {
                self.offset = pivot_offset(self.state.pivot, self.size());
                self.correction = q * self.offset - self.offset;
                graph.node_mut(self.content)?.local.position = self.offset;
                graph.node_mut(wrapper)?.local.rotation = q;
                self.write_placement(graph)
            }
            None => {
                graph.node_mut(self.content)?.local.rotation = q;
                Ok(())
            }
        }
    }

    /// Store the pivot. Nothing is recomputed until the next scale or
    /// rotation call; callers re-issue those to see the new pivot.
    pub fn set_pivot(&mut self, x: f32, y: f32) {
        self.state.pivot = Vec2::new(x, y);
    }

    /// Back to the baseline: centred, unscaled, unrotated, centre pivot.
    pub fn reset_transform(&mut self, graph: &mut SceneGraph) -> Result<()> {
        self.state = TransformState::default();
        self.offset = Vec3::ZERO;
        self.correction = Vec3::ZERO;

        let center = self.mapper.to_world(self.state.position);
        if let Some(wrapper) = self.wrapper {
            let node = graph.node_mut(wrapper)?;
            node.local.position = center;
            node.local.rotation = Quat::IDENTITY;
            node.local.scale = Vec3::ONE;
            graph.node_mut(self.content)?.local.position = Vec3::ZERO;
        } else {
            graph.node_mut(self.content)?.local.position = center;
        }
        let content = graph.node_mut(self.content)?;
        content.local.rotation = Quat::IDENTITY;
        content.local.scale = Vec3::ONE;
        self.write_geometry(graph)
    }

    /// Release the wrapper (if any) and then the content node.
    /// Returns false when there was nothing left to release.
    pub fn destroy(&mut self, graph: &mut SceneGraph) -> bool {
        let mut released = false;
        if let Some(wrapper) = self.wrapper {
            released |= graph.destroy(wrapper);
        }
        released |= graph.destroy(self.content);
        released
    }

    /// World-space location of the pivot point, from the current node transforms.
    pub fn pivot_world(&self, graph: &SceneGraph) -> Option<Vec3> {
        graph
            .world_matrix(self.content)
            .map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Put the positioned node where the pivot lands on the mapped position.
    /// Uses the offset and correction cached by the last scale or rotation.
    fn write_placement(&mut self, graph: &mut SceneGraph) -> Result<()> {
        let world = self.mapper.to_world(self.state.position);
        let node = graph.node_mut(self.root())?;
        node.local.position = match self.wrapper {
            Some(_) => world - self.offset - self.correction,
            None => world,
        };
        Ok(())
    }

    /// Rebuild the quad from the current pivot and scaled size.
    fn write_geometry(&mut self, graph: &mut SceneGraph) -> Result<()> {
        let size = self.size();
        let pivot = self.state.pivot;
        let depth_scale = self.state.scale.z;

        let node = graph.node_mut(self.content)?;
        node.local.scale.z = depth_scale;
        match node.visual.as_mut() {
            Some(quad) => quad.write_rect(&pivot_rect(pivot, size.x, size.y)),
            None => log::trace!("{}: no visual, geometry skipped", node.name),
        }

        if self.wrapper.is_some() {
            // The rectangle centre moved relative to the pivot.
            self.offset = pivot_offset(pivot, size);
            self.correction = orientation(self.state.rotation) * self.offset - self.offset;
            graph.node_mut(self.content)?.local.position = self.offset;
            self.write_placement(graph)?;
        }
        Ok(())
    }
}
