// core/scene.rs
//
// Node arena with parent/child ownership.
// Parents own their children; the parent link is a plain back-reference.
// Nodes live in a SlotMap, so a handle to a destroyed node stays dead even
// after its slot is reused.
//
// Usage:
//   let mut graph = SceneGraph::new();
//   let root = graph.spawn(SceneNode::new("root"));
//   let child = graph.spawn(SceneNode::new("child"));
//   graph.attach(child, root)?;
//   graph.propagate();  // Refresh cached world matrices

use glam::{Affine3A, Quat, Vec3};
use slotmap::SlotMap;
use crate::api::types::NodeId;
use crate::components::quad::QuadMesh;
use crate::error::{Result, UiError};

/// Transform relative to the parent node (or world if no parent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LocalTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A node in the scene graph: the host-side stand-in for an engine entity.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Name for lookups and debugging.
    pub name: String,
    /// Disabled nodes hide themselves and every descendant.
    pub enabled: bool,
    pub local: LocalTransform,
    /// Renderable quad. Nodes without one are pure transform carriers.
    pub visual: Option<QuadMesh>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// World matrix as of the last `propagate`.
    world: Affine3A,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            local: LocalTransform::IDENTITY,
            visual: None,
            parent: None,
            children: Vec::new(),
            world: Affine3A::IDENTITY,
        }
    }

    // -- Builder pattern --

    pub fn with_local(mut self, local: LocalTransform) -> Self {
        self.local = local;
        self
    }

    pub fn with_visual(mut self, visual: QuadMesh) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Cached world matrix. Only current after `SceneGraph::propagate`.
    pub fn world(&self) -> Affine3A {
        self.world
    }
}

/// Arena of scene nodes addressed by [`NodeId`].
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    /// Set when transforms or hierarchy change, cleared after propagate.
    dirty: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            dirty: false,
        }
    }

    /// Add a node as a root. Any parent/children the node value carries are discarded.
    pub fn spawn(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.dirty = true;
        self.nodes.insert(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutable access. Marks the graph dirty.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        let node = self.nodes.get_mut(id);
        if node.is_some() {
            self.dirty = true;
        }
        node
    }

    /// Like [`get`](Self::get), but a missing node is an error.
    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.get(id).ok_or(UiError::NodeNotFound(id))
    }

    /// Like [`get_mut`](Self::get_mut), but a missing node is an error.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.get_mut(id).ok_or(UiError::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children in insertion order. Empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Make `child` the last child of `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.node(child)?;
        self.node(parent)?;

        // Refuse to hang a node beneath itself or its own descendants.
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(UiError::AttachCycle { child, parent });
            }
            cursor = self.parent(current);
        }

        self.unlink(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Turn `child` back into a root.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        self.node(child)?;
        self.unlink(child);
        Ok(())
    }

    /// Remove `id` from its parent's child list and clear its parent link.
    fn unlink(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else { return };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Destroy a node and its whole subtree, children before parents.
    /// Returns false if the node was already gone.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else { return false };
        let children = node.children.clone();
        for child in children {
            self.destroy(child);
        }

        self.unlink(id);
        if let Some(node) = self.nodes.remove(id) {
            log::trace!("destroyed {} ({})", id, node.name);
        }
        self.dirty = true;
        true
    }

    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// A node is visible when it and every ancestor are enabled.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.get(current) {
                Some(node) if node.enabled => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn set_local(&mut self, id: NodeId, local: LocalTransform) -> Result<()> {
        self.node_mut(id)?.local = local;
        Ok(())
    }

    pub fn local(&self, id: NodeId) -> Option<&LocalTransform> {
        self.get(id).map(|n| &n.local)
    }

    /// World matrix computed on demand by walking up the parent chain.
    pub fn world_matrix(&self, id: NodeId) -> Option<Affine3A> {
        let node = self.get(id)?;
        let mut world = node.local.to_affine();
        let mut cursor = node.parent;
        while let Some(parent) = cursor {
            let parent_node = self.get(parent)?;
            world = parent_node.local.to_affine() * world;
            cursor = parent_node.parent;
        }
        Some(world)
    }

    /// Refresh the cached world matrix of every node, roots first.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }

        let mut stack: Vec<(NodeId, Affine3A)> = self
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| (id, Affine3A::IDENTITY))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else { continue };
            node.world = parent_world * node.local.to_affine();
            let world = node.world;
            stack.extend(node.children.iter().map(|&child| (child, world)));
        }

        self.dirty = false;
    }

    /// Check if the graph has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Iterate over live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    /// Find the first node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_child_relationship() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn(SceneNode::new("parent"));
        let child = graph.spawn(SceneNode::new("child"));

        graph.attach(child, parent).unwrap();

        assert_eq!(graph.parent(child), Some(parent));
        assert_eq!(graph.children(parent), [child].as_slice());
    }

    #[test]
    fn reattach_moves_child() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn(SceneNode::new("a"));
        let b = graph.spawn(SceneNode::new("b"));
        let child = graph.spawn(SceneNode::new("child"));

        graph.attach(child, a).unwrap();
        graph.attach(child, b).unwrap();

        assert!(graph.children(a).is_empty());
        assert_eq!(graph.children(b), [child].as_slice());
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn(SceneNode::new("a"));
        let b = graph.spawn(SceneNode::new("b"));
        graph.attach(b, a).unwrap();

        assert!(matches!(graph.attach(a, b), Err(UiError::AttachCycle { .. })));
        assert!(matches!(graph.attach(a, a), Err(UiError::AttachCycle { .. })));
    }

    #[test]
    fn destroy_tears_down_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.spawn(SceneNode::new("root"));
        let mid = graph.spawn(SceneNode::new("mid"));
        let leaf = graph.spawn(SceneNode::new("leaf"));
        let other = graph.spawn(SceneNode::new("other"));
        graph.attach(mid, root).unwrap();
        graph.attach(leaf, mid).unwrap();
        graph.attach(other, root).unwrap();

        assert!(graph.destroy(mid));

        assert!(!graph.contains(mid));
        assert!(!graph.contains(leaf));
        assert_eq!(graph.children(root), [other].as_slice());
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn destroy_twice_is_noop() {
        let mut graph = SceneGraph::new();
        let id = graph.spawn(SceneNode::new("node"));
        assert!(graph.destroy(id));
        assert!(!graph.destroy(id));
        assert!(graph.is_empty());
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut graph = SceneGraph::new();
        let old = graph.spawn(SceneNode::new("old"));
        graph.destroy(old);
        let new = graph.spawn(SceneNode::new("new"));

        assert_ne!(old, new);
        assert!(graph.get(old).is_none());
        assert!(matches!(graph.node(old), Err(UiError::NodeNotFound(_))));
        assert_eq!(graph.get(new).unwrap().name, "new");
    }

    #[test]
    fn disabled_parent_hides_children() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn(SceneNode::new("parent"));
        let child = graph.spawn(SceneNode::new("child"));
        graph.attach(child, parent).unwrap();

        assert!(graph.is_visible(child));
        graph.set_enabled(parent, false).unwrap();
        assert!(!graph.is_visible(child));
        graph.set_enabled(parent, true).unwrap();
        assert!(graph.is_visible(child));
    }

    #[test]
    fn propagate_updates_world_matrices() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn(
            SceneNode::new("parent")
                .with_local(LocalTransform::default().with_position(Vec3::new(100.0, 100.0, 0.0))),
        );
        let child = graph.spawn(
            SceneNode::new("child")
                .with_local(LocalTransform::default().with_position(Vec3::new(50.0, 0.0, 0.0))),
        );
        graph.attach(child, parent).unwrap();

        graph.propagate();

        let world = graph.get(child).unwrap().world();
        assert!((Vec3::from(world.translation) - Vec3::new(150.0, 100.0, 0.0)).length() < 1e-4);
        assert_eq!(graph.world_matrix(child), Some(world));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn world_matrix_applies_parent_rotation() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn(SceneNode::new("parent").with_local(
            LocalTransform::default().with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
        ));
        let child = graph.spawn(
            SceneNode::new("child")
                .with_local(LocalTransform::default().with_position(Vec3::X)),
        );
        graph.attach(child, parent).unwrap();

        let p = graph.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::Y).length() < 1e-5, "got {:?}", p);
    }

    #[test]
    fn find_by_name() {
        let mut graph = SceneGraph::new();
        graph.spawn(SceneNode::new("hero"));
        let enemy = graph.spawn(SceneNode::new("enemy"));
        assert_eq!(graph.find_by_name("enemy"), Some(enemy));
        assert_eq!(graph.find_by_name("missing"), None);
    }
}
