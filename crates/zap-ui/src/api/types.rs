use serde::{Deserialize, Serialize};
use slotmap::Key;

slotmap::new_key_type! {
    /// Handle to a node in the [`SceneGraph`](crate::core::scene::SceneGraph) arena.
    /// Handles to destroyed nodes never alias a newer node in the same slot.
    pub struct NodeId;
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{:?}", self.data())
    }
}

/// Unique identifier for a UI element owned by a [`UiContext`](crate::api::context::UiContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Animatable transform property. Each one owns a single tween slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenSlot {
    Position,
    Scale,
    Rotation,
}

impl TweenSlot {
    /// Order in which slots are resolved every apply step.
    /// Rotation's pivot correction reads the size produced by Scale, so it goes last.
    pub const APPLY_ORDER: [TweenSlot; 3] = [TweenSlot::Position, TweenSlot::Scale, TweenSlot::Rotation];

    pub(crate) fn index(self) -> usize {
        match self {
            TweenSlot::Position => 0,
            TweenSlot::Scale => 1,
            TweenSlot::Rotation => 2,
        }
    }
}
