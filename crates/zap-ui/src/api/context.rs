use glam::{Vec2, Vec3};
use crate::api::config::UiConfig;
use crate::api::element::{ElementDesc, UiElement};
use crate::api::types::{ElementId, TweenSlot};
use crate::assets::manifest::MotionManifest;
use crate::core::coords::CoordinateMapper;
use crate::core::scene::SceneGraph;
use crate::core::time::FrameClock;
use crate::error::{Result, UiError};
use crate::extensions::bezier::CubicBezier;

/// Owns the scene graph, frame clock and every UI element.
/// The host calls [`update`](Self::update) once per rendered frame and then
/// reads node transforms and quads back out of [`graph`](Self::graph).
pub struct UiContext {
    config: UiConfig,
    mapper: CoordinateMapper,
    clock: FrameClock,
    graph: SceneGraph,
    /// Updated in spawn order.
    elements: Vec<UiElement>,
    next_id: u32,
}

impl UiContext {
    pub fn new(config: UiConfig) -> Result<Self> {
        config.validate()?;
        let mapper = CoordinateMapper::from_config(&config)?;
        let clock = FrameClock::new(config.target_frame_rate)?;
        Ok(Self {
            config,
            mapper,
            clock,
            graph: SceneGraph::with_capacity(256),
            elements: Vec::new(),
            next_id: 1,
        })
    }

    /// Create an element, parented under `desc.parent`'s content node if given.
    pub fn spawn(&mut self, desc: ElementDesc) -> Result<ElementId> {
        let parent_node = match desc.parent {
            Some(parent) => Some(
                self.element(parent)
                    .ok_or(UiError::ElementNotFound(parent))?
                    .controller()
                    .content(),
            ),
            None => None,
        };

        let id = ElementId(self.next_id);
        let mut element = UiElement::new(id, &desc, &mut self.graph, self.mapper, self.config.wait_frames)?;
        if let Some(parent_node) = parent_node {
            if let Err(e) = self.graph.attach(element.controller().root(), parent_node) {
                element.destroy(&mut self.graph);
                return Err(e);
            }
        }

        self.next_id += 1;
        log::debug!("spawned {} ({})", id, desc.name);
        self.elements.push(element);
        Ok(id)
    }

    /// Destroy an element and every element nested under it.
    /// Returns false if the element was already gone.
    pub fn despawn(&mut self, id: ElementId) -> bool {
        let Some(index) = self.elements.iter().position(|e| e.id == id) else {
            return false;
        };
        let mut element = self.elements.remove(index);
        element.destroy(&mut self.graph);

        // Nested elements lost their nodes with the subtree.
        let graph = &self.graph;
        self.elements.retain(|e| graph.contains(e.controller().content()));
        log::debug!("despawned {} ({})", id, element.name);
        true
    }

    pub fn element(&self, id: ElementId) -> Option<&UiElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut UiElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Find the first element with the given name.
    pub fn find_element(&self, name: &str) -> Option<ElementId> {
        self.elements.iter().find(|e| e.name == name).map(|e| e.id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &UiElement> {
        self.elements.iter()
    }

    /// Split borrow for driving an element's controller by hand.
    pub fn element_and_graph(&mut self, id: ElementId) -> Option<(&mut UiElement, &mut SceneGraph)> {
        let element = self.elements.iter_mut().find(|e| e.id == id)?;
        Some((element, &mut self.graph))
    }

    pub fn set_motion_path_bezier(
        &mut self,
        id: ElementId,
        slot: TweenSlot,
        target: Vec3,
        target_pivot: Vec2,
        curve: CubicBezier,
        total_frames: u32,
    ) -> Result<()> {
        self.element_mut(id)
            .ok_or(UiError::ElementNotFound(id))?
            .set_motion_path_bezier(slot, target, target_pivot, curve, total_frames)
    }

    /// Apply every motion path in `manifest` to the element it names.
    /// Returns the number of paths applied; unknown element names are skipped.
    /// Nothing is applied if any path has a zero frame duration.
    pub fn apply_motion_manifest(&mut self, manifest: &MotionManifest) -> Result<usize> {
        manifest.validate()?;
        let mut applied = 0;
        for path in &manifest.paths {
            let Some(id) = self.find_element(&path.element) else {
                log::warn!("motion path for unknown element {:?}", path.element);
                continue;
            };
            self.set_motion_path_bezier(
                id,
                path.slot,
                path.target,
                path.target_pivot,
                path.curve.bezier(),
                path.total_frames,
            )?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Advance one rendered frame: tick the clock, update every element in
    /// spawn order, then refresh world matrices.
    ///
    /// A failing element does not stop the others; the first error is returned.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        self.clock.advance(dt);

        let mut first_err = None;
        for element in &mut self.elements {
            if let Err(e) = element.update(&mut self.graph, &self.clock) {
                log::warn!("{}: update failed: {}", element.name, e);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        self.graph.propagate();
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
