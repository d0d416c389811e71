use indexmap::IndexMap;
use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::layout::Container;
use crate::render::{CanvasHandle, DrawableId, LayerKind, SceneNode, SceneRenderer};

/// Headless renderer used by tests and offscreen charts.
///
/// It keeps the retained scene in memory and still validates every node so
/// tests catch invalid geometry before a real backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    live: IndexMap<DrawableId, SceneNode>,
    removed: IndexMap<DrawableId, SceneNode>,
    next_id: u64,
    next_canvas: u64,
    canvas: Option<CanvasHandle>,
    viewport: Viewport,
    pub frames_rendered: usize,
    pub disposed_count: usize,
    pub last_frame_node_count: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn canvas(&self) -> Option<CanvasHandle> {
        self.canvas
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Live nodes in paint order.
    #[must_use]
    pub fn scene(&self) -> Vec<&SceneNode> {
        let mut nodes: Vec<&SceneNode> = self.live.values().collect();
        nodes.sort_by_key(|node| node.layer);
        nodes
    }

    #[must_use]
    pub fn node(&self, id: DrawableId) -> Option<&SceneNode> {
        self.live.get(&id)
    }

    pub fn count_in(&self, layer: LayerKind) -> usize {
        self.live.values().filter(|node| node.layer == layer).count()
    }
}

impl SceneRenderer for NullRenderer {
    fn attach(&mut self, container: &Container) -> ChartResult<CanvasHandle> {
        let size = container.resolved_size();
        self.next_canvas += 1;
        let handle = CanvasHandle {
            id: self.next_canvas,
            size,
        };
        self.canvas = Some(handle);
        self.viewport = size;
        Ok(handle)
    }

    fn add(&mut self, node: SceneNode) -> ChartResult<DrawableId> {
        node.drawable.validate()?;
        self.next_id += 1;
        let id = DrawableId(self.next_id);
        self.live.insert(id, node);
        Ok(id)
    }

    fn remove(&mut self, id: DrawableId) -> bool {
        match self.live.shift_remove(&id) {
            Some(node) => {
                self.removed.insert(id, node);
                true
            }
            None => false,
        }
    }

    fn dispose(&mut self, id: DrawableId) {
        if self.removed.shift_remove(&id).is_some() {
            self.disposed_count += 1;
        }
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        self.viewport = viewport;
        Ok(())
    }

    fn render_frame(&mut self) -> ChartResult<()> {
        self.frames_rendered += 1;
        self.last_frame_node_count = self.live.len();
        trace!(
            nodes = self.live.len(),
            frame = self.frames_rendered,
            "null renderer frame"
        );
        Ok(())
    }

    fn detach(&mut self) {
        self.canvas = None;
    }
}
