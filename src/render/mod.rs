mod graph;
mod labels;
mod null_renderer;
mod primitives;

pub use graph::{Drawable, DrawableGraph, DrawableId, LayerKind, SceneNode};
pub use labels::{EstimatedLabelFactory, LabelFactory, RasterizedLabel, estimate_text_width_px};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, RingSectorPrimitive, TextHAlign, TextPrimitive,
};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::layout::Container;

/// Surface a renderer created for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasHandle {
    pub id: u64,
    pub size: Viewport,
}

/// Contract implemented by any scene backend.
///
/// Backends retain nodes between frames. Charts add a freshly built graph,
/// then remove and dispose the previous one, so a backend never has to diff.
/// Coordinates are y-up with the origin at the canvas' bottom-left corner.
pub trait SceneRenderer {
    fn attach(&mut self, container: &Container) -> ChartResult<CanvasHandle>;

    fn add(&mut self, node: SceneNode) -> ChartResult<DrawableId>;

    /// Detaches a node from the scene; returns `false` for unknown ids.
    fn remove(&mut self, id: DrawableId) -> bool;

    /// Releases whatever the backend holds for a removed node.
    fn dispose(&mut self, id: DrawableId);

    fn set_viewport_size(&mut self, width: u32, height: u32) -> ChartResult<()>;

    fn render_frame(&mut self) -> ChartResult<()>;

    /// Drops the canvas created by `attach`.
    fn detach(&mut self) {}
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
