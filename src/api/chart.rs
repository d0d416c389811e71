use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::api::chart_kind::ResolvedHooks;
use crate::api::lifecycle::{Lifecycle, LifecycleState};
use crate::api::scene::Scales;
use crate::api::{ChartHooks, ChartKind};
use crate::core::{SeriesData, TimeRange, TimeTickSpec, Viewport};
use crate::error::ChartResult;
use crate::interaction::{HitIndex, InteractionState, ResizeDebouncer};
use crate::layout::{Container, LayoutManager, Margins, Rect};
use crate::options::{OptionLayers, ResolvedOptions, ThemeRegistry};
use crate::render::{
    CanvasHandle, DrawableId, EstimatedLabelFactory, LabelFactory, SceneRenderer,
};

/// One chart instance: configuration layers, bound data, layout, the last
/// resolved scales and the renderer that owns its drawables.
///
/// Builder methods take `&mut self` and return it so calls chain:
///
/// ```
/// use scene_charts::{Chart, ChartKind, NullRenderer};
/// use scene_charts::core::CategoryDatum;
/// use scene_charts::core::SeriesData;
///
/// let mut chart = Chart::new(ChartKind::Pie, NullRenderer::new())?;
/// chart
///     .datum(SeriesData::Categorical(vec![
///         CategoryDatum::new("a", 1.0),
///         CategoryDatum::new("b", 3.0),
///     ]))
///     .title("Share");
/// chart.render()?;
/// # Ok::<(), scene_charts::ChartError>(())
/// ```
pub struct Chart<R: SceneRenderer> {
    pub(crate) kind: ChartKind,
    pub(crate) hooks: ResolvedHooks,
    pub(crate) renderer: R,
    pub(crate) labels: Rc<dyn LabelFactory>,
    pub(crate) container: Option<Container>,
    pub(crate) canvas: Option<CanvasHandle>,
    pub(crate) layout: LayoutManager,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) themes: ThemeRegistry,
    pub(crate) layers: OptionLayers,
    pub(crate) data: Option<SeriesData>,
    pub(crate) time_range: Option<TimeRange>,
    pub(crate) x_label: Option<TimeTickSpec>,
    pub(crate) resolved: Option<ResolvedOptions>,
    pub(crate) scales: Option<Scales>,
    pub(crate) hit_index: HitIndex,
    pub(crate) live: Vec<DrawableId>,
    pub(crate) overlay: Option<DrawableId>,
    pub(crate) interaction: InteractionState,
    pub(crate) resize: ResizeDebouncer,
}

impl<R: SceneRenderer> fmt::Debug for Chart<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.kind)
            .field("state", &self.lifecycle.state())
            .field("size", &self.size())
            .field("live_drawables", &self.live.len())
            .finish_non_exhaustive()
    }
}

impl<R: SceneRenderer> Chart<R> {
    /// Detached chart with the kind's built-in hooks.
    pub fn new(kind: ChartKind, renderer: R) -> ChartResult<Self> {
        Self::with_hooks(kind, kind.hooks(), renderer)
    }

    /// Detached chart with a custom hook table; fails when `build` or `draw`
    /// is missing.
    pub fn with_hooks(kind: ChartKind, hooks: ChartHooks, renderer: R) -> ChartResult<Self> {
        let hooks = hooks.require(kind)?;
        debug!(kind = %kind, "constructed chart");
        Ok(Self {
            kind,
            hooks,
            renderer,
            labels: Rc::new(EstimatedLabelFactory),
            container: None,
            canvas: None,
            layout: LayoutManager::new(Viewport::default(), Margins::default()),
            lifecycle: Lifecycle::default(),
            themes: ThemeRegistry::new(),
            layers: OptionLayers::default(),
            data: None,
            time_range: None,
            x_label: None,
            resolved: None,
            scales: None,
            hit_index: HitIndex::Empty,
            live: Vec::new(),
            overlay: None,
            interaction: InteractionState::default(),
            resize: ResizeDebouncer::default(),
        })
    }

    /// Chart attached to `container` from the start.
    pub fn attached(kind: ChartKind, renderer: R, container: Container) -> ChartResult<Self> {
        let mut chart = Self::new(kind, renderer)?;
        chart.attach(container)?;
        Ok(chart)
    }

    /// Binds the renderer to `container` and lays out against its size.
    pub(crate) fn attach(&mut self, container: Container) -> ChartResult<()> {
        self.lifecycle.ensure_live()?;
        if self.canvas.is_some() {
            self.renderer.detach();
        }
        let canvas = self.renderer.attach(&container)?;
        self.layout.update_main_rect(Some(container.resolved_size()));
        debug!(
            canvas = canvas.id,
            width = canvas.size.width,
            height = canvas.size.height,
            responsive = container.is_responsive(),
            "attached chart"
        );
        self.canvas = Some(canvas);
        self.container = Some(container);
        Ok(())
    }

    /// Replaces the label factory used to measure and place text.
    pub fn with_label_factory(&mut self, labels: Rc<dyn LabelFactory>) -> &mut Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Size the chart lays out against: the container's, or 600x400 when
    /// detached.
    #[must_use]
    pub fn size(&self) -> Viewport {
        self.container
            .map_or_else(Viewport::default, |container| container.resolved_size())
    }

    #[must_use]
    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    #[must_use]
    pub fn canvas(&self) -> Option<CanvasHandle> {
        self.canvas
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.layout.rect()
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    #[must_use]
    pub fn data(&self) -> Option<&SeriesData> {
        self.data.as_ref()
    }

    /// Options resolved by the last successful render.
    #[must_use]
    pub fn resolved_options(&self) -> Option<&ResolvedOptions> {
        self.resolved.as_ref()
    }

    /// Scales built by the last successful render.
    #[must_use]
    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn hit_index(&self) -> &HitIndex {
        &self.hit_index
    }

    #[must_use]
    pub fn option_layers(&self) -> &OptionLayers {
        &self.layers
    }

    #[must_use]
    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Ids of the drawables handed to the renderer by the last render.
    #[must_use]
    pub fn live_drawables(&self) -> &[DrawableId] {
        &self.live
    }

    /// Configuration clone: same kind, hooks, themes and option layers, with
    /// data, container and drawables reset. Option layers are owned values,
    /// so the copy never aliases the original's nested options.
    pub fn make_copy_with_renderer<R2: SceneRenderer>(&self, renderer: R2) -> Chart<R2> {
        debug!(kind = %self.kind, "copied chart configuration");
        Chart {
            kind: self.kind,
            hooks: self.hooks,
            renderer,
            labels: Rc::clone(&self.labels),
            container: None,
            canvas: None,
            layout: LayoutManager::new(Viewport::default(), self.layout.default_margins()),
            lifecycle: Lifecycle::default(),
            themes: self.themes.clone(),
            layers: self.layers.clone(),
            data: None,
            time_range: self.time_range,
            x_label: self.x_label,
            resolved: None,
            scales: None,
            hit_index: HitIndex::Empty,
            live: Vec::new(),
            overlay: None,
            interaction: InteractionState::default(),
            resize: ResizeDebouncer::new(self.resize.delay()),
        }
    }

    pub fn make_copy(&self) -> Chart<R>
    where
        R: Default,
    {
        self.make_copy_with_renderer(R::default())
    }
}
