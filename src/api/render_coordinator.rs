//! The render pass: options, layout, scales, draw, then hand-off.
//!
//! A pass stages its whole graph and layout before touching the chart. Only
//! a pass that finished and validated swaps them in, so a failed pass leaves
//! the previous scene and plotting rect in place.

use tracing::{debug, warn};

use crate::api::chart_kind::ResolvedHooks;
use crate::api::draw::{axis, decorations};
use crate::api::lifecycle::{Lifecycle, LifecycleState};
use crate::api::scene::{BuildContext, DrawContext, DrawOutput, Scales};
use crate::api::{Chart, ChartKind};
use crate::core::{SeriesData, TimeRange, TimeTickSpec, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::layout::{Container, LayoutManager, Rect};
use crate::options::{OptionLayers, ResolvedOptions, ThemeRegistry, resolve};
use crate::render::{DrawableId, LabelFactory, SceneNode, SceneRenderer};

/// Everything one pass reads, borrowed from the chart.
struct PassInput<'a> {
    kind: ChartKind,
    hooks: ResolvedHooks,
    data: &'a SeriesData,
    options: &'a ResolvedOptions,
    labels: &'a dyn LabelFactory,
    size: Viewport,
    time_range: Option<TimeRange>,
    x_label: Option<TimeTickSpec>,
}

struct PassOutput {
    scales: Scales,
    drawn: DrawOutput,
}

/// Layout, scale build and draw. Scales are rebuilt whenever the rectangle
/// changes, so no draw ever reads a scale built for a stale rectangle.
fn compose_scene(
    input: &PassInput<'_>,
    layout: &mut LayoutManager,
    lifecycle: &mut Lifecycle,
) -> ChartResult<PassOutput> {
    layout.reset_margins();
    layout.update_main_rect(Some(input.size));
    layout.reserve_top(decorations::header_height(
        input.options,
        input.data,
        input.labels,
    ));
    if !layout.rect().is_drawable() {
        return Err(ChartError::InvalidViewport {
            width: input.size.width,
            height: input.size.height,
        });
    }
    lifecycle.advance(LifecycleState::LayoutComputed)?;

    let build = |rect: Rect| {
        (input.hooks.build)(&BuildContext {
            kind: input.kind,
            data: input.data,
            rect,
            options: input.options,
            time_range: input.time_range,
        })
    };
    let mut scales = build(layout.rect())?;
    // Y labels are measured against the first build; a wider left margin
    // re-pins every x range, so the scales are built again from scratch.
    if let Scales::Cartesian(info) = &scales {
        let width = axis::y_axis_width(info, input.options, input.labels);
        if layout.expand_left_margin(width) {
            if !layout.rect().is_drawable() {
                return Err(ChartError::InvalidViewport {
                    width: input.size.width,
                    height: input.size.height,
                });
            }
            scales = build(layout.rect())?;
        }
    }
    lifecycle.advance(LifecycleState::ScalesBuilt)?;

    let ctx = DrawContext {
        kind: input.kind,
        data: input.data,
        rect: layout.rect(),
        size: input.size,
        options: input.options,
        labels: input.labels,
        x_label: input.x_label,
    };
    let mut drawn = DrawOutput::default();
    if let Scales::Cartesian(info) = &scales {
        axis::draw_axes(&ctx, info, &mut drawn.graph);
    }
    (input.hooks.draw)(&ctx, &scales, &mut drawn)?;
    decorations::draw_title(
        input.options,
        input.labels,
        input.size,
        layout.margins(),
        layout.default_margins(),
        &mut drawn.graph,
    );
    decorations::draw_legend(
        input.options,
        input.data,
        input.labels,
        input.size,
        layout.default_margins(),
        &mut drawn.graph,
    );
    drawn.graph.validate()?;
    lifecycle.advance(LifecycleState::Drawn)?;
    Ok(PassOutput { scales, drawn })
}

fn resolve_options(
    themes: &ThemeRegistry,
    layers: &OptionLayers,
    kind: ChartKind,
) -> ChartResult<ResolvedOptions> {
    resolve(themes, layers, &kind.bucket())
}

impl<R: SceneRenderer> Chart<R> {
    /// Runs the full pipeline once.
    ///
    /// Fails with `MissingData` before any `datum` call. A failed pass leaves
    /// the previous drawables in place.
    pub fn render(&mut self) -> ChartResult<()> {
        self.lifecycle.ensure_live()?;
        let Some(data) = &self.data else {
            return Err(ChartError::MissingData);
        };
        data.validate()?;
        self.lifecycle.advance(LifecycleState::OptionsResolved)?;
        let result = resolve_options(&self.themes, &self.layers, self.kind)
            .and_then(|options| self.run_pass(options));
        if result.is_err() {
            self.lifecycle.abort();
        }
        result
    }

    /// Rebinds the chart to `container` on a fresh canvas, then renders.
    pub fn render_to(&mut self, container: Container) -> ChartResult<&mut Self> {
        self.clear_scene();
        self.attach(container)?;
        self.render()?;
        Ok(self)
    }

    /// Re-lays-out after a container resize.
    ///
    /// A rendered chart reuses the options of its last render. A chart whose
    /// data was rebound since then runs a full render, since neither its
    /// scales nor its drawables describe the new data. A chart that never
    /// rendered only keeps the new size for its first render.
    pub(crate) fn rerender_for_resize(&mut self) -> ChartResult<()> {
        match (self.lifecycle.state(), self.resolved.clone()) {
            (LifecycleState::Rendered, Some(options)) => {
                self.lifecycle.advance(LifecycleState::Resizing)?;
                let result = self.run_pass(options);
                if result.is_err() {
                    self.lifecycle.abort();
                }
                result
            }
            (LifecycleState::DataBound, Some(_)) => self.render(),
            _ => Ok(()),
        }
    }

    /// Composes against a staged copy of the layout. The layout, scales and
    /// hit index are committed together once the new scene is swapped in.
    fn run_pass(&mut self, options: ResolvedOptions) -> ChartResult<()> {
        let data = self.data.as_ref().ok_or(ChartError::MissingData)?;
        let size = self.container.map_or_else(Viewport::default, |c| c.resolved_size());
        let input = PassInput {
            kind: self.kind,
            hooks: self.hooks,
            data,
            options: &options,
            labels: self.labels.as_ref(),
            size,
            time_range: self.time_range,
            x_label: self.x_label,
        };
        let mut layout = self.layout.clone();
        let output = compose_scene(&input, &mut layout, &mut self.lifecycle)?;

        self.swap_scene(output.drawn.graph.into_paint_order())?;
        self.layout = layout;
        self.scales = Some(output.scales);
        self.hit_index = output.drawn.hit_index;
        self.resolved = Some(options);
        self.interaction.on_pointer_leave();

        self.renderer.set_viewport_size(size.width, size.height)?;
        self.renderer.render_frame()?;
        self.lifecycle.advance(LifecycleState::Rendered)?;
        debug!(
            kind = %self.kind,
            drawables = self.live.len(),
            width = size.width,
            height = size.height,
            "rendered chart"
        );
        Ok(())
    }

    /// Adds the new nodes, then retires the old ones. If the renderer rejects
    /// a node, the partially added graph is rolled back.
    fn swap_scene(&mut self, nodes: Vec<SceneNode>) -> ChartResult<()> {
        let mut added: Vec<DrawableId> = Vec::with_capacity(nodes.len());
        for node in nodes {
            match self.renderer.add(node) {
                Ok(id) => added.push(id),
                Err(err) => {
                    for id in added {
                        self.retire(id);
                    }
                    return Err(err);
                }
            }
        }
        let previous = std::mem::replace(&mut self.live, added);
        for id in previous {
            self.retire(id);
        }
        if let Some(id) = self.overlay.take() {
            self.retire(id);
        }
        Ok(())
    }

    fn retire(&mut self, id: DrawableId) {
        if self.renderer.remove(id) {
            self.renderer.dispose(id);
        } else {
            warn!(?id, "renderer did not know drawable");
        }
    }

    /// Removes and disposes every drawable this chart handed out.
    pub(crate) fn clear_scene(&mut self) {
        for id in std::mem::take(&mut self.live) {
            self.retire(id);
        }
        if let Some(id) = self.overlay.take() {
            self.retire(id);
        }
    }

    /// Detaches from the renderer and disposes every drawable. Later renders
    /// fail with `Disposed`.
    pub fn dispose(&mut self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        self.clear_scene();
        self.renderer.detach();
        self.resize.cancel();
        self.interaction.on_pointer_leave();
        self.canvas = None;
        self.scales = None;
        self.hit_index = Default::default();
        if self.lifecycle.advance(LifecycleState::Disposed).is_ok() {
            debug!(kind = %self.kind, "disposed chart");
        }
    }
}
