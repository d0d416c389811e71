use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::api::lifecycle::LifecycleState;
use crate::api::{Chart, ChartKind};
use crate::core::{ScenePoint, Viewport};
use crate::error::ChartResult;
use crate::interaction::{Hit, HitIndex, HitTarget, ResizeDebouncer, TooltipState};
use crate::options::LabelPosition;
use crate::render::{Drawable, LayerKind, SceneNode, SceneRenderer, TextHAlign};

impl<R: SceneRenderer> Chart<R> {
    /// Hit-tests a pointer position given in client coordinates (y down).
    ///
    /// Runs synchronously on every call. A miss hides the tooltip; a hit
    /// anchors it to the located mark.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Option<Hit> {
        if self.lifecycle.is_disposed() {
            return None;
        }
        let point = ScenePoint::from_client(client_x, client_y, self.size());
        let hit = self
            .hooks
            .locate
            .and_then(|locate| locate(&self.hit_index, point));
        trace!(x = point.x, y = point.y, hit = hit.is_some(), "pointer move");
        self.update_center_label(hit.as_ref());
        self.interaction.on_pointer_move(point, hit.clone());
        hit
    }

    /// Hides the tooltip and any hover overlay.
    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        self.update_center_label(None);
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn last_hit(&self) -> Option<&Hit> {
        self.interaction.last_hit()
    }

    /// Whether resize observations re-lay-out this chart.
    #[must_use]
    pub fn is_responsive(&self) -> bool {
        self.container.is_some_and(|container| container.is_responsive())
    }

    pub fn set_resize_debounce(&mut self, delay: Duration) -> &mut Self {
        self.resize = ResizeDebouncer::new(delay);
        self
    }

    /// Records an observed container size. Fixed-pixel and detached charts
    /// ignore observations. Returns whether the observation was queued.
    pub fn observe_resize(&mut self, size: Viewport, now: Instant) -> bool {
        if self.lifecycle.is_disposed() || !self.is_responsive() {
            return false;
        }
        self.resize.observe(size, now);
        true
    }

    /// Applies a queued resize once its quiet period has passed. Returns
    /// whether a resize ran.
    pub fn poll_resize(&mut self, now: Instant) -> ChartResult<bool> {
        match self.resize.poll(now) {
            Some(size) => {
                debug!(width = size.width, height = size.height, "debounced resize fired");
                self.resize_now(size)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Recomputes the rectangle, scales and drawables for `size` immediately.
    pub fn resize_now(&mut self, size: Viewport) -> ChartResult<()> {
        self.lifecycle.ensure_live()?;
        let Some(container) = self.container.as_mut() else {
            return Ok(());
        };
        container.set_observed(size);
        self.rerender_for_resize()
    }

    /// Places or removes the donut's center label for `hit`. A frame is only
    /// presented when the overlay actually changed.
    fn update_center_label(&mut self, hit: Option<&Hit>) {
        if self.kind != ChartKind::Donut {
            return;
        }
        let same_wedge = self.overlay.is_some()
            && matches!(
                (hit, self.interaction.last_hit()),
                (Some(new), Some(old)) if new.target == old.target
            );
        if same_wedge {
            return;
        }
        let mut changed = false;
        if let Some(id) = self.overlay.take() {
            if self.renderer.remove(id) {
                self.renderer.dispose(id);
            }
            changed = true;
        }
        if let Some(label) = self.center_label(hit) {
            match self.renderer.add(SceneNode::new(LayerKind::Overlay, label)) {
                Ok(id) => {
                    self.overlay = Some(id);
                    changed = true;
                }
                Err(err) => warn!(%err, "failed to add donut center label"),
            }
        }
        if changed {
            self.present_overlay();
        }
    }

    fn center_label(&self, hit: Option<&Hit>) -> Option<Drawable> {
        let hit = hit?;
        let options = self.resolved.as_ref()?;
        if options.plot_options.donut.label.position != LabelPosition::Center {
            return None;
        }
        let (HitTarget::Wedge { .. }, HitIndex::Polar { info, .. }) = (hit.target, &self.hit_index)
        else {
            return None;
        };
        let style = &options.labels.style;
        Some(
            self.labels
                .measure_and_rasterize(&hit.tooltip, style.font_size, style.color)
                .placed(info.frame.origin.x, info.frame.origin.y, TextHAlign::Center),
        )
    }

    fn present_overlay(&mut self) {
        if self.lifecycle.state() == LifecycleState::Rendered {
            if let Err(err) = self.renderer.render_frame() {
                warn!(%err, "failed to present overlay frame");
            }
        }
    }
}
