
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::{ScenePoint, Viewport};

pub use hit_test::{
    BarSpan, Hit, HitIndex, HitTarget, PointMark, locate, locate_bars, locate_points,
    locate_scatter, locate_wedges,
};

/// Hit-test strategy of a chart kind.
pub type LocateFn = fn(&HitIndex, ScenePoint) -> Option<Hit>;

/// Quiet period before a burst of resize observations is applied.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Public tooltip state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub content: String,
    /// Scene position of the located mark, not the raw pointer.
    pub anchor: ScenePoint,
    /// Number of times `content` actually changed.
    pub content_updates: usize,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            visible: false,
            content: String::new(),
            anchor: ScenePoint::new(0.0, 0.0),
            content_updates: 0,
        }
    }
}

impl TooltipState {
    /// Shows the tooltip at `anchor`; content is only replaced when it differs.
    pub fn show(&mut self, content: &str, anchor: ScenePoint) {
        self.visible = true;
        self.anchor = anchor;
        if self.content != content {
            content.clone_into(&mut self.content);
            self.content_updates += 1;
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Pointer-side state of one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    tooltip: TooltipState,
    last_hit: Option<Hit>,
    pointer: Option<ScenePoint>,
}

impl InteractionState {
    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn last_hit(&self) -> Option<&Hit> {
        self.last_hit.as_ref()
    }

    #[must_use]
    pub fn pointer(&self) -> Option<ScenePoint> {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, point: ScenePoint, hit: Option<Hit>) {
        self.pointer = Some(point);
        match &hit {
            Some(hit) => self.tooltip.show(&hit.tooltip, hit.anchor),
            None => self.tooltip.hide(),
        }
        self.last_hit = hit;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.last_hit = None;
        self.tooltip.hide();
    }
}

/// Coalesces bursts of container size observations into one resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Viewport, Instant)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records `size` and restarts the quiet period from `now`.
    pub fn observe(&mut self, size: Viewport, now: Instant) {
        self.pending = Some((size, now));
    }

    /// Returns the latest observed size once `delay` has passed since it arrived.
    pub fn poll(&mut self, now: Instant) -> Option<Viewport> {
        let (size, observed_at) = self.pending?;
        if now.saturating_duration_since(observed_at) < self.delay {
            return None;
        }
        self.pending = None;
        Some(size)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ResizeDebouncer, TooltipState};
    use crate::core::{ScenePoint, Viewport};

    #[test]
    fn debouncer_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(250));
        debouncer.observe(Viewport::new(100, 100), start);
        debouncer.observe(Viewport::new(120, 100), start + Duration::from_millis(100));
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(350)),
            Some(Viewport::new(120, 100))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn tooltip_content_only_counts_real_changes() {
        let mut tooltip = TooltipState::default();
        tooltip.show("Q1 10", ScenePoint::new(1.0, 1.0));
        tooltip.show("Q1 10", ScenePoint::new(2.0, 1.0));
        assert_eq!(tooltip.content_updates, 1);
        assert_eq!(tooltip.anchor, ScenePoint::new(2.0, 1.0));
        tooltip.hide();
        assert!(!tooltip.visible);
    }
}
