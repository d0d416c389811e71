//! Plotting-rectangle management.
//!
//! Scene space has its origin at the container's bottom-left corner, so the
//! plot spans `x in [left, left + width]` and `y in [bottom, bottom + height]`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ScenePoint, Viewport};

/// Margin applied on every side until labels, titles or legends need more.
pub const DEFAULT_MARGIN_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN_PX)
    }
}

/// Margin-inset plotting area. `width` and `height` are derived from the
/// container size and never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn inset(size: Viewport, margins: Margins) -> Self {
        Self {
            top: margins.top,
            right: margins.right,
            bottom: margins.bottom,
            left: margins.left,
            width: f64::from(size.width) - margins.left - margins.right,
            height: f64::from(size.height) - margins.top - margins.bottom,
        }
    }

    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.left, self.left + self.width)
    }

    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (self.bottom, self.bottom + self.height)
    }

    #[must_use]
    pub fn center(&self) -> ScenePoint {
        ScenePoint::new(self.left + self.width / 2.0, self.bottom + self.height / 2.0)
    }

    #[must_use]
    pub fn contains(&self, point: ScenePoint) -> bool {
        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        point.x >= x0 && point.x <= x1 && point.y >= y0 && point.y <= y1
    }

    /// Whether the area left after margins can hold any geometry.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Declared size of one container dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeSpec {
    Unset,
    Pixels(u32),
    Percent(f64),
}

impl SizeSpec {
    #[must_use]
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Pixels(_))
    }
}

/// Host element a chart attaches to: declared sizing plus the last observed size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: SizeSpec,
    pub height: SizeSpec,
    observed: Viewport,
}

impl Container {
    #[must_use]
    pub fn new(width: SizeSpec, height: SizeSpec, observed: Viewport) -> Self {
        Self {
            width,
            height,
            observed,
        }
    }

    /// Container with fixed pixel dimensions.
    #[must_use]
    pub fn fixed(width: u32, height: u32) -> Self {
        Self::new(
            SizeSpec::Pixels(width),
            SizeSpec::Pixels(height),
            Viewport::new(width, height),
        )
    }

    /// Container sized by its parent (100% on both axes).
    #[must_use]
    pub fn fluid(observed: Viewport) -> Self {
        Self::new(SizeSpec::Percent(100.0), SizeSpec::Percent(100.0), observed)
    }

    /// Responsive containers re-lay-out on resize; fixed-pixel ones opt out.
    #[must_use]
    pub fn is_responsive(&self) -> bool {
        !self.width.is_fixed() || !self.height.is_fixed()
    }

    #[must_use]
    pub fn observed(&self) -> Viewport {
        self.observed
    }

    pub fn set_observed(&mut self, observed: Viewport) {
        self.observed = observed;
    }

    /// Size the chart lays out against: declared pixels win over observations.
    #[must_use]
    pub fn resolved_size(&self) -> Viewport {
        let width = match self.width {
            SizeSpec::Pixels(px) => px,
            SizeSpec::Unset | SizeSpec::Percent(_) => self.observed.width,
        };
        let height = match self.height {
            SizeSpec::Pixels(px) => px,
            SizeSpec::Unset | SizeSpec::Percent(_) => self.observed.height,
        };
        Viewport::new(width, height)
    }
}

/// Owns the chart's margins and derived plotting rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutManager {
    defaults: Margins,
    margins: Margins,
    size: Viewport,
    rect: Rect,
}

impl LayoutManager {
    #[must_use]
    pub fn new(size: Viewport, defaults: Margins) -> Self {
        Self {
            defaults,
            margins: defaults,
            size,
            rect: Rect::inset(size, defaults),
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn size(&self) -> Viewport {
        self.size
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    #[must_use]
    pub fn default_margins(&self) -> Margins {
        self.defaults
    }

    /// Drops label-, title- and legend-driven expansions.
    pub fn reset_margins(&mut self) {
        self.margins = self.defaults;
        self.rect = Rect::inset(self.size, self.margins);
    }

    /// Recomputes the plotting rectangle, optionally for a new container size.
    pub fn update_main_rect(&mut self, size: Option<Viewport>) -> Rect {
        if let Some(size) = size {
            self.size = size;
        }
        self.rect = Rect::inset(self.size, self.margins);
        trace!(
            width = self.rect.width,
            height = self.rect.height,
            "updated main rect"
        );
        self.rect
    }

    /// Widens the left margin so y-axis labels of `max_label_width` fit:
    /// `left = max(default_left, max_label_width + right)`.
    ///
    /// Returns `true` when the rectangle changed; any scale built against the
    /// previous rectangle is stale from then on.
    pub fn expand_left_margin(&mut self, max_label_width: f64) -> bool {
        let left = self.defaults.left.max(max_label_width + self.margins.right);
        if left == self.margins.left {
            return false;
        }
        debug!(from = self.margins.left, to = left, "expanded left margin");
        self.margins.left = left;
        self.update_main_rect(None);
        true
    }

    /// Reserves `extra` pixels above the default top margin (titles, legends).
    pub fn reserve_top(&mut self, extra: f64) -> Rect {
        self.margins.top = self.defaults.top + extra.max(0.0);
        self.update_main_rect(None)
    }
}

#[cfg(test)]
mod tests {
    use super::{Container, LayoutManager, Margins, Rect, SizeSpec};
    use crate::core::Viewport;

    #[test]
    fn rect_width_is_container_minus_margins() {
        let rect = Rect::inset(Viewport::new(500, 300), Margins::default());
        assert_eq!(rect.width, 460.0);
        assert_eq!(rect.height, 260.0);
        assert_eq!(rect.x_range(), (20.0, 480.0));
    }

    #[test]
    fn left_margin_expands_only_past_default() {
        let mut layout = LayoutManager::new(Viewport::new(500, 300), Margins::default());
        assert!(!layout.expand_left_margin(0.0));
        assert!(layout.expand_left_margin(30.0));
        assert_eq!(layout.rect().left, 50.0);
        assert_eq!(layout.rect().width, 500.0 - 50.0 - 20.0);
    }

    #[test]
    fn responsiveness_follows_declared_size() {
        assert!(!Container::fixed(500, 300).is_responsive());
        let half = Container::new(
            SizeSpec::Pixels(500),
            SizeSpec::Percent(50.0),
            Viewport::new(500, 120),
        );
        assert!(half.is_responsive());
        assert_eq!(half.resolved_size(), Viewport::new(500, 120));
        let unset = Container::new(SizeSpec::Unset, SizeSpec::Pixels(10), Viewport::new(1, 1));
        assert!(unset.is_responsive());
    }
}
