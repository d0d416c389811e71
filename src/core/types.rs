use serde::{Deserialize, Serialize};

/// Container size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600, 400)
    }
}

/// Point in scene space: origin at the bottom-left corner, y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

impl ScenePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts a client-space pointer position (y grows downward) into scene space.
    #[must_use]
    pub fn from_client(client_x: f64, client_y: f64, viewport: Viewport) -> Self {
        Self {
            x: client_x,
            y: f64::from(viewport.height) - client_y,
        }
    }

    #[must_use]
    pub fn distance_to(self, other: ScenePoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Inclusive numeric extent collected by a reduction over series values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Reduction seed: folding any finite value replaces both ends.
    pub const EMPTY: Extent = Extent {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    #[must_use]
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        values.into_iter().fold(Self::EMPTY, Self::include)
    }

    #[must_use]
    pub fn include(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[must_use]
    pub fn union(self, other: Extent) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.min.is_finite() || !self.max.is_finite()
    }

    /// Returns an extent safe to build a scale from.
    ///
    /// Empty reductions become `[0, 1]`; a single repeated value `v` becomes
    /// `[v - 1, v + 1]` so the span never collapses to zero.
    #[must_use]
    pub fn guarded(self) -> Self {
        if self.is_empty() {
            return Self { min: 0.0, max: 1.0 };
        }
        if self.min == self.max {
            return Self {
                min: self.min - 1.0,
                max: self.max + 1.0,
            };
        }
        self
    }

    #[must_use]
    pub fn including_zero(self) -> Self {
        Self {
            min: self.min.min(0.0),
            max: self.max.max(0.0),
        }
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::{Extent, ScenePoint, Viewport};

    #[test]
    fn empty_extent_guards_to_unit_span() {
        let guarded = Extent::of(std::iter::empty()).guarded();
        assert_eq!(guarded.as_tuple(), (0.0, 1.0));
    }

    #[test]
    fn single_value_extent_never_collapses() {
        let guarded = Extent::of([4.0, 4.0]).guarded();
        assert_eq!(guarded.as_tuple(), (3.0, 5.0));
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let extent = Extent::of([f64::NAN, 2.0, f64::INFINITY, -3.0]);
        assert_eq!(extent.as_tuple(), (-3.0, 2.0));
    }

    #[test]
    fn client_points_flip_to_scene_space() {
        let point = ScenePoint::from_client(10.0, 30.0, Viewport::new(200, 100));
        assert_eq!(point, ScenePoint::new(10.0, 70.0));
    }
}
