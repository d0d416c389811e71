use crate::core::ticks;
use crate::core::types::Extent;
use crate::error::{ChartError, ChartResult};

/// Default number of ticks requested from continuous scales.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Continuous linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Builds a scale from a raw data extent, guarding degenerate input and
    /// optionally rounding the domain outward.
    pub fn from_extent(
        extent: Extent,
        range: (f64, f64),
        nice_count: Option<usize>,
    ) -> ChartResult<Self> {
        let guarded = extent.guarded();
        let scale = Self::new(guarded.as_tuple(), range)?;
        Ok(match nice_count {
            Some(count) => scale.nice(count),
            None => scale,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Same domain re-pinned onto a new pixel range.
    #[must_use]
    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self {
            range_start: range.0,
            range_end: range.1,
            ..self
        }
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Pixel length covered by `value` measured from the domain start.
    #[must_use]
    pub fn extent_to_pixels(self, value: f64) -> f64 {
        self.domain_to_pixel(value) - self.range_start
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks::ticks(self.domain_start, self.domain_end, count)
    }

    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        ticks::tick_step(self.domain_start, self.domain_end, count)
    }

    /// Rounds the domain outward so its endpoints land on tick boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (domain_start, domain_end) =
            ticks::nice_bounds(self.domain_start, self.domain_end, count);
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }
}
