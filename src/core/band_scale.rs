use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Padding applied to a band scale, as fractions of one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPadding {
    pub inner: f64,
    pub outer: f64,
}

impl BandPadding {
    #[must_use]
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    #[must_use]
    pub const fn uniform(padding: f64) -> Self {
        Self::new(padding, padding)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !(0.0..=1.0).contains(&self.inner) || !self.outer.is_finite() || self.outer < 0.0 {
            return Err(ChartError::InvalidOptions(
                "band padding must be inner in [0, 1] and outer >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for BandPadding {
    fn default() -> Self {
        Self::uniform(0.1)
    }
}

/// Ordinal scale over the index set `[0, len)` producing equal-width bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    len: usize,
    range: (f64, f64),
    padding: BandPadding,
    align: f64,
    round: bool,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(len: usize, range: (f64, f64), padding: BandPadding) -> ChartResult<Self> {
        Self::with_options(len, range, padding, 0.5, false)
    }

    pub fn with_options(
        len: usize,
        range: (f64, f64),
        padding: BandPadding,
        align: f64,
        round: bool,
    ) -> ChartResult<Self> {
        padding.validate()?;
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "band range must be finite".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&align) {
            return Err(ChartError::InvalidOptions(
                "band align must be in [0, 1]".to_owned(),
            ));
        }

        let mut scale = Self {
            len,
            range,
            padding,
            align,
            round,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        Ok(scale)
    }

    fn rescale(&mut self) {
        let n = self.len as f64;
        let (r0, r1) = self.range;
        let (mut start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let mut step =
            (stop - start) / (n - self.padding.inner + self.padding.outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        start += (stop - start - step * (n - self.padding.inner)) * self.align;
        let mut bandwidth = step * (1.0 - self.padding.inner);
        if self.round {
            start = start.round();
            bandwidth = bandwidth.round();
        }
        self.start = start;
        self.step = step;
        self.bandwidth = bandwidth;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn padding(&self) -> BandPadding {
        self.padding
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start pixel of band `index`, or `None` outside the domain.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        if index >= self.len {
            return None;
        }
        let slot = if self.range.1 < self.range.0 {
            // Reversed ranges hand out bands from the far end.
            self.len - 1 - index
        } else {
            index
        };
        Some(self.start + self.step * slot as f64)
    }

    /// Center pixel of band `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|start| start + self.bandwidth / 2.0)
    }

    /// Index of the band whose `[start, start + bandwidth]` span contains `pixel`.
    #[must_use]
    pub fn index_at(&self, pixel: f64) -> Option<usize> {
        if self.len == 0 || self.step <= 0.0 || !pixel.is_finite() {
            return None;
        }
        let slot = ((pixel - self.start) / self.step).floor();
        if slot < 0.0 || slot >= self.len as f64 {
            return None;
        }
        let slot = slot as usize;
        let index = if self.range.1 < self.range.0 {
            self.len - 1 - slot
        } else {
            slot
        };
        let band_start = self.position(index)?;
        (pixel >= band_start && pixel <= band_start + self.bandwidth).then_some(index)
    }

    /// Same domain and padding re-pinned onto a new pixel range.
    #[must_use]
    pub fn with_range(&self, range: (f64, f64)) -> Self {
        let mut scale = Self {
            range,
            ..self.clone()
        };
        scale.rescale();
        scale
    }
}

#[cfg(test)]
mod tests {
    use super::{BandPadding, BandScale};
    use approx::assert_relative_eq;

    #[test]
    fn bands_follow_reference_layout() {
        let scale = BandScale::new(3, (0.0, 300.0), BandPadding::uniform(0.1)).expect("band");
        let step = 300.0 / 3.1;
        assert_relative_eq!(scale.step(), step, epsilon = 1e-9);
        assert_relative_eq!(scale.bandwidth(), step * 0.9, epsilon = 1e-9);
        assert_relative_eq!(scale.position(0).expect("band 0"), step * 0.1, epsilon = 1e-9);
    }

    #[test]
    fn zero_padding_splits_range_evenly() {
        let scale = BandScale::new(4, (0.0, 100.0), BandPadding::uniform(0.0)).expect("band");
        assert_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.position(3), Some(75.0));
        assert_eq!(scale.position(4), None);
    }

    #[test]
    fn index_at_skips_padding_gaps() {
        let scale = BandScale::new(2, (0.0, 100.0), BandPadding::new(0.5, 0.0)).expect("band");
        let step = scale.step();
        assert_eq!(scale.index_at(1.0), Some(0));
        assert_eq!(scale.index_at(step * 0.75), None);
        assert_eq!(scale.index_at(step + 1.0), Some(1));
    }

    #[test]
    fn round_mode_floors_step() {
        let scale = BandScale::with_options(3, (0.0, 100.0), BandPadding::uniform(0.0), 0.5, true)
            .expect("band");
        assert_eq!(scale.step(), 33.0);
        assert_eq!(scale.position(0), Some(1.0));
    }
}
