use ordered_float::OrderedFloat;

use crate::core::ticks;
use crate::core::types::Extent;

/// Sturges' rule: `ceil(log2(n)) + 1` bins for `n` samples.
#[must_use]
pub fn sturges_count(sample_count: usize) -> usize {
    if sample_count <= 1 {
        return 1;
    }
    (sample_count as f64).log2().ceil() as usize + 1
}

/// Interior bin thresholds: round-number ticks strictly inside `(min, max)`.
#[must_use]
pub fn bin_thresholds(extent: Extent, bin_count: usize) -> Vec<f64> {
    if extent.is_empty() || extent.min == extent.max {
        return Vec::new();
    }
    ticks::ticks(extent.min, extent.max, bin_count)
        .into_iter()
        .filter(|&value| value > extent.min && value < extent.max)
        .collect()
}

/// One histogram bin. Bins are half-open `[x0, x1)` except the last, which
/// also holds `x1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub index: usize,
    pub x0: f64,
    pub x1: f64,
}

/// Bins shared by every series of a histogram, with per-series counts.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    bins: Vec<Bin>,
    counts: Vec<Vec<usize>>,
    unique_values: Vec<f64>,
}

impl HistogramBins {
    /// Bins all series over their union extent.
    ///
    /// The bin count follows Sturges' rule on the largest series so every
    /// series shares the same edges and bins are keyed by index.
    #[must_use]
    pub fn compute<S: AsRef<[f64]>>(series: &[S]) -> Self {
        let mut unique: Vec<OrderedFloat<f64>> = series
            .iter()
            .flat_map(|values| values.as_ref().iter().copied())
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .collect();
        unique.sort_unstable();
        unique.dedup();
        let unique_values: Vec<f64> = unique.into_iter().map(OrderedFloat::into_inner).collect();

        let extent = Extent::of(unique_values.iter().copied());
        if extent.is_empty() {
            return Self {
                bins: Vec::new(),
                counts: vec![Vec::new(); series.len()],
                unique_values,
            };
        }

        let largest = series
            .iter()
            .map(|values| values.as_ref().iter().filter(|v| v.is_finite()).count())
            .max()
            .unwrap_or(0);
        let thresholds = bin_thresholds(extent, sturges_count(largest));

        let mut edges = Vec::with_capacity(thresholds.len() + 2);
        edges.push(extent.min);
        edges.extend(thresholds);
        edges.push(extent.max);
        let bins: Vec<Bin> = edges
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Bin {
                index,
                x0: pair[0],
                x1: pair[1],
            })
            .collect();

        let counts = series
            .iter()
            .map(|values| {
                let mut per_bin = vec![0usize; bins.len()];
                for &value in values.as_ref().iter().filter(|v| v.is_finite()) {
                    per_bin[locate_bin(&bins, value)] += 1;
                }
                per_bin
            })
            .collect();

        Self {
            bins,
            counts,
            unique_values,
        }
    }

    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Per-bin counts of series `series_index`.
    #[must_use]
    pub fn counts(&self, series_index: usize) -> &[usize] {
        self.counts.get(series_index).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.counts.len()
    }

    /// De-duplicated sorted union of all finite sample values.
    #[must_use]
    pub fn unique_values(&self) -> &[f64] {
        &self.unique_values
    }

    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|per_bin| per_bin.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

fn locate_bin(bins: &[Bin], value: f64) -> usize {
    // First bin whose upper edge is beyond the value; the last bin is closed.
    let index = bins.partition_point(|bin| bin.x1 <= value);
    index.min(bins.len().saturating_sub(1))
}
