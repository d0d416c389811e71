use std::f64::consts::TAU;

use crate::core::types::ScenePoint;
use crate::error::{ChartError, ChartResult};

/// Order in which data values are laid out as wedges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WedgeOrder {
    /// Last datum first, so the first datum ends the sweep.
    Reversed,
    /// Ascending by value; descending when `clockwise` is false.
    ByValue { clockwise: bool },
}

/// One angular slice. Angles advance counter-clockwise from `start_angle_degree`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Index of the datum this wedge was built from.
    pub datum_index: usize,
    pub value: f64,
    pub theta_start: f64,
    pub theta_length: f64,
    /// Start angle in degrees, normalized to `[0, 360)`.
    pub start_angle_degree: f64,
    /// End angle in degrees, normalized to `[0, 360)`.
    pub end_angle_degree: f64,
}

impl Wedge {
    #[must_use]
    pub fn theta_end(&self) -> f64 {
        self.theta_start + self.theta_length
    }

    #[must_use]
    pub fn mid_theta(&self) -> f64 {
        self.theta_start + self.theta_length / 2.0
    }

    /// Whether `degree` (in `[0, 360)`) falls inside this wedge.
    ///
    /// A wedge whose end angle is numerically below its start angle crossed
    /// 0 degrees and covers both `[start, 360)` and `[0, end]`.
    #[must_use]
    pub fn contains_degree(&self, degree: f64) -> bool {
        if self.end_angle_degree > self.start_angle_degree {
            degree >= self.start_angle_degree && degree <= self.end_angle_degree
        } else {
            degree >= self.start_angle_degree || degree <= self.end_angle_degree
        }
    }
}

/// Lays out `values` as wedges starting at `start_degree`.
///
/// Values must be finite and non-negative. A zero total yields no wedges.
pub fn build_wedges(values: &[f64], start_degree: f64, order: WedgeOrder) -> ChartResult<Vec<Wedge>> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(ChartError::InvalidData(format!(
            "wedge values must be finite and >= 0, got {bad}"
        )));
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Ok(Vec::new());
    }

    let mut indices: Vec<usize> = (0..values.len()).collect();
    match order {
        WedgeOrder::Reversed => indices.reverse(),
        WedgeOrder::ByValue { clockwise } => {
            indices.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
            if !clockwise {
                indices.reverse();
            }
        }
    }

    let mut degree = start_degree.rem_euclid(360.0);
    let mut theta = start_degree.to_radians();
    Ok(indices
        .into_iter()
        .map(|datum_index| {
            let share = values[datum_index] / total;
            let sweep = share * 360.0;
            let wedge = Wedge {
                datum_index,
                value: values[datum_index],
                theta_start: theta,
                theta_length: share * TAU,
                start_angle_degree: degree,
                end_angle_degree: (degree + sweep).rem_euclid(360.0),
            };
            theta += wedge.theta_length;
            degree = wedge.end_angle_degree;
            wedge
        })
        .collect())
}

/// Angle of `point` around `origin` in degrees, normalized to `[0, 360)`.
#[must_use]
pub fn angle_degrees(origin: ScenePoint, point: ScenePoint) -> f64 {
    let degree = (point.y - origin.y).atan2(point.x - origin.x).to_degrees();
    let normalized = degree.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Ring geometry shared by pie (inner radius zero) and donut charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFrame {
    pub origin: ScenePoint,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl PolarFrame {
    /// Whether `point` lies inside the hole or beyond the outer edge.
    #[must_use]
    pub fn is_out_of_area(&self, point: ScenePoint) -> bool {
        let distance_sq = (point.x - self.origin.x).powi(2) + (point.y - self.origin.y).powi(2);
        distance_sq < self.inner_radius.powi(2) || distance_sq > self.outer_radius.powi(2)
    }
}

/// Resolved geometry and wedges of a pie or donut.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarInfo {
    pub frame: PolarFrame,
    pub wedges: Vec<Wedge>,
    pub total: f64,
}

impl PolarInfo {
    /// Position of the wedge under `point`, or `None` outside the ring.
    #[must_use]
    pub fn wedge_at(&self, point: ScenePoint) -> Option<usize> {
        if self.frame.is_out_of_area(point) {
            return None;
        }
        let degree = angle_degrees(self.frame.origin, point);
        self.wedges
            .iter()
            .position(|wedge| wedge.theta_length > 0.0 && wedge.contains_degree(degree))
    }

    /// Share of the total held by `wedge`, in percent.
    #[must_use]
    pub fn percent(&self, wedge: &Wedge) -> f64 {
        if self.total > 0.0 {
            wedge.value / self.total * 100.0
        } else {
            0.0
        }
    }
}
