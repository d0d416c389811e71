//! Built-in `draw` hooks plus the shared axis, title and legend passes.

pub mod axis;
pub mod bars;
pub mod decorations;
pub mod histogram;
pub mod lines;
pub mod polar;
pub mod scatter;

use crate::core::{LinearScale, SeriesData, TimeUnit, XKind};
use crate::render::{Color, Drawable, LabelFactory, TextHAlign};

/// Gap between a tick and its label.
pub(crate) const LABEL_GAP_PX: f64 = 2.0;

pub(crate) fn label(
    labels: &dyn LabelFactory,
    text: &str,
    font_size: f64,
    color: Color,
    x: f64,
    y: f64,
    h_align: TextHAlign,
) -> Drawable {
    labels
        .measure_and_rasterize(text, font_size, color)
        .placed(x, y, h_align)
}

/// Pixel of value zero, clamped into the scale's domain.
pub(crate) fn baseline(y: LinearScale) -> f64 {
    let (d0, d1) = y.domain();
    y.domain_to_pixel(0.0_f64.clamp(d0.min(d1), d0.max(d1)))
}

/// Tooltip text of an x value: a calendar label on time axes.
pub(crate) fn format_x(data: &SeriesData, x: f64, unit: Option<TimeUnit>, use_utc: bool) -> String {
    match data {
        SeriesData::Temporal {
            x_kind: XKind::Time,
            ..
        } => crate::core::time_scale::format_time_label(
            x as i64,
            unit.unwrap_or(TimeUnit::Day),
            use_utc,
        ),
        _ => x.to_string(),
    }
}
