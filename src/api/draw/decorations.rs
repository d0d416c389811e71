//! Title and legend, both placed in the header band above the plot.
//!
//! The header band starts at the default top margin and grows downward; the
//! layout reserves its height before scales are built.

use crate::api::draw::label;
use crate::core::{ScenePoint, SeriesData, Viewport};
use crate::layout::Margins;
use crate::options::ResolvedOptions;
use crate::render::{CirclePrimitive, Drawable, DrawableGraph, LabelFactory, LayerKind, TextHAlign};

const ROW_HEIGHT_FACTOR: f64 = 1.5;

fn title_text(options: &ResolvedOptions) -> Option<&str> {
    options
        .title
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty())
}

fn title_height(options: &ResolvedOptions) -> f64 {
    title_text(options).map_or(0.0, |_| options.title.style.font_size * ROW_HEIGHT_FACTOR)
}

/// Legend entries: named series, or categories for category-keyed kinds.
fn legend_entries(options: &ResolvedOptions, data: &SeriesData) -> Vec<(usize, String)> {
    if !options.legend.show {
        return Vec::new();
    }
    data.series_names()
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| name.filter(|n| !n.is_empty()).map(|n| (i, n)))
        .collect()
}

struct LegendGrid {
    columns: usize,
    rows: usize,
    row_height: f64,
    column_width: f64,
}

fn legend_grid(
    options: &ResolvedOptions,
    labels: &dyn LabelFactory,
    entries: &[(usize, String)],
) -> Option<LegendGrid> {
    if entries.is_empty() {
        return None;
    }
    let legend = &options.legend;
    let columns = (entries.len() as f64).sqrt().ceil() as usize;
    let rows = entries.len().div_ceil(columns);
    let widest = entries
        .iter()
        .map(|(_, name)| {
            labels
                .measure_and_rasterize(name, legend.style.font_size, legend.style.color)
                .measured_width
        })
        .fold(0.0, f64::max);
    Some(LegendGrid {
        columns,
        rows,
        row_height: legend.style.font_size * ROW_HEIGHT_FACTOR,
        column_width: 2.0 * legend.marker_radius + 3.0 * legend.gap + widest,
    })
}

/// Height the header band needs for the title and legend.
pub(crate) fn header_height(
    options: &ResolvedOptions,
    data: &SeriesData,
    labels: &dyn LabelFactory,
) -> f64 {
    let entries = legend_entries(options, data);
    let legend = legend_grid(options, labels, &entries)
        .map_or(0.0, |grid| grid.rows as f64 * grid.row_height + options.legend.gap);
    title_height(options) + legend
}

pub(crate) fn draw_title(
    options: &ResolvedOptions,
    labels: &dyn LabelFactory,
    size: Viewport,
    margins: Margins,
    defaults: Margins,
    graph: &mut DrawableGraph,
) {
    let Some(text) = title_text(options) else {
        return;
    };
    let style = &options.title.style;
    let band_top = f64::from(size.height) - defaults.top;
    let x = margins.left + (f64::from(size.width) - margins.left - margins.right) / 2.0;
    graph.push(
        LayerKind::Labels,
        label(
            labels,
            text,
            style.font_size,
            style.color,
            x,
            band_top - title_height(options) / 2.0,
            TextHAlign::Center,
        ),
    );
}

/// Marker and name per entry, in a grid anchored at the top-right corner.
pub(crate) fn draw_legend(
    options: &ResolvedOptions,
    data: &SeriesData,
    labels: &dyn LabelFactory,
    size: Viewport,
    defaults: Margins,
    graph: &mut DrawableGraph,
) {
    let entries = legend_entries(options, data);
    let Some(grid) = legend_grid(options, labels, &entries) else {
        return;
    };
    let legend = &options.legend;
    let top = f64::from(size.height) - defaults.top - title_height(options);
    let left = f64::from(size.width) - defaults.right - grid.columns as f64 * grid.column_width;

    for (slot, (series, name)) in entries.iter().enumerate() {
        let column = slot % grid.columns;
        let row = slot / grid.columns;
        let x = left + column as f64 * grid.column_width;
        let y = top - (row as f64 + 0.5) * grid.row_height;
        graph.push(
            LayerKind::Labels,
            Drawable::Circle(CirclePrimitive {
                center: ScenePoint::new(x + legend.marker_radius, y),
                radius: legend.marker_radius,
                fill_color: options.color_at(*series),
            }),
        );
        graph.push(
            LayerKind::Labels,
            label(
                labels,
                name,
                legend.style.font_size,
                legend.style.color,
                x + 2.0 * legend.marker_radius + legend.gap,
                y,
                TextHAlign::Left,
            ),
        );
    }
}
