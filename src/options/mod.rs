pub mod cascade;
pub mod merge;
pub mod schema;
pub mod theme;

pub use cascade::{OptionLayers, merge_document, plot_bucket, resolve};
pub use merge::{merge_all, merge_layers};
pub use schema::{
    AreaPlotOptions, BarPlotOptions, DonutPlotOptions, HistogramPlotOptions, LabelPosition,
    LegendOptions, LinePlotOptions, PiePlotOptions, PlotOptions, ResolvedOptions,
    ScatterPlotOptions, TextStyle,
};
pub use theme::{DEFAULT_THEME, ThemeRegistry};
