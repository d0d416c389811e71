pub mod band_scale;
pub mod cartesian;
pub mod format;
pub mod histogram;
pub mod polar;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use band_scale::{BandPadding, BandScale};
pub use cartesian::{CartesianInfo, ScaleSettings, TimeRange, XScale};
pub use format::{TickLabelFormatter, abbreviate_number};
pub use histogram::{Bin, HistogramBins};
pub use polar::{PolarFrame, PolarInfo, Wedge, WedgeOrder};
pub use scale::{DEFAULT_TICK_COUNT, LinearScale};
pub use series::{
    CategoryDatum, DataPoint, GroupedSeries, GroupedTable, NamedSeries, SampleSeries, SeriesData,
    SeriesShape, TimeSeries, XKind, XySeries,
};
pub use time_scale::{TimeScale, TimeTickSpec, TimeUnit};
pub use types::{Extent, ScenePoint, Viewport};
