//! scene-charts: declarative charting core over a retained scene graph.
//!
//! A [`Chart`] turns bound data and layered JSON options into drawables:
//! options are resolved through the theme cascade, a margin-inset
//! rectangle is laid out, scales are built for it, and the chart kind's draw
//! hook emits primitives that a [`render::SceneRenderer`] retains between
//! frames. Pointer positions are hit-tested back to bars, points or wedges.
//!
//! Scene coordinates are y-up with the origin at the bottom-left corner.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod options;
pub mod render;
pub mod telemetry;

pub use api::{BarMode, Chart, ChartKind};
pub use error::{ChartError, ChartResult};
pub use render::NullRenderer;
