//! Chart facade: builder calls, the render pass and pointer/resize handling.
//!
//! `Chart` is split across controller files the way its concerns split:
//! data binding, options, rendering and interaction each add their own
//! `impl` block.

mod chart;
pub(crate) mod chart_kind;
mod data_controller;
pub mod draw;
mod interaction_controller;
pub(crate) mod lifecycle;
mod options_controller;
mod render_coordinator;
pub mod scales;
pub(crate) mod scene;

pub use chart::Chart;
pub use chart_kind::{BarMode, ChartHooks, ChartKind};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use scene::{BuildContext, BuildFn, DrawContext, DrawFn, DrawOutput, Scales};
