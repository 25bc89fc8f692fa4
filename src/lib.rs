//! histogram-brush: headless range-selection histogram chart.
//!
//! A [`HistogramChart`] draws one bar per data bin and lets the user select a
//! contiguous run of bars with a snapping brush. Selection commits are
//! published as [`api::ChartEvent`]s; drawing goes through the
//! [`render::Renderer`] trait so hosts can plug in cairo or a test renderer.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEvent, HistogramChart, HistogramChartConfig};
pub use error::{ChartError, ChartResult};
