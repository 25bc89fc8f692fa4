pub mod axis_scale;
pub mod bar_index;
pub mod histogram_series;
pub mod primitives;
pub mod scale;
pub mod types;

pub use axis_scale::{AxisScale, AxisValue, division_offsets};
pub use bar_index::{BarIndexMapper, single_bar_range};
pub use histogram_series::{BarGeometry, bar_height, project_histogram_bars};
pub use scale::{LinearScale, max_frequency};
pub use types::{
    BinSpan, BrushExtent, ChartKind, ChartPosition, DataPoint, EXTENT_DOMAIN_MAX, IndexRange,
    Margins, PlotArea, Viewport, canonicalize_bins,
};
