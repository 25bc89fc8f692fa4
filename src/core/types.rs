use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound of the index-scale domain. Brush extents live in `[0, EXTENT_DOMAIN_MAX]`.
pub const EXTENT_DOMAIN_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Drawable region left after subtracting margins from the canvas.
///
/// All pointer coordinates handed to the chart are local to this area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn from_canvas(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            width: (width - margins.left - margins.right).max(0.0),
            height: (height - margins.top - margins.bottom).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Numeric,
    Time,
}

/// Axis interval covered by one bin.
///
/// For time charts both edges are UNIX seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinSpan {
    pub start: f64,
    pub end: f64,
}

/// One frequency-binned sample. Position in the data sequence is the bin index.
///
/// Numeric and time charts both read `start`/`end` for axis values; time
/// charts store UNIX seconds there.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub freq: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl DataPoint {
    #[must_use]
    pub fn new(freq: f64) -> Self {
        Self {
            freq,
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn with_span(start: f64, end: f64, freq: f64) -> Self {
        Self {
            freq,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Bin without a sample. Counts as zero frequency everywhere.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn span(self) -> Option<BinSpan> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(BinSpan { start, end }),
            _ => None,
        }
    }
}

/// Replaces values that cannot be drawn with empty defaults.
///
/// Non-finite or negative frequencies become zero; non-finite span edges are dropped.
#[must_use]
pub fn canonicalize_bins(mut data: Vec<DataPoint>) -> Vec<DataPoint> {
    let mut repaired = 0usize;
    for point in &mut data {
        if !point.freq.is_finite() || point.freq < 0.0 {
            point.freq = 0.0;
            repaired += 1;
        }
        for edge in [&mut point.start, &mut point.end] {
            if edge.is_some_and(|value| !value.is_finite()) {
                *edge = None;
                repaired += 1;
            }
        }
    }
    if repaired > 0 {
        warn!(repaired, "replaced invalid bin values with empty defaults");
    }
    data
}

/// Committed half-open bar range `[lo, hi)`. Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IndexRange {
    lo: usize,
    hi: usize,
}

impl IndexRange {
    /// Returns `None` unless `lo < hi`.
    #[must_use]
    pub fn new(lo: usize, hi: usize) -> Option<Self> {
        (lo < hi).then_some(Self { lo, hi })
    }

    #[must_use]
    pub fn lo(self) -> usize {
        self.lo
    }

    #[must_use]
    pub fn hi(self) -> usize {
        self.hi
    }

    #[must_use]
    pub fn bar_count(self) -> usize {
        self.hi - self.lo
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.lo && index < self.hi
    }
}

/// Brush span in index-scale domain units (`[0, 100]`), independent of pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BrushExtent {
    pub lo: f64,
    pub hi: f64,
}

impl BrushExtent {
    /// Orders and clamps both edges into the extent domain.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        let a = clamp_domain(a);
        let b = clamp_domain(b);
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    #[must_use]
    pub fn collapsed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.lo == self.hi
    }

    /// Linear blend used by brush transitions.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self::new(
            self.lo + (to.lo - self.lo) * t,
            self.hi + (to.hi - self.hi) * t,
        )
    }
}

fn clamp_domain(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, EXTENT_DOMAIN_MAX)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPosition {
    pub x: f64,
    pub y: f64,
}
