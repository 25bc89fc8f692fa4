use crate::core::types::{BrushExtent, EXTENT_DOMAIN_MAX, IndexRange, PlotArea};
use crate::core::scale::LinearScale;

/// Converts between plot x-coordinates, discrete bar indices and extent positions.
///
/// Bar width is derived from the current plot width and bar count each time a
/// mapper is built; a mapper must not outlive a data or width change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarIndexMapper {
    bar_count: usize,
    bar_width: f64,
    index_scale: LinearScale,
}

impl BarIndexMapper {
    /// Returns `None` for empty data or a collapsed plot.
    #[must_use]
    pub fn new(bar_count: usize, plot: PlotArea, index_scale: LinearScale) -> Option<Self> {
        if bar_count == 0 || !plot.width.is_finite() || plot.width <= 0.0 {
            return None;
        }
        Some(Self {
            bar_count,
            bar_width: plot.width / bar_count as f64,
            index_scale,
        })
    }

    #[must_use]
    pub fn bar_count(self) -> usize {
        self.bar_count
    }

    #[must_use]
    pub fn bar_width(self) -> f64 {
        self.bar_width
    }

    /// Bar under `x`, or `None` when `x` falls outside every bar.
    #[must_use]
    pub fn pixel_to_index(self, x: f64) -> Option<usize> {
        if !x.is_finite() {
            return None;
        }
        let index = (x / self.bar_width).floor();
        if index < 0.0 || index >= self.bar_count as f64 {
            return None;
        }
        Some(index as usize)
    }

    /// Nearest bar boundary to `x`, clamped to `[0, bar_count]`.
    #[must_use]
    pub fn boundary_index(self, x: f64) -> usize {
        if !x.is_finite() {
            return 0;
        }
        let index = (x / self.bar_width).round().max(0.0) as usize;
        index.min(self.bar_count)
    }

    /// Extent-domain position of the left edge of bar `index`.
    #[must_use]
    pub fn index_to_domain_position(self, index: usize) -> f64 {
        index as f64 * (EXTENT_DOMAIN_MAX / self.bar_count as f64)
    }

    /// Brush extent whose edges sit exactly on the bounds of `range`.
    #[must_use]
    pub fn snapped_extent(self, range: IndexRange) -> BrushExtent {
        BrushExtent::new(
            self.index_to_domain_position(range.lo()),
            self.index_to_domain_position(range.hi()),
        )
    }

    #[must_use]
    pub fn extent_to_pixels(self, extent: BrushExtent) -> (f64, f64) {
        (
            self.index_scale.map(extent.lo),
            self.index_scale.map(extent.hi),
        )
    }

    #[must_use]
    pub fn pixel_to_domain(self, x: f64) -> f64 {
        self.index_scale.invert(x)
    }

    /// Left edge of bar `index` in plot pixels.
    #[must_use]
    pub fn bar_x(self, index: usize) -> f64 {
        index as f64 * self.bar_width
    }

    /// Whether bar `index` intersects the pixel span `[lo_px, hi_px]`.
    ///
    /// A bar counts when one of its edges lies strictly inside the span or when
    /// it covers the whole span. Edges are floored to whole pixels so that a
    /// brush snapped to bar bounds highlights exactly the committed bars.
    #[must_use]
    pub fn bar_overlaps_extent(self, index: usize, lo_px: f64, hi_px: f64) -> bool {
        let a = floor_px(self.bar_x(index));
        let b = floor_px(self.bar_x(index + 1));
        let lo = floor_px(lo_px);
        let hi = floor_px(hi_px);
        (a > lo && a < hi) || (b > lo && b < hi) || (a <= lo && b >= hi)
    }

    /// Bounds of the bars overlapping `extent`, if any.
    #[must_use]
    pub fn highlighted_range(self, extent: BrushExtent) -> Option<IndexRange> {
        if extent.is_empty() {
            return None;
        }
        let (lo_px, hi_px) = self.extent_to_pixels(extent);
        let overlaps = |index: usize| self.bar_overlaps_extent(index, lo_px, hi_px);
        let first = (0..self.bar_count).find(|&index| overlaps(index))?;
        let last = (first..self.bar_count)
            .rev()
            .find(|&index| overlaps(index))
            .unwrap_or(first);
        IndexRange::new(first, last + 1)
    }
}

// Absorbs float noise between `i * bar_width` and the index-scale round trip.
fn floor_px(value: f64) -> f64 {
    (value + 1e-6).floor()
}

/// Widens a single bar position `index` to a one-bar range.
///
/// Ranges never extend past the data end: at or beyond the last bar the
/// range steps back by one.
#[must_use]
pub fn single_bar_range(index: usize, bar_count: usize) -> Option<IndexRange> {
    if bar_count == 0 {
        return None;
    }
    let index = index.min(bar_count);
    if index + 1 >= bar_count && index > 0 {
        IndexRange::new(index - 1, index)
    } else {
        IndexRange::new(index, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(bar_count: usize, width: f64) -> BarIndexMapper {
        let plot = PlotArea {
            width,
            height: 100.0,
        };
        let index_scale = LinearScale::index_scale(plot).expect("index scale");
        BarIndexMapper::new(bar_count, plot, index_scale).expect("mapper")
    }

    #[test]
    fn pixel_outside_plot_is_no_bar() {
        let mapper = mapper(10, 400.0);
        assert_eq!(mapper.pixel_to_index(-0.5), None);
        assert_eq!(mapper.pixel_to_index(400.0), None);
        assert_eq!(mapper.pixel_to_index(399.9), Some(9));
        assert_eq!(mapper.pixel_to_index(0.0), Some(0));
    }

    #[test]
    fn boundary_index_rounds_and_clamps() {
        let mapper = mapper(10, 400.0);
        assert_eq!(mapper.boundary_index(59.0), 1);
        assert_eq!(mapper.boundary_index(61.0), 2);
        assert_eq!(mapper.boundary_index(-20.0), 0);
        assert_eq!(mapper.boundary_index(1_000.0), 10);
    }

    #[test]
    fn overlap_predicate_matches_pixel_rules() {
        let mapper = mapper(10, 400.0);
        // bar 2 spans [80, 120)
        assert!(mapper.bar_overlaps_extent(2, 85.0, 95.0));
        assert!(mapper.bar_overlaps_extent(2, 70.0, 90.0));
        assert!(!mapper.bar_overlaps_extent(2, 120.0, 160.0));
        assert!(!mapper.bar_overlaps_extent(2, 40.0, 80.0));
    }

    #[test]
    fn highlighted_range_covers_every_touched_bar() {
        let mapper = mapper(10, 400.0);
        let extent = BrushExtent::new(85.0 / 4.0, 245.0 / 4.0);
        let range = mapper.highlighted_range(extent).expect("range");
        assert_eq!((range.lo(), range.hi()), (2, 7));
        assert_eq!(range.bar_count(), 5);

        let inside_one_bar = BrushExtent::new(82.0 / 4.0, 90.0 / 4.0);
        assert_eq!(mapper.highlighted_range(inside_one_bar), IndexRange::new(2, 3));
        assert_eq!(mapper.highlighted_range(BrushExtent::collapsed()), None);
    }

    #[test]
    fn empty_data_has_no_mapper() {
        let plot = PlotArea {
            width: 100.0,
            height: 100.0,
        };
        let index_scale = LinearScale::index_scale(plot).expect("index scale");
        assert!(BarIndexMapper::new(0, plot, index_scale).is_none());
    }

    #[test]
    fn single_bar_range_guards_the_data_end() {
        assert_eq!(single_bar_range(3, 10), IndexRange::new(3, 4));
        assert_eq!(single_bar_range(9, 10), IndexRange::new(8, 9));
        assert_eq!(single_bar_range(10, 10), IndexRange::new(9, 10));
        assert_eq!(single_bar_range(0, 1), IndexRange::new(0, 1));
        assert_eq!(single_bar_range(0, 0), None);
    }
}
