use std::cell::RefCell;
use std::rc::Rc;

use histogram_brush::api::{
    ChartEvent, HistogramChart, HistogramChartConfig, position_axis_tip,
};
use histogram_brush::core::{DataPoint, IndexRange, Margins};
use histogram_brush::render::NullRenderer;
use proptest::prelude::*;

fn chart(bins: usize, width: u32) -> HistogramChart<NullRenderer> {
    let config = HistogramChartConfig::new(width, 60).with_margins(Margins::default());
    let mut chart = HistogramChart::new(NullRenderer::default(), config).expect("chart init");
    let data = (0..bins).map(|i| DataPoint::new((i % 5) as f64)).collect();
    chart.replace_data(data).expect("replace data");
    chart
}

proptest! {
    #[test]
    fn committed_ranges_stay_inside_the_data(
        bins in 1usize..40,
        start in -50.0f64..450.0,
        end in -50.0f64..450.0
    ) {
        let mut chart = chart(bins, 400);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = chart.subscribe_events(move |event| {
            if let ChartEvent::OnBrushEnd { lo, hi } = event {
                sink.borrow_mut().push((*lo, *hi));
            }
        });

        chart.pointer_down(start);
        chart.pointer_move(end);
        chart.pointer_up(end);

        if let Some(range) = chart.selection() {
            prop_assert!(range.lo() < range.hi());
            prop_assert!(range.hi() <= bins);
            prop_assert_eq!(seen.borrow().last().copied(), Some((range.lo(), range.hi())));
        } else {
            prop_assert!(seen.borrow().is_empty());
        }
        prop_assert!(!chart.is_dragging());
    }

    #[test]
    fn committed_brush_sits_on_bar_bounds(
        bins in 1usize..40,
        start in 0.0f64..400.0,
        end in 0.0f64..400.0
    ) {
        let mut chart = chart(bins, 400);
        chart.pointer_down(start);
        chart.pointer_move(end);
        chart.pointer_up(end);

        let range = chart.selection().expect("pointer inside the plot always selects");
        let bar_width = 400.0 / bins as f64;
        let (lo, hi) = chart.brush_pixels().expect("brush pixels");
        prop_assert!((lo - range.lo() as f64 * bar_width).abs() <= 1e-6);
        prop_assert!((hi - range.hi() as f64 * bar_width).abs() <= 1e-6);
    }

    #[test]
    fn resize_preserves_selected_indices(
        bins in 1usize..30,
        lo in 0usize..30,
        len in 1usize..30,
        width in 50u32..1200
    ) {
        let mut chart = chart(bins, 400);
        prop_assume!(lo < bins);
        let hi = (lo + len).min(bins);
        prop_assert!(chart.select_range(lo, hi));
        let before = chart.selection();

        chart.resize(width).expect("resize");
        prop_assert_eq!(chart.selection(), before);

        let range: IndexRange = before.expect("selection");
        let bar_width = f64::from(width) / bins as f64;
        let (lo_px, hi_px) = chart.brush_pixels().expect("brush pixels");
        prop_assert!((lo_px - range.lo() as f64 * bar_width).abs() <= 1e-6);
        prop_assert!((hi_px - range.hi() as f64 * bar_width).abs() <= 1e-6);
    }

    #[test]
    fn axis_tips_never_leave_the_plot(
        plot_width in 1.0f64..2_000.0,
        handle_factor in 0.0f64..=1.0,
        box_width in 0.0f64..3_000.0
    ) {
        let handle_x = plot_width * handle_factor;
        let layout = position_axis_tip(handle_x, box_width, plot_width);
        prop_assert!(layout.left >= 0.0);
        prop_assert!(layout.right() <= plot_width + 1e-9);
        prop_assert!(layout.width <= plot_width);
    }
}
