use std::cell::RefCell;
use std::rc::Rc;

use histogram_brush::api::{ChartEvent, HistogramChart, HistogramChartConfig, Subscription};
use histogram_brush::core::{DataPoint, Margins};
use histogram_brush::interaction::HoverPayload;
use histogram_brush::render::NullRenderer;

// Ten bins with freq = index; the tallest bar is 9.
fn chart() -> HistogramChart<NullRenderer> {
    let config = HistogramChartConfig::new(400, 70).with_margins(Margins::default());
    let mut chart = HistogramChart::new(NullRenderer::default(), config).expect("chart init");
    let data = (0..10).map(|i| DataPoint::new(i as f64)).collect();
    chart.replace_data(data).expect("replace data");
    chart
}

fn hover_payloads(
    chart: &HistogramChart<NullRenderer>,
) -> (Rc<RefCell<Vec<Option<HoverPayload>>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = chart.subscribe_events(move |event| {
        if let ChartEvent::Hover { payload } = event {
            sink.borrow_mut().push(payload.clone());
        }
    });
    (seen, subscription)
}

#[test]
fn hover_over_bar_reports_tooltip_anchor() {
    let mut chart = chart();
    let (seen, _subscription) = hover_payloads(&chart);

    chart.hover_move(100.0, 30.0);

    let seen = seen.borrow();
    let payload = seen[0].as_ref().expect("payload");
    assert!((payload.left - 100.0).abs() <= 1e-9);
    // bar 2 has height 70 * 2 / 9, its top sits at 70 - that
    let expected_top = 70.0 - 70.0 * 2.0 / 9.0 - 20.0;
    assert!((payload.top - expected_top).abs() <= 1e-9);
    assert_eq!(payload.data, "2");
    assert_eq!(chart.state().highlighted_bar(), Some(2));
}

#[test]
fn hover_outside_bars_is_ignored() {
    let mut chart = chart();
    let (seen, _subscription) = hover_payloads(&chart);

    chart.hover_move(-3.0, 10.0);
    chart.hover_move(400.0, 10.0);

    assert!(seen.borrow().is_empty());
    assert_eq!(chart.state().highlighted_bar(), None);
}

#[test]
fn empty_bars_and_bars_outside_selection_hide_the_tooltip() {
    let mut chart = chart();
    let (seen, _subscription) = hover_payloads(&chart);

    chart.hover_move(10.0, 10.0);
    assert!(chart.select_range(5, 7));
    chart.hover_move(100.0, 10.0);
    chart.hover_move(210.0, 10.0);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].is_none());
    assert!(seen[1].is_none());
    assert_eq!(seen[2].as_ref().map(|payload| payload.data.as_str()), Some("5"));
}

#[test]
fn hover_during_drag_hides_the_tooltip() {
    let mut chart = chart();
    let (seen, _subscription) = hover_payloads(&chart);

    chart.pointer_down(100.0);
    chart.hover_move(140.0, 10.0);

    assert_eq!(*seen.borrow(), vec![None]);
}

#[test]
fn hover_leave_clears_highlight() {
    let mut chart = chart();
    let (seen, _subscription) = hover_payloads(&chart);

    chart.hover_move(100.0, 30.0);
    chart.hover_leave();

    assert_eq!(chart.state().highlighted_bar(), None);
    assert_eq!(seen.borrow().last(), Some(&None));
}

#[test]
fn tooltip_follows_expanded_position() {
    let mut chart = chart();
    chart.expand(30);
    let (seen, _subscription) = hover_payloads(&chart);

    chart.hover_move(100.0, 30.0);

    let seen = seen.borrow();
    let payload = seen[0].as_ref().expect("payload");
    let expected_top = 30.0 + 70.0 - 70.0 * 2.0 / 9.0 - 20.0;
    assert!((payload.top - expected_top).abs() <= 1e-9);
}
