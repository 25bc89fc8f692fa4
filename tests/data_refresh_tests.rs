use std::cell::RefCell;
use std::rc::Rc;

use histogram_brush::api::{ChartEvent, HistogramChart, HistogramChartConfig, StateChange};
use histogram_brush::core::{DataPoint, IndexRange, Margins};
use histogram_brush::error::ChartError;
use histogram_brush::render::NullRenderer;

fn chart() -> HistogramChart<NullRenderer> {
    let config = HistogramChartConfig::new(400, 70).with_margins(Margins::default());
    HistogramChart::new(NullRenderer::default(), config).expect("chart init")
}

fn bins(count: usize, freq: f64) -> Vec<DataPoint> {
    (0..count).map(|_| DataPoint::new(freq)).collect()
}

#[test]
fn data_length_change_clears_the_selection() {
    let mut chart = chart();
    chart.replace_data(bins(10, 3.0)).expect("replace data");
    assert!(chart.select_range(2, 5));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _subscription = chart.subscribe_events(move |event| sink.borrow_mut().push(event.clone()));

    chart.replace_data(bins(12, 3.0)).expect("replace data");

    assert_eq!(chart.selection(), None);
    assert!(chart.brush_extent().is_empty());
    assert_eq!(*seen.borrow(), vec![ChartEvent::RangeUpdated { range: None }]);
}

#[test]
fn same_length_replace_keeps_the_selection() {
    let mut chart = chart();
    chart.replace_data(bins(10, 3.0)).expect("replace data");
    assert!(chart.select_range(2, 5));

    chart.replace_data(bins(10, 8.0)).expect("replace data");
    assert_eq!(chart.selection(), IndexRange::new(2, 5));
    assert!(chart.data().iter().all(|point| point.freq == 8.0));
}

#[test]
fn refresh_rejects_a_different_bin_count() {
    let mut chart = chart();
    chart.replace_data(bins(10, 3.0)).expect("replace data");

    let err = chart
        .refresh_data(bins(9, 3.0))
        .expect_err("length mismatch must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(chart.data().len(), 10);
}

#[test]
fn refresh_animates_bars_from_displayed_heights() {
    let mut chart = chart();
    let mut data = bins(4, 1.0);
    data[3].freq = 10.0;
    chart.replace_data(data.clone()).expect("replace data");
    while chart.advance(std::time::Duration::from_millis(100)) {}

    data[0].freq = 10.0;
    chart.refresh_data(data).expect("refresh");

    let snapshot = chart.snapshot().expect("snapshot");
    assert!((snapshot.bars[0].height - 70.0).abs() <= 1e-9);

    let frame = chart.build_frame().expect("frame");
    let bars = &frame
        .layer(histogram_brush::render::ChartLayer::Bars)
        .expect("bars layer")
        .rects;
    assert!((bars[0].height - 7.0).abs() <= 1e-9);

    chart.advance(std::time::Duration::from_millis(200));
    assert!(chart.transitions().is_idle());
    let frame = chart.build_frame().expect("frame");
    let bars = &frame
        .layer(histogram_brush::render::ChartLayer::Bars)
        .expect("bars layer")
        .rects;
    assert!((bars[0].height - 70.0).abs() <= 1e-9);
}

#[test]
fn invalid_frequencies_become_empty_bins() {
    let mut chart = chart();
    chart
        .replace_data(vec![
            DataPoint::new(f64::NAN),
            DataPoint::new(-4.0),
            DataPoint::new(f64::INFINITY),
            DataPoint::new(5.0),
        ])
        .expect("replace data");

    let freqs: Vec<f64> = chart.data().iter().map(|point| point.freq).collect();
    assert_eq!(freqs, vec![0.0, 0.0, 0.0, 5.0]);
}

#[test]
fn replace_publishes_data_state_change() {
    let mut chart = chart();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _subscription = chart.subscribe_state(move |change| sink.borrow_mut().push(change.clone()));

    chart.replace_data(bins(3, 1.0)).expect("replace data");
    assert!(seen.borrow().contains(&StateChange::Data {
        previous_len: 0,
        current_len: 3,
    }));
}

#[test]
fn reset_clears_selection_and_replays_enter_animation() {
    let mut chart = chart();
    chart.replace_data(bins(6, 2.0)).expect("replace data");
    assert!(chart.select_range(1, 3));
    while chart.advance(std::time::Duration::from_millis(100)) {}

    chart.reset().expect("reset");
    assert_eq!(chart.selection(), None);
    assert!(
        chart
            .transitions()
            .is_active(histogram_brush::api::TransitionTarget::Bars)
    );
}
