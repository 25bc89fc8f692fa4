use histogram_brush::core::{
    BarIndexMapper, DataPoint, LinearScale, PlotArea, bar_height, project_histogram_bars,
};

fn plot() -> PlotArea {
    PlotArea {
        width: 300.0,
        height: 70.0,
    }
}

fn mapper(bar_count: usize) -> Option<BarIndexMapper> {
    let index_scale = LinearScale::index_scale(plot()).expect("index scale");
    BarIndexMapper::new(bar_count, plot(), index_scale)
}

#[test]
fn projection_returns_empty_without_data() {
    let value_scale = LinearScale::value_scale(&[], plot()).expect("value scale");
    let bars = project_histogram_bars(&[], mapper(0), value_scale, plot(), 2.0).expect("project");
    assert!(bars.is_empty());
}

#[test]
fn projection_rejects_negative_minimum_height() {
    let data = vec![DataPoint::new(1.0)];
    let value_scale = LinearScale::value_scale(&data, plot()).expect("value scale");
    let err = project_histogram_bars(&data, mapper(1), value_scale, plot(), -1.0)
        .expect_err("must reject negative minimum height");
    assert!(format!("{err}").contains("minimum bar height"));
}

#[test]
fn tiny_bars_are_lifted_to_the_minimum_height() {
    let data = vec![
        DataPoint::new(1_000.0),
        DataPoint::new(1.0),
        DataPoint::new(0.0),
    ];
    let value_scale = LinearScale::value_scale(&data, plot()).expect("value scale");
    let bars = project_histogram_bars(&data, mapper(3), value_scale, plot(), 2.0).expect("project");

    assert!((bars[0].height - 70.0).abs() <= 1e-9);
    assert!((bars[1].height - 2.0).abs() <= 1e-9);
    assert!((bars[1].y - 68.0).abs() <= 1e-9);
    assert_eq!(bars[2].height, 0.0);
    assert!((bars[2].y - 70.0).abs() <= 1e-9);
}

#[test]
fn bars_are_laid_out_left_to_right_one_pixel_apart() {
    let data = vec![DataPoint::new(3.0); 3];
    let value_scale = LinearScale::value_scale(&data, plot()).expect("value scale");
    let bars = project_histogram_bars(&data, mapper(3), value_scale, plot(), 2.0).expect("project");

    let xs: Vec<f64> = bars.iter().map(|bar| bar.x).collect();
    assert_eq!(xs, vec![0.0, 100.0, 200.0]);
    assert!(bars.iter().all(|bar| (bar.width - 99.0).abs() <= 1e-9));
}

#[test]
fn bar_height_of_empty_bin_is_zero() {
    let data = vec![DataPoint::new(10.0)];
    let value_scale = LinearScale::value_scale(&data, plot()).expect("value scale");
    assert_eq!(bar_height(0.0, value_scale, 70.0, 2.0), 0.0);
    assert_eq!(bar_height(f64::NAN, value_scale, 70.0, 2.0), 0.0);
}
