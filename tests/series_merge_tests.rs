use coinwatch::model::{PricePoint, PriceSeries, RawSample};

fn sample(time_secs: i64, close: f64) -> RawSample {
    RawSample::new(time_secs, close)
}

#[test]
fn merged_points_are_time_ordered() {
    let day = vec![sample(100, 2.0), sample(200, 4.0)];
    let hour = vec![sample(150, 5.0), sample(250, 8.0)];
    let minute = vec![sample(120, 10.0), sample(260, 16.0)];

    let series = PriceSeries::merge(&day, &hour, &minute);
    assert_eq!(series.len(), 6);
    let times: Vec<i64> = series.points().iter().map(|p| p.time_ms).collect();
    assert_eq!(
        times,
        vec![100_000, 120_000, 150_000, 200_000, 250_000, 260_000]
    );
}

#[test]
fn closes_are_inverted_and_times_scaled() {
    let series = PriceSeries::merge(&[sample(100, 4.0)], &[], &[]);
    assert_eq!(series.len(), 1);
    let point = series.points()[0];
    assert_eq!(point.time_ms, 100_000);
    assert!((point.value - 0.25).abs() < f64::EPSILON);
}

#[test]
fn unusable_closes_are_dropped() {
    let day = vec![
        sample(100, 0.0),
        sample(200, -3.0),
        sample(300, f64::NAN),
        sample(400, f64::INFINITY),
        sample(500, 2.0),
    ];
    let series = PriceSeries::merge(&day, &[], &[]);
    assert_eq!(series.len(), 1);
    assert_eq!(series.points()[0].time_ms, 500_000);
}

#[test]
fn equal_timestamps_keep_day_hour_minute_order() {
    let series = PriceSeries::merge(
        &[sample(100, 2.0)],
        &[sample(100, 4.0)],
        &[sample(100, 8.0)],
    );
    let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.5, 0.25, 0.125]);
}

#[test]
fn live_points_insert_in_time_order() {
    let mut series = PriceSeries::merge(&[sample(100, 2.0), sample(300, 2.0)], &[], &[]);
    series.push_live(PricePoint::new(200_000, 1.0));
    series.push_live(PricePoint::new(400_000, 3.0));

    let times: Vec<i64> = series.points().iter().map(|p| p.time_ms).collect();
    assert_eq!(times, vec![100_000, 200_000, 300_000, 400_000]);
    assert_eq!(series.latest().map(|p| p.time_ms), Some(400_000));
}

#[test]
fn live_point_at_existing_timestamp_lands_after_it() {
    let mut series = PriceSeries::merge(&[sample(100, 2.0)], &[], &[]);
    series.push_live(PricePoint::new(100_000, 9.0));

    let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.5, 9.0]);
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let day = vec![
        sample(100, 1.0),
        sample(200, 1.0),
        sample(300, 1.0),
        sample(400, 1.0),
    ];
    let series = PriceSeries::merge(&day, &[], &[]);

    let slice = series.range(200_000, 300_000);
    let times: Vec<i64> = slice.iter().map(|p| p.time_ms).collect();
    assert_eq!(times, vec![200_000, 300_000]);

    assert!(series.range(401_000, 500_000).is_empty());
    assert!(series.range(300_000, 200_000).is_empty());
}
