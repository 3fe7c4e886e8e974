//! Synthesized performance series tests.

use chrono::{Duration, NaiveDate};
use investdash_core::{
    config::{DashboardConfig, PerformanceConfig},
    performance::{combine_series, generate_performance_data, PerformanceGenerator},
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn generator() -> PerformanceGenerator {
    PerformanceGenerator::from_config(&DashboardConfig::default_test())
}

fn within_band(value: f64, target: f64, band: f64) -> bool {
    // Rounding to cents can push a point half a cent past the band.
    value >= target * (1.0 - band) - 0.01 && value <= target * (1.0 + band) + 0.01
}

/// 90 days back to today inclusive, bracketed by the start and end values.
#[test]
fn ninety_day_series_shape() {
    let points = generator().generate("inv-1", 100_000.0, 150_000.0, as_of());

    assert_eq!(points.len(), 91);
    assert!(within_band(points[0].value, 100_000.0, 0.05), "first {}", points[0].value);
    assert!(within_band(points[90].value, 150_000.0, 0.05), "last {}", points[90].value);
    assert_eq!(points[0].date, as_of() - Duration::days(90));
    assert_eq!(points[90].date, as_of());
}

#[test]
fn every_point_stays_near_the_trend() {
    let points = generator().generate("inv-2", 100_000.0, 190_000.0, as_of());

    for (i, p) in points.iter().enumerate() {
        let trend = 100_000.0 + 90_000.0 * i as f64 / 90.0;
        assert!(within_band(p.value, trend, 0.05), "point {i}: {} vs trend {trend}", p.value);
    }
}

#[test]
fn dates_advance_one_day_at_a_time() {
    let points = generator().generate("inv-3", 10.0, 20.0, as_of());

    for pair in points.windows(2) {
        assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
    }
}

/// The first change is measured against the initial value, later ones
/// against the previous point.
#[test]
fn daily_change_is_relative_to_previous_point() {
    let points = generator().generate("inv-4", 50_000.0, 40_000.0, as_of());

    assert!((points[0].daily_change - (points[0].value - 50_000.0)).abs() < 0.011);
    for pair in points.windows(2) {
        let expected = pair[1].value - pair[0].value;
        assert!((pair[1].daily_change - expected).abs() < 0.011);
        let pct = expected / pair[0].value * 100.0;
        assert!((pair[1].daily_change_percent - pct).abs() < 0.011);
    }
}

#[test]
fn outputs_are_rounded_to_cents() {
    let points = generator().generate("inv-5", 12_345.678, 23_456.789, as_of());

    for p in &points {
        for x in [p.value, p.daily_change, p.daily_change_percent] {
            assert!(((x * 100.0).round() - x * 100.0).abs() < 1e-6, "{x} not rounded");
        }
    }
}

#[test]
fn zero_initial_value_never_yields_nan() {
    let points = generator().generate("empty", 0.0, 1_000.0, as_of());

    assert_eq!(points[0].value, 0.0);
    assert_eq!(points[0].daily_change_percent, 0.0);
    assert!(points.iter().all(|p| p.daily_change_percent.is_finite()));
}

#[test]
fn custom_window_length() {
    let generator = PerformanceGenerator::new(
        PerformanceConfig { days: 30, perturbation_band: 0.0 },
        7,
    );

    let points = generator.generate("flat", 100.0, 130.0, as_of());

    assert_eq!(points.len(), 31);
    // Without perturbation the series is the exact trend line.
    assert_eq!(points[0].value, 100.0);
    assert_eq!(points[30].value, 130.0);
    assert_eq!(points[1].daily_change, 1.0);
}

#[test]
fn default_entry_point_covers_ninety_days() {
    let points = generate_performance_data("inv-1", 100_000.0, 150_000.0);
    assert_eq!(points.len(), 91);
    assert!(within_band(points[90].value, 150_000.0, 0.05));
}

#[test]
fn combined_series_sums_by_date() {
    let generator = PerformanceGenerator::new(
        PerformanceConfig { days: 10, perturbation_band: 0.0 },
        1,
    );
    let a = generator.generate("a", 100.0, 200.0, as_of());
    let b = generator.generate("b", 50.0, 50.0, as_of());

    let combined = combine_series(&[a, b], 150.0);

    assert_eq!(combined.len(), 11);
    assert_eq!(combined[0].value, 150.0);
    assert_eq!(combined[0].daily_change, 0.0);
    assert_eq!(combined[10].value, 250.0);
    assert_eq!(combined[10].daily_change, 10.0);
    assert!(combine_series(&[], 0.0).is_empty());
}
