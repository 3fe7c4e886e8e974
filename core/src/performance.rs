//! Synthesized performance series for charts.
//!
//! A series runs from `days` days ago up to `as_of` inclusive, so it has
//! `days + 1` points. Each point sits on the straight line from the
//! initial to the final value, nudged by a uniform ±band factor drawn from
//! the investment's own RNG stream. Monetary outputs are rounded to cents.

use crate::{
    analytics::{roi_percent, round2},
    config::{DashboardConfig, PerformanceConfig},
    model::PerformanceDataPoint,
    rng::RngBank,
    types::Money,
};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

pub struct PerformanceGenerator {
    config:   PerformanceConfig,
    rng_bank: RngBank,
}

impl PerformanceGenerator {
    pub fn new(config: PerformanceConfig, master_seed: u64) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(master_seed),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.performance.clone(), config.master_seed)
    }

    pub fn generate(
        &self,
        investment_id: &str,
        initial_value: Money,
        final_value: Money,
        as_of: NaiveDate,
    ) -> Vec<PerformanceDataPoint> {
        let days = self.config.days.max(1);
        let band = self.config.perturbation_band;
        let mut rng = self.rng_bank.for_series(investment_id);

        let mut points = Vec::with_capacity(days as usize + 1);
        let mut previous = initial_value;

        for days_ago in (0..=days).rev() {
            let progress = f64::from(days - days_ago) / f64::from(days);
            let trend = initial_value + (final_value - initial_value) * progress;
            let value = round2(trend * (1.0 + rng.symmetric(band)));
            let change = value - previous;

            points.push(PerformanceDataPoint {
                date:                 as_of - Duration::days(i64::from(days_ago)),
                value,
                daily_change:         round2(change),
                daily_change_percent: round2(roi_percent(change, previous)),
            });
            previous = value;
        }

        log::debug!(
            "series {investment_id}: {} points, {:.2} -> {:.2}",
            points.len(),
            initial_value,
            final_value
        );
        points
    }
}

/// Series for one investment over the default 90 days ending today.
pub fn generate_performance_data(
    investment_id: &str,
    initial_value: Money,
    final_value: Money,
) -> Vec<PerformanceDataPoint> {
    PerformanceGenerator::from_config(&DashboardConfig::default()).generate(
        investment_id,
        initial_value,
        final_value,
        Utc::now().date_naive(),
    )
}

/// Sum several series date by date, recomputing day-over-day change.
/// `initial_total` is the baseline the first combined point is compared to.
pub fn combine_series(
    series: &[Vec<PerformanceDataPoint>],
    initial_total: Money,
) -> Vec<PerformanceDataPoint> {
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for point in series.iter().flatten() {
        *by_date.entry(point.date).or_insert(0.0) += point.value;
    }

    let mut previous = initial_total;
    by_date
        .into_iter()
        .map(|(date, total)| {
            let value = round2(total);
            let change = value - previous;
            let point = PerformanceDataPoint {
                date,
                value,
                daily_change:         round2(change),
                daily_change_percent: round2(roi_percent(change, previous)),
            };
            previous = value;
            point
        })
        .collect()
}
