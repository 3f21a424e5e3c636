use std::cmp::Ordering;

use derive_more::Constructor;
use serde::{Deserialize, Serialize};

use crate::domain::indicators::ChartType;

/// Value Object - one observation; `value` is `None` when the period has no data
#[derive(Debug, Clone, PartialEq, Constructor, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: Option<f64>,
}

impl TimeSeriesPoint {
    pub fn has_value(&self) -> bool {
        self.value.is_some_and(f64::is_finite)
    }
}

/// Period ordering by the leading year (or other integer prefix), then by the
/// full label: `"999" < "2000" < "2020" < "2020Q1" < "2020Q2"`. Labels without
/// a numeric prefix sort after numbered ones.
pub fn compare_periods(left: &str, right: &str) -> Ordering {
    period_key(left).cmp(&period_key(right))
}

fn period_key(period: &str) -> (bool, Option<u64>, &str) {
    let period = period.trim();
    let digits = period.len() - period.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let number = period[..digits].parse::<u64>().ok();
    (number.is_none(), number, period)
}

/// How much history a pass needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    FullHistory,
    LatestOnly,
}

impl FetchScope {
    pub fn for_chart_type(chart_type: ChartType) -> Self {
        if chart_type.is_time_series() {
            FetchScope::FullHistory
        } else {
            FetchScope::LatestOnly
        }
    }
}
