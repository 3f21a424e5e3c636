use super::value_objects::{compare_periods, TimeSeriesPoint};
use crate::domain::errors::FetchError;
use crate::domain::selection::Entity;

/// Series fetched for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity: Entity,
    pub points: Vec<TimeSeriesPoint>,
}

impl EntitySeries {
    pub fn new(entity: Entity, points: Vec<TimeSeriesPoint>) -> Self {
        Self { entity, points }
    }

    /// Sorts points oldest first. Stable, so equal periods keep service order.
    pub fn normalize_chronological(&mut self) {
        self.points.sort_by(|a, b| compare_periods(&a.date, &b.date));
    }

    /// Most recent point carrying a value. Assumes chronological order.
    pub fn latest_value(&self) -> Option<&TimeSeriesPoint> {
        self.points.iter().rev().find(|point| point.has_value())
    }

    /// Keeps only the latest valued point; a series with no value is left as is.
    pub fn retain_latest(&mut self) {
        if let Some(latest) = self.latest_value().cloned() {
            self.points = vec![latest];
        }
    }

    pub fn has_any_value(&self) -> bool {
        self.points.iter().any(TimeSeriesPoint::has_value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Outcome of fetching one entity
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(EntitySeries),
    Failure { entity: Entity, cause: FetchError },
}

impl FetchResult {
    pub fn entity(&self) -> &Entity {
        match self {
            FetchResult::Success(series) => &series.entity,
            FetchResult::Failure { entity, .. } => entity,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }
}

/// All results of one pass, in selection order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchReport {
    results: Vec<FetchResult>,
}

impl FetchReport {
    pub fn new(results: Vec<FetchResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[FetchResult] {
        &self.results
    }

    pub fn successes(&self) -> Vec<EntitySeries> {
        self.results
            .iter()
            .filter_map(|result| match result {
                FetchResult::Success(series) => Some(series.clone()),
                FetchResult::Failure { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(&Entity, &FetchError)> {
        self.results
            .iter()
            .filter_map(|result| match result {
                FetchResult::Failure { entity, cause } => Some((entity, cause)),
                FetchResult::Success(_) => None,
            })
            .collect()
    }

    /// True when there was at least one request and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && !self.results.iter().any(FetchResult::is_success)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
