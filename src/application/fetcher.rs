use futures::future::join_all;

use crate::domain::errors::FetchError;
use crate::domain::indicators::IndicatorKey;
use crate::domain::logging::{LogComponent, LogContext};
use crate::domain::selection::Entity;
use crate::domain::series::{EntitySeries, FetchReport, FetchResult, FetchScope, IndicatorRepository};
use crate::{log_debug, log_warn};

/// Fans out one request per entity and gathers the results in selection order.
pub struct DataFetcher<R> {
    repository: R,
}

impl<R: IndicatorRepository> DataFetcher<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Resolves once every request has settled. A failure affects only its entity.
    pub async fn fetch_all(&self, indicator: &IndicatorKey, entities: &[Entity], scope: FetchScope) -> FetchReport {
        log_debug!(
            LogComponent::Application("DataFetcher"),
            "fetching {} for {} entities ({:?})",
            indicator,
            entities.len(),
            scope
        );

        let requests = entities.iter().map(|entity| self.fetch_one(indicator, entity, scope));
        let results = join_all(requests).await;

        for result in &results {
            if let FetchResult::Failure { entity, cause } = result {
                log_warn!(
                    LogComponent::Application("DataFetcher"),
                    ctx = LogContext::entity(&entity.code);
                    "{} fetch failed for {}: {}",
                    indicator,
                    entity.name,
                    cause
                );
            }
        }

        FetchReport::new(results)
    }

    async fn fetch_one(&self, indicator: &IndicatorKey, entity: &Entity, scope: FetchScope) -> FetchResult {
        let points = match self.repository.fetch_series(indicator, &entity.code, scope).await {
            Ok(points) => points,
            Err(cause) => {
                return FetchResult::Failure {
                    entity: entity.clone(),
                    cause,
                };
            }
        };

        if points.is_empty() {
            return FetchResult::Failure {
                entity: entity.clone(),
                cause: FetchError::EmptySeries,
            };
        }

        let mut series = EntitySeries::new(entity.clone(), points);
        series.normalize_chronological();
        if scope == FetchScope::LatestOnly {
            series.retain_latest();
        }
        FetchResult::Success(series)
    }
}
