use crate::domain::errors::FetchError;
use crate::domain::indicators::IndicatorKey;
use crate::domain::selection::EntityCode;
use crate::domain::series::{FetchScope, TimeSeriesPoint};

/// Source of per-entity indicator series
#[allow(async_fn_in_trait)]
pub trait IndicatorRepository {
    /// Points for one entity, in whatever order the service returns them.
    async fn fetch_series(
        &self,
        indicator: &IndicatorKey,
        code: &EntityCode,
        scope: FetchScope,
    ) -> Result<Vec<TimeSeriesPoint>, FetchError>;
}
