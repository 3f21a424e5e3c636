use serde::Deserialize;
use serde_json::Value;

use super::{GlooHttpClient, HttpUtils};
use crate::application::config::{DashboardConfig, DataServiceConfig};
use crate::domain::errors::{ConfigurationError, FetchError};
use crate::domain::indicators::{IndicatorKey, IndicatorRegistry};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::selection::EntityCode;
use crate::domain::series::{FetchScope, IndicatorRepository, TimeSeriesPoint};

pub const WORLD_BANK_PAGE_SIZE: u32 = 100;

/// Remote back-end flavour
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceBackend {
    /// Local proxy returning `[{date, value}]`
    Proxy,
    /// World Bank v2 API returning `[meta, records]`
    WorldBank { date_range: Option<String> },
}

#[derive(Debug, Deserialize)]
struct WorldBankRecord {
    date: String,
    #[serde(default)]
    value: Option<f64>,
}

/// Indicator data service client
pub struct IndicatorServiceClient {
    http: GlooHttpClient,
    backend: ServiceBackend,
    registry: IndicatorRegistry,
}

impl IndicatorServiceClient {
    pub fn new(http: GlooHttpClient, backend: ServiceBackend, registry: IndicatorRegistry) -> Self {
        Self { http, backend, registry }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, ConfigurationError> {
        let registry = config.registry()?;
        let (base_url, backend) = match &config.data_service {
            DataServiceConfig::Proxy { base_url } => (base_url.clone(), ServiceBackend::Proxy),
            DataServiceConfig::WorldBank { base_url, date_range } => (
                base_url.clone(),
                ServiceBackend::WorldBank {
                    date_range: date_range.clone(),
                },
            ),
        };
        if base_url.trim().is_empty() {
            return Err(ConfigurationError::EmptyBaseUrl);
        }

        let http = GlooHttpClient::new(base_url).with_timeout(config.request_timeout_ms);
        Ok(Self::new(http, backend, registry))
    }

    pub fn backend(&self) -> &ServiceBackend {
        &self.backend
    }

    /// `{base}/api/data/{indicator}/{code}`
    pub fn proxy_url(&self, indicator: &IndicatorKey, code: &EntityCode) -> String {
        self.http.resolve(&format!(
            "api/data/{}/{}",
            HttpUtils::url_encode(indicator.value()),
            HttpUtils::url_encode(code.value())
        ))
    }

    /// `{base}/v2/country/{code}/indicator/{source}?format=json&per_page=100[&date=..][&mrnev=1]`
    pub fn world_bank_url(
        &self,
        source_code: &str,
        code: &EntityCode,
        scope: FetchScope,
        date_range: Option<&str>,
    ) -> String {
        let base = self.http.resolve(&format!(
            "v2/country/{}/indicator/{}",
            HttpUtils::url_encode(code.value()),
            HttpUtils::url_encode(source_code)
        ));

        let mut params = vec![("format", "json".to_string()), ("per_page", WORLD_BANK_PAGE_SIZE.to_string())];
        if let Some(range) = date_range {
            params.push(("date", range.to_string()));
        }
        if scope == FetchScope::LatestOnly {
            params.push(("mrnev", "1".to_string()));
        }
        HttpUtils::build_url_with_params(&base, &params)
    }
}

impl IndicatorRepository for IndicatorServiceClient {
    async fn fetch_series(
        &self,
        indicator: &IndicatorKey,
        code: &EntityCode,
        scope: FetchScope,
    ) -> Result<Vec<TimeSeriesPoint>, FetchError> {
        let points = match &self.backend {
            // The proxy has no latest-only mode; trimming happens after the fetch.
            ServiceBackend::Proxy => {
                let body = self.http.get(&self.proxy_url(indicator, code)).await?;
                parse_series_payload(&body, indicator)?
            }
            ServiceBackend::WorldBank { date_range } => {
                let source = self
                    .registry
                    .source_code(indicator)
                    .ok_or_else(|| FetchError::UnknownIndicator(indicator.value().to_string()))?;
                let url = self.world_bank_url(source, code, scope, date_range.as_deref());
                let body = self.http.get(&url).await?;
                parse_world_bank_payload(&body)?
            }
        };

        get_logger().debug(
            LogComponent::Infrastructure("IndicatorService"),
            &format!("{} {}: {} points", indicator, code, points.len()),
        );
        Ok(points)
    }
}

/// Parses the proxy payload: an array of `{date, value}` objects in any order.
///
/// Dates may be strings or numbers. The value is read from `value`, or from a
/// field named after the indicator (`{"date": 2022, "gdp": 1.0}`). Non-numeric
/// values become gaps. An `{"error": ...}` object is a service failure.
pub fn parse_series_payload(body: &str, indicator: &IndicatorKey) -> Result<Vec<TimeSeriesPoint>, FetchError> {
    let payload: Value = serde_json::from_str(body).map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

    if let Some(error) = payload.get("error") {
        return Err(FetchError::Service(value_text(error)));
    }

    let items = payload
        .as_array()
        .ok_or_else(|| FetchError::MalformedPayload("expected an array of points".to_string()))?;

    items
        .iter()
        .map(|item| {
            let date = item
                .get("date")
                .and_then(period_text)
                .ok_or_else(|| FetchError::MalformedPayload(format!("point without a date: {}", item)))?;
            let value = item
                .get("value")
                .or_else(|| item.get(indicator.value()))
                .and_then(numeric_value);
            Ok(TimeSeriesPoint::new(date, value))
        })
        .collect()
}

/// Parses a World Bank v2 payload, `[meta, [records] | null]`.
pub fn parse_world_bank_payload(body: &str) -> Result<Vec<TimeSeriesPoint>, FetchError> {
    let payload: Value = serde_json::from_str(body).map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

    let parts = payload
        .as_array()
        .ok_or_else(|| FetchError::MalformedPayload("expected [meta, records]".to_string()))?;

    if let Some(messages) = parts.first().and_then(|meta| meta.get("message")) {
        return Err(FetchError::Service(world_bank_message(messages)));
    }

    let records = match parts.get(1) {
        Some(Value::Null) => return Ok(Vec::new()),
        Some(records) => records.clone(),
        None => return Err(FetchError::MalformedPayload("missing records element".to_string())),
    };

    let records: Vec<WorldBankRecord> =
        serde_json::from_value(records).map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

    Ok(records
        .into_iter()
        .map(|record| TimeSeriesPoint::new(record.date, record.value))
        .collect())
}

fn period_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn world_bank_message(messages: &Value) -> String {
    match messages.as_array() {
        Some(list) => list
            .iter()
            .map(|message| {
                message
                    .get("value")
                    .or_else(|| message.get("key"))
                    .map(value_text)
                    .unwrap_or_else(|| message.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        None => value_text(messages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gdp() -> IndicatorKey {
        IndicatorKey::new("gdp").unwrap()
    }

    fn usa() -> EntityCode {
        EntityCode::new("USA").unwrap()
    }

    fn world_bank_client(base: &str) -> IndicatorServiceClient {
        IndicatorServiceClient::new(
            GlooHttpClient::new(base.to_string()),
            ServiceBackend::WorldBank { date_range: None },
            IndicatorRegistry::with_defaults(),
        )
    }

    #[test]
    fn proxy_url_layout() {
        let client = IndicatorServiceClient::new(
            GlooHttpClient::new("http://127.0.0.1:5000".to_string()),
            ServiceBackend::Proxy,
            IndicatorRegistry::with_defaults(),
        );
        assert_eq!(client.proxy_url(&gdp(), &usa()), "http://127.0.0.1:5000/api/data/gdp/USA");
    }

    #[test]
    fn world_bank_latest_only_adds_mrnev() {
        let client = world_bank_client("https://api.worldbank.org");
        assert_eq!(
            client.world_bank_url("SL.UEM.TOTL.ZS", &usa(), FetchScope::LatestOnly, None),
            "https://api.worldbank.org/v2/country/USA/indicator/SL.UEM.TOTL.ZS?format=json&per_page=100&mrnev=1"
        );
        assert_eq!(
            client.world_bank_url("NY.GDP.MKTP.CD", &usa(), FetchScope::FullHistory, Some("2000:2023")),
            "https://api.worldbank.org/v2/country/USA/indicator/NY.GDP.MKTP.CD?format=json&per_page=100&date=2000:2023"
        );
    }

    #[test]
    fn proxy_payload_accepts_numeric_dates_and_named_values() {
        let body = r#"[{"date": 2022, "gdp": 25.4}, {"date": "2021", "value": null}, {"date": "2020", "value": "20.9"}]"#;
        let points = parse_series_payload(body, &gdp()).unwrap();
        assert_eq!(
            points,
            vec![
                TimeSeriesPoint::new("2022".to_string(), Some(25.4)),
                TimeSeriesPoint::new("2021".to_string(), None),
                TimeSeriesPoint::new("2020".to_string(), Some(20.9)),
            ]
        );
    }

    #[test]
    fn proxy_error_object_is_service_failure() {
        let body = r#"{"error": "Failed to fetch data"}"#;
        assert_eq!(
            parse_series_payload(body, &gdp()),
            Err(FetchError::Service("Failed to fetch data".to_string()))
        );
    }

    #[test]
    fn proxy_rejects_non_json_and_missing_dates() {
        assert!(matches!(parse_series_payload("<html>", &gdp()), Err(FetchError::MalformedPayload(_))));
        assert!(matches!(
            parse_series_payload(r#"[{"value": 1.0}]"#, &gdp()),
            Err(FetchError::MalformedPayload(_))
        ));
    }

    #[test]
    fn world_bank_records_and_null_page() {
        let body = r#"[{"page":1,"pages":1,"per_page":100,"total":2},
            [{"indicator":{"id":"NY.GDP.MKTP.CD"},"date":"2023","value":27360935000000},
             {"indicator":{"id":"NY.GDP.MKTP.CD"},"date":"2022","value":null}]]"#;
        let points = parse_world_bank_payload(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, Some(27360935000000.0));
        assert_eq!(points[1].value, None);

        let empty = r#"[{"page":0,"pages":0,"per_page":100,"total":0}, null]"#;
        assert_eq!(parse_world_bank_payload(empty).unwrap(), Vec::new());
    }

    #[test]
    fn world_bank_error_message() {
        let body = r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#;
        assert_eq!(
            parse_world_bank_payload(body),
            Err(FetchError::Service("The provided parameter value is not valid".to_string()))
        );
    }
}
