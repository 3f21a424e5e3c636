use country_compare_wasm::application::{DEFAULT_PROXY_URL, DashboardConfig, DataServiceConfig};
use country_compare_wasm::domain::errors::ConfigurationError;
use country_compare_wasm::domain::indicators::ChartType;

#[test]
fn empty_object_yields_defaults() {
    let config = DashboardConfig::from_json("{}").unwrap();

    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.data_service.base_url(), DEFAULT_PROXY_URL);
    assert_eq!(config.indicators.len(), 3);
    assert_eq!(config.render_options().target, "plotly-chart");
    assert!(config.request_timeout_ms.is_none());
}

#[test]
fn world_bank_service_with_custom_indicators() {
    let json = r#"{
        "data_service": { "kind": "world_bank", "date_range": "2000:2023" },
        "request_timeout_ms": 8000,
        "indicators": [
            { "key": "population", "display_name": "Population", "axis_label": null, "source_code": "SP.POP.TOTL" },
            { "key": "gdp", "display_name": "GDP", "axis_label": "GDP (Current US$)", "source_code": "NY.GDP.MKTP.CD" }
        ],
        "default_indicator": "GDP",
        "default_chart_type": "bar"
    }"#;

    let config = DashboardConfig::from_json(json).unwrap();

    assert_eq!(
        config.data_service,
        DataServiceConfig::WorldBank {
            base_url: "https://api.worldbank.org".to_string(),
            date_range: Some("2000:2023".to_string()),
        }
    );
    assert_eq!(config.request_timeout_ms, Some(8000));
    let view = config.initial_view().unwrap();
    assert_eq!(view.indicator.value(), "gdp");
    assert_eq!(view.chart_type, ChartType::Bar);
    assert_eq!(config.registry().unwrap().axis_label(&view.indicator), "GDP (Current US$)");
}

#[test]
fn unknown_default_indicator_is_rejected() {
    let result = DashboardConfig::from_json(r#"{ "default_indicator": "population" }"#);
    assert_eq!(result, Err(ConfigurationError::UnknownDefaultIndicator("population".to_string())));
}

#[test]
fn duplicate_indicator_is_rejected() {
    let json = r#"{ "indicators": [
        { "key": "gdp", "display_name": "GDP" },
        { "key": "GDP", "display_name": "Gross domestic product" }
    ] }"#;
    assert_eq!(
        DashboardConfig::from_json(json),
        Err(ConfigurationError::DuplicateIndicator("gdp".to_string()))
    );
}

#[test]
fn empty_indicator_list_is_rejected() {
    assert_eq!(
        DashboardConfig::from_json(r#"{ "indicators": [] }"#),
        Err(ConfigurationError::NoIndicators)
    );
}

#[test]
fn blank_base_url_is_rejected() {
    let json = r#"{ "data_service": { "kind": "proxy", "base_url": " " } }"#;
    assert_eq!(DashboardConfig::from_json(json), Err(ConfigurationError::EmptyBaseUrl));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        DashboardConfig::from_json("{ not json"),
        Err(ConfigurationError::InvalidJson(_))
    ));
}
