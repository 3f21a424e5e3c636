use serde::{Deserialize, Serialize};

use crate::domain::chart::RenderOptions;
use crate::domain::controls::ViewSnapshot;
use crate::domain::errors::ConfigurationError;
use crate::domain::indicators::{ChartType, IndicatorDefinition, IndicatorRegistry};

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_WORLD_BANK_URL: &str = "https://api.worldbank.org";

/// Which remote service provides indicator series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataServiceConfig {
    /// `GET {base_url}/api/data/{indicator}/{code}`
    Proxy { base_url: String },
    /// World Bank v2 API. `date_range` is passed through as `date=`, e.g. `"2000:2023"`.
    WorldBank {
        #[serde(default = "default_world_bank_url")]
        base_url: String,
        #[serde(default)]
        date_range: Option<String>,
    },
}

fn default_world_bank_url() -> String {
    DEFAULT_WORLD_BANK_URL.to_string()
}

impl DataServiceConfig {
    pub fn base_url(&self) -> &str {
        match self {
            DataServiceConfig::Proxy { base_url } | DataServiceConfig::WorldBank { base_url, .. } => base_url,
        }
    }
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        DataServiceConfig::Proxy {
            base_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

/// Dashboard settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_service: DataServiceConfig,
    /// Per-request timeout; `None` waits for the browser's own timeout.
    pub request_timeout_ms: Option<u32>,
    pub indicators: Vec<IndicatorDefinition>,
    /// Falls back to the first configured indicator.
    pub default_indicator: Option<String>,
    pub default_chart_type: ChartType,
    pub chart_target: String,
    pub responsive: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            data_service: DataServiceConfig::default(),
            request_timeout_ms: None,
            indicators: IndicatorRegistry::with_defaults().iter().cloned().collect(),
            default_indicator: None,
            default_chart_type: ChartType::Line,
            chart_target: render.target,
            responsive: render.responsive,
        }
    }
}

impl DashboardConfig {
    /// Parses and validates.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.data_service.base_url().trim().is_empty() {
            return Err(ConfigurationError::EmptyBaseUrl);
        }
        self.initial_view()?;
        Ok(())
    }

    pub fn registry(&self) -> Result<IndicatorRegistry, ConfigurationError> {
        IndicatorRegistry::from_definitions(self.indicators.clone())
    }

    pub fn initial_view(&self) -> Result<ViewSnapshot, ConfigurationError> {
        let registry = self.registry()?;
        let indicator = match &self.default_indicator {
            Some(raw) => registry
                .resolve(raw)
                .ok_or_else(|| ConfigurationError::UnknownDefaultIndicator(raw.clone()))?,
            None => registry
                .first()
                .map(|definition| definition.key.clone())
                .ok_or(ConfigurationError::NoIndicators)?,
        };
        Ok(ViewSnapshot {
            indicator,
            chart_type: self.default_chart_type,
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            target: self.chart_target.clone(),
            responsive: self.responsive,
        }
    }
}
