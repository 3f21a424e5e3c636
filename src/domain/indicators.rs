use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::errors::{ConfigurationError, ValidationError};

/// Value Object - lower-cased indicator identifier such as `gdp`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndicatorKey(String);

impl IndicatorKey {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(ValidationError::EmptyIndicatorKey);
        }
        Ok(Self(key.to_lowercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IndicatorKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<IndicatorKey> for String {
    fn from(key: IndicatorKey) -> Self {
        key.0
    }
}

/// Value Object - chart shape
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    #[display(fmt = "Line")]
    #[strum(serialize = "line")]
    Line,
    #[display(fmt = "Bar")]
    #[strum(serialize = "bar")]
    Bar,
    #[display(fmt = "Pie")]
    #[strum(serialize = "pie")]
    Pie,
}

impl ChartType {
    /// Line and bar plot whole histories; pie compares latest values.
    pub fn is_time_series(&self) -> bool {
        matches!(self, ChartType::Line | ChartType::Bar)
    }
}

/// Registry entry describing how an indicator is labelled and fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    pub key: IndicatorKey,
    pub display_name: String,
    #[serde(default)]
    pub axis_label: Option<String>,
    /// Remote series id (World Bank), e.g. `NY.GDP.MKTP.CD`
    #[serde(default)]
    pub source_code: Option<String>,
}

impl IndicatorDefinition {
    pub fn new(key: &str, display_name: &str, axis_label: Option<&str>, source_code: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            key: IndicatorKey::new(key)?,
            display_name: display_name.to_string(),
            axis_label: axis_label.map(str::to_string),
            source_code: source_code.map(str::to_string),
        })
    }
}

pub const DEFAULT_AXIS_LABEL: &str = "Value";

/// Known indicators in display order
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRegistry {
    definitions: Vec<IndicatorDefinition>,
}

impl IndicatorRegistry {
    pub fn empty() -> Self {
        Self { definitions: Vec::new() }
    }

    /// GDP, inflation and unemployment.
    pub fn with_defaults() -> Self {
        let definitions = vec![
            IndicatorDefinition {
                key: IndicatorKey("gdp".to_string()),
                display_name: "GDP".to_string(),
                axis_label: Some("GDP (Current US$)".to_string()),
                source_code: Some("NY.GDP.MKTP.CD".to_string()),
            },
            IndicatorDefinition {
                key: IndicatorKey("inflation".to_string()),
                display_name: "Inflation".to_string(),
                axis_label: Some("Inflation (Annual %)".to_string()),
                source_code: Some("FP.CPI.TOTL.ZG".to_string()),
            },
            IndicatorDefinition {
                key: IndicatorKey("unemployment".to_string()),
                display_name: "Unemployment".to_string(),
                axis_label: Some("Unemployment (%)".to_string()),
                source_code: Some("SL.UEM.TOTL.ZS".to_string()),
            },
        ];
        Self { definitions }
    }

    /// Builds a registry, rejecting empty lists and duplicate keys.
    pub fn from_definitions(definitions: Vec<IndicatorDefinition>) -> Result<Self, ConfigurationError> {
        if definitions.is_empty() {
            return Err(ConfigurationError::NoIndicators);
        }
        let mut registry = Self::empty();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, definition: IndicatorDefinition) -> Result<(), ConfigurationError> {
        if self.contains(&definition.key) {
            return Err(ConfigurationError::DuplicateIndicator(definition.key.value().to_string()));
        }
        self.definitions.push(definition);
        Ok(())
    }

    pub fn get(&self, key: &IndicatorKey) -> Option<&IndicatorDefinition> {
        self.definitions.iter().find(|definition| &definition.key == key)
    }

    pub fn contains(&self, key: &IndicatorKey) -> bool {
        self.get(key).is_some()
    }

    /// Parses a raw value and checks it is registered.
    pub fn resolve(&self, raw: &str) -> Option<IndicatorKey> {
        let key = IndicatorKey::new(raw).ok()?;
        self.contains(&key).then_some(key)
    }

    pub fn display_name(&self, key: &IndicatorKey) -> String {
        self.get(key)
            .map(|definition| definition.display_name.clone())
            .unwrap_or_else(|| key.value().to_string())
    }

    pub fn axis_label(&self, key: &IndicatorKey) -> String {
        self.get(key)
            .and_then(|definition| definition.axis_label.clone())
            .unwrap_or_else(|| DEFAULT_AXIS_LABEL.to_string())
    }

    pub fn source_code(&self, key: &IndicatorKey) -> Option<&str> {
        self.get(key).and_then(|definition| definition.source_code.as_deref())
    }

    pub fn first(&self) -> Option<&IndicatorDefinition> {
        self.definitions.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
