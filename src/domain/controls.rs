use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ControlError;
use crate::domain::events::{ControlsEvent, Subscribers};
use crate::domain::indicators::{ChartType, IndicatorKey, IndicatorRegistry};
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Active indicator and chart type at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub indicator: IndicatorKey,
    pub chart_type: ChartType,
}

/// Holds the indicator and chart-type selection.
///
/// Every accepted change is published, even when the value is unchanged;
/// rejected values leave the state and subscribers untouched.
pub struct ViewControls {
    registry: IndicatorRegistry,
    indicator: IndicatorKey,
    chart_type: ChartType,
    subscribers: Subscribers<ControlsEvent>,
}

impl ViewControls {
    /// Starts on `indicator` and `chart_type`. The indicator must be registered.
    pub fn new(registry: IndicatorRegistry, indicator: IndicatorKey, chart_type: ChartType) -> Result<Self, ControlError> {
        if !registry.contains(&indicator) {
            return Err(ControlError::UnknownIndicator(indicator.value().to_string()));
        }
        Ok(Self {
            registry,
            indicator,
            chart_type,
            subscribers: Subscribers::new(),
        })
    }

    /// First registered indicator, line chart.
    pub fn with_registry(registry: IndicatorRegistry) -> Result<Self, ControlError> {
        let indicator = registry
            .first()
            .map(|definition| definition.key.clone())
            .ok_or_else(|| ControlError::UnknownIndicator(String::new()))?;
        Self::new(registry, indicator, ChartType::Line)
    }

    pub fn set_indicator(&mut self, raw: &str) -> Result<(), ControlError> {
        match self.registry.resolve(raw) {
            Some(key) => {
                self.select_indicator(key);
                Ok(())
            }
            None => {
                log_warn!(LogComponent::Domain("ViewControls"), "rejected indicator '{}'", raw);
                Err(ControlError::UnknownIndicator(raw.to_string()))
            }
        }
    }

    pub fn set_chart_type(&mut self, raw: &str) -> Result<(), ControlError> {
        match ChartType::from_str(raw.trim().to_lowercase().as_str()) {
            Ok(chart_type) => {
                self.select_chart_type(chart_type);
                Ok(())
            }
            Err(_) => {
                log_warn!(LogComponent::Domain("ViewControls"), "rejected chart type '{}'", raw);
                Err(ControlError::UnknownChartType(raw.to_string()))
            }
        }
    }

    /// Typed setter. Keys outside the registry are ignored.
    pub fn select_indicator(&mut self, key: IndicatorKey) {
        if !self.registry.contains(&key) {
            log_warn!(LogComponent::Domain("ViewControls"), "ignored unregistered indicator '{}'", key);
            return;
        }
        self.indicator = key;
        self.subscribers.publish(&ControlsEvent::IndicatorChanged { snapshot: self.snapshot() });
    }

    pub fn select_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
        self.subscribers.publish(&ControlsEvent::ChartTypeChanged { snapshot: self.snapshot() });
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            indicator: self.indicator.clone(),
            chart_type: self.chart_type,
        }
    }

    pub fn indicator(&self) -> &IndicatorKey {
        &self.indicator
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ControlsEvent) + 'static,
    {
        self.subscribers.subscribe(handler);
    }
}
