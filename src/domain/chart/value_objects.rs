use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::indicators::ChartType;
use crate::domain::selection::EntityCode;

/// Value Object - how a comparison series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMark {
    #[display(fmt = "line")]
    Line,
    #[display(fmt = "bar")]
    Bar,
}

impl SeriesMark {
    pub fn for_chart_type(chart_type: ChartType) -> Option<Self> {
        match chart_type {
            ChartType::Line => Some(SeriesMark::Line),
            ChartType::Bar => Some(SeriesMark::Bar),
            ChartType::Pie => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    #[default]
    Group,
}

/// One entity's line or bar series; `y[i]` is `None` for a gap at `x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTrace {
    pub name: String,
    pub code: EntityCode,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub title: String,
    pub mark: SeriesMark,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub bar_mode: BarMode,
    pub series: Vec<SeriesTrace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub code: EntityCode,
    pub value: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub title: String,
    pub message: String,
}

/// Declarative chart description handed to a chart surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Comparison(ComparisonChart),
    Pie(PieChart),
    NoData(Placeholder),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Comparison(chart) => &chart.title,
            ChartSpec::Pie(chart) => &chart.title,
            ChartSpec::NoData(placeholder) => &placeholder.title,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartSpec::NoData(_))
    }

    /// Number of series (comparison) or slices (pie)
    pub fn entity_count(&self) -> usize {
        match self {
            ChartSpec::Comparison(chart) => chart.series.len(),
            ChartSpec::Pie(chart) => chart.slices.len(),
            ChartSpec::NoData(_) => 0,
        }
    }
}

/// Where and how a spec is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub target: String,
    pub responsive: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target: "plotly-chart".to_string(),
            responsive: true,
        }
    }
}

/// What the comparison panel currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Hidden,
    Fetching { message: String },
    Rendered(ChartSpec),
    NoData { message: String },
    Failed { message: String },
}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, PanelState::Idle | PanelState::Hidden)
    }

    /// Status line shown above the chart
    pub fn status_text(&self) -> String {
        match self {
            PanelState::Idle | PanelState::Hidden => String::new(),
            PanelState::Fetching { message }
            | PanelState::NoData { message }
            | PanelState::Failed { message } => message.clone(),
            PanelState::Rendered(spec) => spec.title().to_string(),
        }
    }
}
