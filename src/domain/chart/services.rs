use crate::domain::chart::{
    BarMode, ChartSpec, ComparisonChart, PieChart, PieSlice, Placeholder, SeriesMark, SeriesTrace,
};
use crate::domain::indicators::{ChartType, IndicatorKey, IndicatorRegistry};
use crate::domain::series::EntitySeries;

pub const X_AXIS_TITLE: &str = "Year";

/// Domain service turning fetched series into a chart description.
///
/// Pure: the same inputs always produce the same spec.
#[derive(Debug, Clone)]
pub struct ChartAssembler {
    registry: IndicatorRegistry,
}

impl ChartAssembler {
    pub fn new(registry: IndicatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    pub fn assemble(&self, chart_type: ChartType, indicator: &IndicatorKey, results: &[EntitySeries]) -> ChartSpec {
        if results.is_empty() {
            return self.no_data(indicator);
        }

        match SeriesMark::for_chart_type(chart_type) {
            Some(mark) => self.comparison(mark, indicator, results),
            None => self.pie(indicator, results),
        }
    }

    /// Placeholder shown when no entity produced usable data
    pub fn no_data(&self, indicator: &IndicatorKey) -> ChartSpec {
        let name = self.registry.display_name(indicator);
        ChartSpec::NoData(Placeholder {
            title: format!("{} Comparison", name),
            message: no_data_message(&name),
        })
    }

    fn comparison(&self, mark: SeriesMark, indicator: &IndicatorKey, results: &[EntitySeries]) -> ChartSpec {
        let series: Vec<SeriesTrace> = results
            .iter()
            .filter(|result| !result.is_empty())
            .map(|result| SeriesTrace {
                name: result.entity.name.clone(),
                code: result.entity.code.clone(),
                x: result.points.iter().map(|point| point.date.clone()).collect(),
                y: result
                    .points
                    .iter()
                    .map(|point| point.value.filter(|value| value.is_finite()))
                    .collect(),
            })
            .collect();

        if series.is_empty() {
            return self.no_data(indicator);
        }

        ChartSpec::Comparison(ComparisonChart {
            title: format!("{} Comparison", self.registry.display_name(indicator)),
            mark,
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: self.registry.axis_label(indicator),
            bar_mode: BarMode::Group,
            series,
        })
    }

    fn pie(&self, indicator: &IndicatorKey, results: &[EntitySeries]) -> ChartSpec {
        let slices: Vec<PieSlice> = results
            .iter()
            .filter_map(|result| {
                let latest = result.latest_value()?;
                Some(PieSlice {
                    label: result.entity.name.clone(),
                    code: result.entity.code.clone(),
                    value: latest.value?,
                    date: latest.date.clone(),
                })
            })
            .collect();

        if slices.is_empty() {
            return self.no_data(indicator);
        }

        ChartSpec::Pie(PieChart {
            title: format!("Latest {} Comparison", self.registry.display_name(indicator)),
            slices,
        })
    }
}

pub fn no_data_message(display_name: &str) -> String {
    format!("No {} data available for the selected countries.", display_name)
}
