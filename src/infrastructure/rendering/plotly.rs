use gloo::utils::format::JsValueSerdeExt;
use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;

use crate::application::coordinator::ChartSurface;
use crate::domain::chart::{ChartSpec, RenderOptions, SeriesMark};
use crate::domain::errors::RenderError;
use crate::domain::logging::{LogComponent, get_logger};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn plotly_new_plot(target: &str, data: &JsValue, layout: &JsValue, config: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, js_name = purge, catch)]
    fn plotly_purge(target: &str) -> Result<JsValue, JsValue>;
}

/// Arguments of one `Plotly.newPlot` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyFigure {
    pub data: Vec<Value>,
    pub layout: Value,
    pub config: Value,
}

impl PlotlyFigure {
    /// Translates a spec into Plotly traces. Placeholders have no figure.
    pub fn from_spec(spec: &ChartSpec, options: &RenderOptions) -> Option<Self> {
        let config = json!({ "responsive": options.responsive });

        match spec {
            ChartSpec::Comparison(chart) => {
                let data = chart
                    .series
                    .iter()
                    .map(|trace| match chart.mark {
                        SeriesMark::Line => json!({
                            "type": "scatter",
                            "mode": "lines+markers",
                            "name": trace.name,
                            "x": trace.x,
                            "y": trace.y,
                        }),
                        SeriesMark::Bar => json!({
                            "type": "bar",
                            "name": trace.name,
                            "x": trace.x,
                            "y": trace.y,
                        }),
                    })
                    .collect();

                let layout = json!({
                    "title": { "text": chart.title },
                    "xaxis": { "title": { "text": chart.x_axis_title } },
                    "yaxis": { "title": { "text": chart.y_axis_title } },
                    "barmode": chart.bar_mode,
                });
                Some(Self { data, layout, config })
            }
            ChartSpec::Pie(chart) => {
                let labels: Vec<&str> = chart.slices.iter().map(|slice| slice.label.as_str()).collect();
                let values: Vec<f64> = chart.slices.iter().map(|slice| slice.value).collect();
                let data = vec![json!({
                    "type": "pie",
                    "labels": labels,
                    "values": values,
                    "textinfo": "label+percent",
                    "insidetextorientation": "radial",
                })];
                let layout = json!({ "title": { "text": chart.title } });
                Some(Self { data, layout, config })
            }
            ChartSpec::NoData(_) => None,
        }
    }
}

/// Draws chart specs with the page's global `Plotly` object
#[derive(Debug, Clone, Default)]
pub struct PlotlySurface;

impl PlotlySurface {
    pub fn new() -> Self {
        Self
    }

    fn element(target: &str) -> Result<web_sys::Element, RenderError> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(target))
            .ok_or_else(|| RenderError::SurfaceUnavailable(format!("#{} not found", target)))
    }
}

impl ChartSurface for PlotlySurface {
    fn render(&self, target: &str, spec: &ChartSpec, options: &RenderOptions) -> Result<(), RenderError> {
        if let ChartSpec::NoData(placeholder) = spec {
            return self.show_placeholder(target, &placeholder.message);
        }
        let figure = PlotlyFigure::from_spec(spec, options)
            .ok_or_else(|| RenderError::Serialization("spec has no figure".to_string()))?;

        Self::element(target)?;
        let data = to_js(&figure.data)?;
        let layout = to_js(&figure.layout)?;
        let config = to_js(&figure.config)?;

        plotly_new_plot(target, &data, &layout, &config).map_err(|e| RenderError::Library(format!("{:?}", e)))?;

        get_logger().debug(
            LogComponent::Infrastructure("PlotlySurface"),
            &format!("newPlot #{} with {} traces", target, figure.data.len()),
        );
        Ok(())
    }

    fn show_placeholder(&self, target: &str, message: &str) -> Result<(), RenderError> {
        let element = Self::element(target)?;
        // Plotly may not be loaded yet; an empty div needs no purge.
        let _ = plotly_purge(target);
        element.set_inner_html(&format!("<h2>{}</h2>", escape_html(message)));
        Ok(())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, RenderError> {
    JsValue::from_serde(value).map_err(|e| RenderError::Serialization(e.to_string()))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
