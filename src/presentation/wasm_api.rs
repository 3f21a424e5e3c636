//! JavaScript entry points for the map layer and the global dashboard instance.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use leptos::SignalSet;
use wasm_bindgen::prelude::*;

use crate::application::{Dashboard, DashboardConfig, default_spawner};
use crate::domain::errors::AppError;
use crate::domain::logging::{LogComponent, get_logger};
use crate::global_state::globals;
use crate::infrastructure::{http::IndicatorServiceClient, map::DomMapSurface, rendering::PlotlySurface};

/// Dashboard wired to the browser adapters
pub type BrowserDashboard = Dashboard<IndicatorServiceClient, PlotlySurface, DomMapSurface>;

/// Id of the optional `<script type="application/json">` holding the configuration
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

thread_local! {
    static GLOBAL_DASHBOARD: RefCell<Option<Rc<BrowserDashboard>>> = const { RefCell::new(None) };
}

/// Reads the page configuration, falling back to defaults on absence or error.
pub fn load_page_config() -> DashboardConfig {
    let text = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match text {
        Some(json) if !json.trim().is_empty() => DashboardConfig::from_json(&json).unwrap_or_else(|e| {
            get_logger().error(
                LogComponent::Presentation("Config"),
                &format!("{}; using defaults", e),
            );
            DashboardConfig::default()
        }),
        _ => DashboardConfig::default(),
    }
}

pub fn build_dashboard(config: &DashboardConfig) -> Result<BrowserDashboard, AppError> {
    let repository = IndicatorServiceClient::from_config(config)?;
    Dashboard::with_config(config, repository, PlotlySurface::new(), DomMapSurface::new(), default_spawner())
}

/// Stores the dashboard and mirrors its state into the Leptos signals.
pub fn install_global_dashboard(dashboard: BrowserDashboard) {
    let g = globals();
    let view = dashboard.view();
    g.indicator_options.set(dashboard.indicator_options());
    g.active_indicator.set(view.indicator.value().to_string());
    g.active_chart_type.set(view.chart_type);
    g.panel_state.set(dashboard.panel_state());

    dashboard.subscribe_panel(|state| globals().panel_state.set(state.clone()));
    dashboard.subscribe_selection(|event| globals().selected_entities.set(event.selection().to_vec()));
    dashboard.subscribe_view(|view| {
        globals().active_indicator.set(view.indicator.value().to_string());
        globals().active_chart_type.set(view.chart_type);
    });

    GLOBAL_DASHBOARD.with(|global| *global.borrow_mut() = Some(Rc::new(dashboard)));
}

/// Runs `f` against the global dashboard, if one is installed.
pub fn with_global_dashboard<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&BrowserDashboard) -> R,
{
    let dashboard = GLOBAL_DASHBOARD.with(|global| global.borrow().clone());
    dashboard.map(|dashboard| f(&dashboard))
}

fn not_ready() -> JsValue {
    JsValue::from_str("dashboard is not initialized")
}

/// Region click from the map layer. Returns whether the region is now selected.
#[wasm_bindgen(js_name = regionClicked)]
pub fn region_clicked(code: &str, name: &str) -> bool {
    with_global_dashboard(|dashboard| {
        dashboard.click_region(code, name);
        dashboard
            .selected_entities()
            .iter()
            .any(|entity| entity.code.value().eq_ignore_ascii_case(code.trim()))
    })
    .unwrap_or(false)
}

#[wasm_bindgen(js_name = regionHovered)]
pub fn region_hovered(name: &str, page_x: f64, page_y: f64) {
    with_global_dashboard(|dashboard| dashboard.hover_region(name, page_x, page_y));
}

#[wasm_bindgen(js_name = regionLeft)]
pub fn region_left() {
    with_global_dashboard(|dashboard| dashboard.leave_region());
}

#[wasm_bindgen(js_name = setIndicator)]
pub fn set_indicator(key: &str) -> Result<(), JsValue> {
    with_global_dashboard(|dashboard| dashboard.set_indicator(key))
        .ok_or_else(not_ready)?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = setChartType)]
pub fn set_chart_type(chart_type: &str) -> Result<(), JsValue> {
    with_global_dashboard(|dashboard| dashboard.set_chart_type(chart_type))
        .ok_or_else(not_ready)?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = clearSelection)]
pub fn clear_selection() {
    with_global_dashboard(|dashboard| dashboard.clear_selection());
}

#[wasm_bindgen(js_name = closePanel)]
pub fn close_panel() {
    with_global_dashboard(|dashboard| dashboard.close_panel());
}

/// Selected codes in selection order
#[wasm_bindgen(js_name = selectedCodes)]
pub fn selected_codes() -> Array {
    let codes = Array::new();
    with_global_dashboard(|dashboard| {
        for entity in dashboard.selected_entities() {
            codes.push(&JsValue::from_str(entity.code.value()));
        }
    });
    codes
}
