#![cfg(target_arch = "wasm32")]

use std::sync::Arc;

use country_compare_wasm::application::MapSurface;
use country_compare_wasm::domain::logging::{LogLevel, init_logger};
use country_compare_wasm::domain::selection::EntityCode;
use country_compare_wasm::infrastructure::map::{DomMapSurface, SELECTED_CLASS, TOOLTIP_ID, set_style};
use country_compare_wasm::infrastructure::services::BufferedLogger;
use once_cell::sync::Lazy;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

static LOGGER: Lazy<Arc<BufferedLogger>> = Lazy::new(|| {
    let logger = Arc::new(BufferedLogger::new(LogLevel::Warn, 50));
    init_logger(Box::new(logger.clone()));
    logger
});

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(id: &str) -> web_sys::HtmlElement {
    let element = document()
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    element.set_id(id);
    document().body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn marker_class_follows_selection() {
    let region = append("country-FRA");
    let surface = DomMapSurface::new();
    let code = EntityCode::new("fra").unwrap();

    surface.set_region_selected(&code, true);
    assert!(region.class_list().contains(SELECTED_CLASS));

    surface.set_region_selected(&code, false);
    assert!(!region.class_list().contains(SELECTED_CLASS));
}

#[wasm_bindgen_test]
fn tooltip_shows_text_at_position_then_fades() {
    let tooltip = append(TOOLTIP_ID);
    let surface = DomMapSurface::new();

    surface.show_tooltip("France", 110.0, 172.0);
    assert_eq!(tooltip.text_content().as_deref(), Some("France"));
    assert_eq!(tooltip.style().get_property_value("left").unwrap(), "110px");
    assert_eq!(tooltip.style().get_property_value("opacity").unwrap(), "1");

    surface.hide_tooltip();
    assert_eq!(tooltip.style().get_property_value("opacity").unwrap(), "0");
}

#[wasm_bindgen_test]
fn missing_region_is_ignored() {
    DomMapSurface::new().set_region_selected(&EntityCode::new("ZZZ").unwrap(), true);
}

#[wasm_bindgen_test]
fn rejected_style_write_is_logged() {
    let element = append("readonly-style");
    let computed = web_sys::window()
        .unwrap()
        .get_computed_style(&element)
        .unwrap()
        .unwrap();
    let before = LOGGER.entries_at(LogLevel::Warn).len();

    assert!(!set_style(&computed, "opacity", "0.5"));

    let warnings = LOGGER.entries_at(LogLevel::Warn);
    assert_eq!(warnings.len(), before + 1);
    assert!(warnings[before].message.contains("opacity"));
}

#[wasm_bindgen_test]
fn accepted_style_write_is_silent() {
    let element = append("writable-style");
    let before = LOGGER.entries_at(LogLevel::Warn).len();

    assert!(set_style(&element.style(), "top", "4px"));

    assert_eq!(element.style().get_property_value("top").unwrap(), "4px");
    assert_eq!(LOGGER.entries_at(LogLevel::Warn).len(), before);
}
