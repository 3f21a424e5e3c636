use web_sys::{CssStyleDeclaration, Document, HtmlElement};
use wasm_bindgen::JsCast;

use crate::application::map_adapter::MapSurface;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::selection::EntityCode;

pub const SELECTED_CLASS: &str = "country-selected";
pub const REGION_ID_PREFIX: &str = "country-";
pub const TOOLTIP_ID: &str = "tooltip";

/// Map surface backed by the page DOM: regions are `#country-{code}` paths
/// and the tooltip is a positioned `#tooltip` element.
#[derive(Debug, Clone, Default)]
pub struct DomMapSurface;

impl DomMapSurface {
    pub fn new() -> Self {
        Self
    }

    pub fn region_id(code: &EntityCode) -> String {
        format!("{}{}", REGION_ID_PREFIX, code.value())
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|window| window.document())
    }

    fn tooltip() -> Option<HtmlElement> {
        Self::document()?
            .get_element_by_id(TOOLTIP_ID)?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl MapSurface for DomMapSurface {
    fn set_region_selected(&self, code: &EntityCode, selected: bool) {
        let Some(region) = Self::document().and_then(|document| document.get_element_by_id(&Self::region_id(code)))
        else {
            get_logger().debug(
                LogComponent::Infrastructure("DomMapSurface"),
                &format!("no region element for {}", code),
            );
            return;
        };

        if let Err(e) = region.class_list().toggle_with_force(SELECTED_CLASS, selected) {
            get_logger().warn(
                LogComponent::Infrastructure("DomMapSurface"),
                &format!("could not mark {}: {:?}", code, e),
            );
        }
    }

    fn show_tooltip(&self, text: &str, left: f64, top: f64) {
        if let Some(tooltip) = Self::tooltip() {
            tooltip.set_text_content(Some(text));
            let style = tooltip.style();
            set_style(&style, "opacity", "1");
            set_style(&style, "left", &format!("{}px", left));
            set_style(&style, "top", &format!("{}px", top));
        }
    }

    fn hide_tooltip(&self) {
        if let Some(tooltip) = Self::tooltip() {
            set_style(&tooltip.style(), "opacity", "0");
        }
    }
}

/// Applies one style property, logging a rejected write. Returns whether it stuck.
pub fn set_style(style: &CssStyleDeclaration, property: &str, value: &str) -> bool {
    match style.set_property(property, value) {
        Ok(()) => true,
        Err(e) => {
            get_logger().warn(
                LogComponent::Infrastructure("DomMapSurface"),
                &format!("could not set {}={}: {:?}", property, value, e),
            );
            false
        }
    }
}
