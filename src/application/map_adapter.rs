use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::domain::events::SelectionEvent;
use crate::domain::logging::LogComponent;
use crate::domain::selection::{Entity, EntityCode, SelectionStore};
use crate::{log_trace, log_warn};

/// Pixel offset of the tooltip from the pointer
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -28.0);

/// A click on a map region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEvent {
    pub code: String,
    pub name: String,
}

/// Pointer over a map region, in page coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionHover {
    pub name: String,
    pub page_x: f64,
    pub page_y: f64,
}

/// The external geographic layer
pub trait MapSurface {
    fn set_region_selected(&self, code: &EntityCode, selected: bool);
    fn show_tooltip(&self, text: &str, left: f64, top: f64);
    fn hide_tooltip(&self);
}

/// Translates map events into selection changes and mirrors the selection
/// back onto region markers.
pub struct MapInteractionAdapter<M> {
    selection: Rc<RefCell<SelectionStore>>,
    surface: Rc<M>,
}

impl<M: MapSurface + 'static> MapInteractionAdapter<M> {
    /// Subscribes the marker sync to `selection`.
    pub fn new(selection: Rc<RefCell<SelectionStore>>, surface: M) -> Self {
        let surface = Rc::new(surface);
        let markers = surface.clone();
        selection.borrow_mut().subscribe(move |event: &SelectionEvent| {
            for (code, selected) in event.marker_changes() {
                markers.set_region_selected(&code, selected);
            }
        });

        Self { selection, surface }
    }

    /// Toggles the clicked region. Regions without a usable code are ignored.
    pub fn handle_click(&self, event: RegionEvent) -> Option<SelectionEvent> {
        match Entity::new(&event.code, &event.name) {
            Ok(entity) => Some(self.selection.borrow_mut().toggle(entity)),
            Err(error) => {
                log_warn!(
                    LogComponent::Application("MapInteractionAdapter"),
                    "ignoring click on '{}': {}",
                    event.name,
                    error
                );
                None
            }
        }
    }

    pub fn handle_hover(&self, hover: RegionHover) {
        let (dx, dy) = TOOLTIP_OFFSET;
        log_trace!(LogComponent::Application("MapInteractionAdapter"), "hover {}", hover.name);
        self.surface.show_tooltip(&hover.name, hover.page_x + dx, hover.page_y + dy);
    }

    pub fn handle_leave(&self) {
        self.surface.hide_tooltip();
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }
}
