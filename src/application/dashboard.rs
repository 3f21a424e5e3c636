use std::cell::RefCell;
use std::rc::Rc;

use crate::application::config::DashboardConfig;
use crate::application::coordinator::{ChartSurface, RenderCoordinator, Spawner};
use crate::application::fetcher::DataFetcher;
use crate::application::map_adapter::{MapInteractionAdapter, MapSurface, RegionEvent, RegionHover};
use crate::domain::chart::{ChartAssembler, PanelState};
use crate::domain::controls::{ViewControls, ViewSnapshot};
use crate::domain::errors::{AppError, ControlError};
use crate::domain::events::SelectionEvent;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::selection::{Entity, SelectionStore};
use crate::domain::series::IndicatorRepository;

/// Owns the stores, the render coordinator and the map adapter, and wires
/// store notifications to render passes.
pub struct Dashboard<R, S, M> {
    selection: Rc<RefCell<SelectionStore>>,
    controls: Rc<RefCell<ViewControls>>,
    coordinator: RenderCoordinator<R, S>,
    map: MapInteractionAdapter<M>,
}

impl<R, S, M> Dashboard<R, S, M>
where
    R: IndicatorRepository + 'static,
    S: ChartSurface + 'static,
    M: MapSurface + 'static,
{
    pub fn new(controls: ViewControls, coordinator: RenderCoordinator<R, S>, map_surface: M) -> Self {
        let selection = Rc::new(RefCell::new(SelectionStore::new()));
        let controls = Rc::new(RefCell::new(controls));

        // Markers first, so the map reflects a click before its pass starts.
        let map = MapInteractionAdapter::new(selection.clone(), map_surface);

        let on_selection = coordinator.clone();
        let view_source = Rc::downgrade(&controls);
        selection.borrow_mut().subscribe(move |event: &SelectionEvent| {
            if let Some(controls) = view_source.upgrade() {
                let view = controls.borrow().snapshot();
                on_selection.trigger(event.selection(), &view);
            }
        });

        let on_controls = coordinator.clone();
        let selection_source = Rc::downgrade(&selection);
        controls.borrow_mut().subscribe(move |event| {
            if let Some(selection) = selection_source.upgrade() {
                let entities = selection.borrow().entities().to_vec();
                on_controls.trigger(&entities, event.snapshot());
            }
        });

        Self {
            selection,
            controls,
            coordinator,
            map,
        }
    }

    /// Builds every component from validated configuration.
    pub fn with_config(
        config: &DashboardConfig,
        repository: R,
        chart_surface: S,
        map_surface: M,
        spawner: Spawner,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let registry = config.registry()?;
        let view = config.initial_view()?;

        let controls = ViewControls::new(registry.clone(), view.indicator, view.chart_type)?;
        let coordinator = RenderCoordinator::new(
            DataFetcher::new(repository),
            ChartAssembler::new(registry),
            chart_surface,
            config.render_options(),
            spawner,
        );

        get_logger().info(
            LogComponent::Application("Dashboard"),
            &format!("Dashboard ready with {} indicators", config.indicators.len()),
        );
        Ok(Self::new(controls, coordinator, map_surface))
    }

    pub fn click_region(&self, code: &str, name: &str) -> Option<SelectionEvent> {
        self.map.handle_click(RegionEvent {
            code: code.to_string(),
            name: name.to_string(),
        })
    }

    pub fn hover_region(&self, name: &str, page_x: f64, page_y: f64) {
        self.map.handle_hover(RegionHover {
            name: name.to_string(),
            page_x,
            page_y,
        });
    }

    pub fn leave_region(&self) {
        self.map.handle_leave();
    }

    pub fn set_indicator(&self, raw: &str) -> Result<(), ControlError> {
        self.controls.borrow_mut().set_indicator(raw)
    }

    pub fn set_chart_type(&self, raw: &str) -> Result<(), ControlError> {
        self.controls.borrow_mut().set_chart_type(raw)
    }

    pub fn clear_selection(&self) -> Option<SelectionEvent> {
        self.selection.borrow_mut().clear()
    }

    pub fn close_panel(&self) {
        self.coordinator.close_panel();
    }

    /// Re-runs a pass for the current selection and view.
    pub fn refresh(&self) {
        let entities = self.selected_entities();
        let view = self.view();
        self.coordinator.trigger(&entities, &view);
    }

    pub fn selected_entities(&self) -> Vec<Entity> {
        self.selection.borrow().entities().to_vec()
    }

    pub fn view(&self) -> ViewSnapshot {
        self.controls.borrow().snapshot()
    }

    pub fn panel_state(&self) -> PanelState {
        self.coordinator.state()
    }

    /// `(key, display name)` pairs in registry order
    pub fn indicator_options(&self) -> Vec<(String, String)> {
        self.controls
            .borrow()
            .registry()
            .iter()
            .map(|definition| (definition.key.value().to_string(), definition.display_name.clone()))
            .collect()
    }

    pub fn subscribe_panel<F>(&self, observer: F)
    where
        F: Fn(&PanelState) + 'static,
    {
        self.coordinator.subscribe(observer);
    }

    pub fn subscribe_selection<F>(&self, handler: F)
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        self.selection.borrow_mut().subscribe(handler);
    }

    pub fn subscribe_view<F>(&self, handler: F)
    where
        F: Fn(&ViewSnapshot) + 'static,
    {
        self.controls
            .borrow_mut()
            .subscribe(move |event| handler(event.snapshot()));
    }

    pub fn coordinator(&self) -> &RenderCoordinator<R, S> {
        &self.coordinator
    }

    pub fn map_surface(&self) -> &M {
        self.map.surface()
    }
}
