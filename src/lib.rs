mod macros;

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;

use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::services::{BrowserTimeProvider, ConsoleLogger, FanOutLogger};

/// Wires logging, builds the dashboard from page configuration and mounts the UI.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::init_logger(Box::new(FanOutLogger::new(vec![
        Box::new(ConsoleLogger::new_development()),
        Box::new(app::LeptosLogger),
    ])));
    domain::logging::init_time_provider(Box::new(BrowserTimeProvider::new()));

    let config = presentation::load_page_config();
    match presentation::build_dashboard(&config) {
        Ok(dashboard) => {
            presentation::install_global_dashboard(dashboard);
            get_logger().info(LogComponent::Presentation("Initialize"), "Dashboard initialized");
        }
        Err(e) => get_logger().error(
            LogComponent::Presentation("Initialize"),
            &format!("Dashboard failed to start: {}", e),
        ),
    }

    leptos::mount_to_body(app::App);
}
