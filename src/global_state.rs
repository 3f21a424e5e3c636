use crate::domain::chart::PanelState;
use crate::domain::indicators::ChartType;
use crate::domain::selection::Entity;
use leptos::*;
use once_cell::sync::OnceCell;

/// Maximum number of lines kept by the in-page log console
pub const MAX_LOG_LINES: usize = 100;

pub struct Globals {
    pub panel_state: RwSignal<PanelState>,
    pub selected_entities: RwSignal<Vec<Entity>>,
    pub active_indicator: RwSignal<String>,
    pub active_chart_type: RwSignal<ChartType>,
    pub indicator_options: RwSignal<Vec<(String, String)>>,
    pub control_error: RwSignal<Option<String>>,
    pub logs: RwSignal<Vec<String>>,
    pub is_log_paused: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        panel_state: create_rw_signal(PanelState::Idle),
        selected_entities: create_rw_signal(Vec::new()),
        active_indicator: create_rw_signal(String::new()),
        active_chart_type: create_rw_signal(ChartType::Line),
        indicator_options: create_rw_signal(Vec::new()),
        control_error: create_rw_signal(None),
        logs: create_rw_signal(Vec::new()),
        is_log_paused: create_rw_signal(false),
    })
}

crate::global_signals! {
    pub panel_state => panel_state: PanelState,
    pub selected_entities => selected_entities: Vec<Entity>,
    pub active_indicator => active_indicator: String,
    pub active_chart_type => active_chart_type: ChartType,
    pub indicator_options => indicator_options: Vec<(String, String)>,
    pub control_error => control_error: Option<String>,
    pub logs => logs: Vec<String>,
    pub is_log_paused => is_log_paused: bool,
}
