use leptos::*;
use strum::IntoEnumIterator;

use crate::domain::indicators::ChartType;
use crate::domain::logging::{LogComponent, LogEntry, Logger, get_logger};
use crate::global_state::{
    active_chart_type, active_indicator, control_error, indicator_options, is_log_paused, logs, panel_state,
    selected_entities, MAX_LOG_LINES,
};
use crate::presentation::with_global_dashboard;

/// Bridge logger feeding domain log entries into the debug console signal
pub struct LeptosLogger;

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        if is_log_paused().get_untracked() {
            return;
        }
        let line = entry.format_line();
        logs().update(|lines| {
            lines.push(line);
            let overflow = lines.len().saturating_sub(MAX_LOG_LINES);
            if overflow > 0 {
                lines.drain(..overflow);
            }
        });
    }
}

/// Root component: control bar, map host, comparison panel and log console
#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .dashboard-app {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                background: #f4f6f9;
                min-height: 100vh;
                padding: 20px;
                color: #1f2933;
            }

            .control-bar {
                display: flex;
                align-items: center;
                gap: 16px;
                margin-bottom: 16px;
                padding: 12px 16px;
                background: white;
                border-radius: 8px;
                box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            }

            .control-bar label {
                font-size: 13px;
                color: #52606d;
            }

            .control-error {
                color: #c62828;
                font-size: 12px;
            }

            .selection-count {
                margin-left: auto;
                font-size: 13px;
                color: #52606d;
            }

            #map {
                width: 100%;
                min-height: 480px;
                background: white;
                border-radius: 8px;
            }

            .country-selected {
                fill: #f39c12 !important;
            }

            #tooltip {
                position: absolute;
                opacity: 0;
                background: rgba(0, 0, 0, 0.8);
                color: white;
                padding: 4px 8px;
                border-radius: 4px;
                font-size: 12px;
                pointer-events: none;
            }

            .chart-panel {
                display: none;
                margin-top: 16px;
                padding: 16px;
                background: white;
                border-radius: 8px;
                box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            }

            .chart-panel.visible {
                display: block;
            }

            .panel-header {
                display: flex;
                justify-content: space-between;
                align-items: center;
            }

            .panel-status {
                font-size: 14px;
                color: #52606d;
            }

            .debug-console {
                margin-top: 16px;
                background: rgba(0, 0, 0, 0.85);
                color: #e0e0e0;
                border-radius: 8px;
                padding: 12px;
                max-height: 240px;
                overflow-y: auto;
            }

            .debug-header {
                display: flex;
                justify-content: space-between;
                margin-bottom: 8px;
                color: #72c685;
                font-weight: bold;
            }

            .debug-btn {
                background: #4a5d73;
                color: white;
                border: none;
                padding: 4px 10px;
                border-radius: 4px;
                cursor: pointer;
                font-size: 12px;
                margin-left: 5px;
            }

            .log-line {
                font-family: 'Courier New', monospace;
                font-size: 11px;
                margin: 2px 0;
            }
            "#}
        </style>
        <div class="dashboard-app">
            <ControlBar />
            <div id="map"></div>
            <ChartPanel />
            <div id="tooltip"></div>
            <DebugConsole />
        </div>
    }
}

/// Indicator and chart-type selects plus the clear button
#[component]
fn ControlBar() -> impl IntoView {
    let on_indicator = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        let result = with_global_dashboard(|dashboard| dashboard.set_indicator(&value));
        control_error().set(result.and_then(|r| r.err()).map(|e| e.to_string()));
    };

    let on_chart_type = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        let result = with_global_dashboard(|dashboard| dashboard.set_chart_type(&value));
        control_error().set(result.and_then(|r| r.err()).map(|e| e.to_string()));
    };

    let on_clear = move |_| {
        with_global_dashboard(|dashboard| dashboard.clear_selection());
    };

    view! {
        <div class="control-bar">
            <label>
                "Indicator "
                <select on:change=on_indicator prop:value=move || active_indicator().get()>
                    {move || {
                        indicator_options()
                            .get()
                            .into_iter()
                            .map(|(key, name)| view! { <option value=key>{name}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <label>
                "Chart "
                <select
                    on:change=on_chart_type
                    prop:value=move || active_chart_type().get().as_ref().to_string()
                >
                    {ChartType::iter()
                        .map(|chart_type| {
                            view! { <option value=chart_type.as_ref().to_string()>{chart_type.to_string()}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
            <button class="debug-btn" on:click=on_clear>"Clear selection"</button>
            <span class="control-error">{move || control_error().get().unwrap_or_default()}</span>
            <span class="selection-count">
                {move || format!("{} selected", selected_entities().with(|entities| entities.len()))}
            </span>
        </div>
    }
}

/// Comparison panel; the chart target itself is never re-rendered by Leptos
#[component]
fn ChartPanel() -> impl IntoView {
    let on_close = move |_| {
        with_global_dashboard(|dashboard| dashboard.close_panel());
    };

    view! {
        <div class="chart-panel" class:visible=move || panel_state().with(|state| state.is_visible())>
            <div class="panel-header">
                <span class="panel-status">{move || panel_state().with(|state| state.status_text())}</span>
                <button class="debug-btn" on:click=on_close>"Close"</button>
            </div>
            <div id="plotly-chart"></div>
        </div>
    }
}

/// Debug console bridged to domain::logging
#[component]
fn DebugConsole() -> impl IntoView {
    let lines = logs();
    let is_paused = is_log_paused();

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Dashboard Log"</span>
                <div>
                    <button
                        class="debug-btn"
                        on:click=move |_| {
                            is_paused.update(|p| *p = !*p);
                            if !is_paused.get_untracked() {
                                get_logger().info(LogComponent::Presentation("DebugConsole"), "Logging resumed");
                            }
                        }
                    >
                        {move || if is_paused.get() { "Resume" } else { "Pause" }}
                    </button>
                    <button class="debug-btn" on:click=move |_| lines.set(Vec::new())>
                        "Clear"
                    </button>
                </div>
            </div>
            <For
                each=move || lines.get().into_iter().enumerate()
                key=|(index, line)| (*index, line.clone())
                children=move |(_, line)| view! { <div class="log-line">{line}</div> }
            />
        </div>
    }
}
