//! Browser adapters: HTTP data service, Plotly chart surface, DOM map surface
//! and logging services.

pub mod http;
pub mod map;
pub mod rendering;
pub mod services;
