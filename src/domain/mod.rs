//! Domain layer: selection, view controls, indicator series and chart specs.
//!
//! Everything here is synchronous and free of browser dependencies.

pub mod chart;
pub mod controls;
pub mod errors;
pub mod events;
pub mod indicators;
pub mod logging;
pub mod selection;
pub mod series;
