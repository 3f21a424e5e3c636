//! Indicator series aggregate: points, per-entity series and fetch reports.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
