//! Selection aggregate: the entities currently chosen on the map.

pub mod store;
pub mod value_objects;

pub use store::*;
pub use value_objects::*;
