//! Chart aggregate: declarative chart specs and the assembler that builds them.

pub mod services;
pub mod value_objects;

pub use services::*;
pub use value_objects::*;
