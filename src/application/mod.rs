pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod fetcher;
pub mod map_adapter;

pub use config::*;
pub use coordinator::*;
pub use dashboard::*;
pub use fetcher::*;
pub use map_adapter::*;
