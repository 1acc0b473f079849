pub mod app;
pub mod core;

pub use app::adapter::SmileWantedAdapter;
pub use app::config::AdapterConfig;
