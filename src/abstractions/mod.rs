pub mod file_system;
pub mod settings_manager;
pub mod upstream_api;

pub use file_system::*;
pub use settings_manager::*;
pub use upstream_api::*;
