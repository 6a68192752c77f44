mod utils;

#[cfg(test)]
mod test_utils;

pub mod abstractions;
pub mod aggregator;
pub mod catalog;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod progression;
pub mod raid_index;
pub mod retry;
pub mod server;
pub mod settings;
pub mod start;
pub mod week_window;

pub use start::start;
