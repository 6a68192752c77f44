pub mod templates;
pub mod upstream_builder;

pub use templates::*;
pub use upstream_builder::*;
