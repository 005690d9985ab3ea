pub mod apportion;
pub mod config;
pub mod departures;
pub mod error;
pub mod geometry;
pub mod impact;
pub mod loader;
pub mod model;
pub mod output;
pub mod pipeline;

pub use error::EquityError;
