pub mod config;
pub mod error;
pub mod types;

pub use config::TownConfig;
pub use error::{Result, TownError};
