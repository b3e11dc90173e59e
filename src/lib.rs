pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use api::{ApiClient, Backend};
pub use config::Settings;
pub use utils::error::{FinboardError, Result};
