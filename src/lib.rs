pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliArgs, Command};

pub use adapters::http::HttpGateway;
pub use config::{session::FileSessionStore, Settings};
pub use utils::error::{ClientError, Result};
