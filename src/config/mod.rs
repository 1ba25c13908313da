#[cfg(feature = "cli")]
pub mod cli;
pub mod session;
pub mod toml_config;

use crate::core::paging::DEFAULT_PAGE_SIZE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_page_size, validate_path, validate_positive_number, validate_url, Validate,
};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_PATH: &str = ".school-records/session.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const FALLBACK_CONFIG_FILE: &str = "school-records.toml";

/// Fully resolved settings. Precedence: CLI flags > config file > defaults;
/// the flag overrides are applied by the binary after `load`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub session_path: PathBuf,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        let client = config.client.unwrap_or_default();
        let session = config.session.unwrap_or_default();
        let display = config.display.unwrap_or_default();
        Self {
            base_url: client.base_url.unwrap_or(defaults.base_url),
            timeout_seconds: client.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            session_path: session.path.unwrap_or(defaults.session_path),
            page_size: display.page_size.unwrap_or(defaults.page_size),
        }
    }

    /// An explicit `--config` path must exist; the fallback file in the
    /// working directory is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => TomlConfig::from_file(path)?,
            None => {
                let fallback = Path::new(FALLBACK_CONFIG_FILE);
                if fallback.exists() {
                    tracing::debug!("Using config file {}", fallback.display());
                    TomlConfig::from_file(fallback)?
                } else {
                    TomlConfig::default()
                }
            }
        };
        Ok(Self::from_toml(config))
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn session_path(&self) -> &Path {
        &self.session_path
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_positive_number(
            "timeout_seconds",
            usize::try_from(self.timeout_seconds).unwrap_or(0),
            1,
        )?;
        validate_path("session_path", &self.session_path.to_string_lossy())?;
        validate_page_size("page_size", self.page_size)?;
        Ok(())
    }
}
