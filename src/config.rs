use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::constants::{DEFAULT_FEED_URL, DEFAULT_OUTPUT_DIR, EVENTS_V1_FILE, EVENTS_V2_FILE};
use crate::common::error::{AgendaError, Result};
use crate::pipeline::processing::GroupingPolicy;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "agenda.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    pub feed: FeedConfig,
    pub output: OutputConfig,
    pub grouping: GroupingPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub v1_file: String,
    pub v2_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            v1_file: EVENTS_V1_FILE.to_string(),
            v2_file: EVENTS_V2_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the JSON log file; console only when unset
    pub dir: Option<PathBuf>,
}

impl AgendaConfig {
    /// Load `agenda.toml` from the working directory, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            AgendaError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AgendaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            return Err(AgendaError::Config("feed.url must not be empty".to_string()));
        }
        if self.output.v1_file.is_empty() || self.output.v2_file.is_empty() {
            return Err(AgendaError::Config("output file names must not be empty".to_string()));
        }
        if self.output.v1_file == self.output.v2_file {
            return Err(AgendaError::Config(
                "output.v1_file and output.v2_file must differ".to_string(),
            ));
        }
        Ok(())
    }
}
