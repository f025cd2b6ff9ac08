//! TOML configuration.
//!
//! Every section is optional; a missing file section falls back to the
//! defaults below, and running without `--config` uses [`Config::default`].
//!
//! ```toml
//! [paragraphs]
//! default_length = "medium"
//!
//! [lengths]
//! short = 1
//! medium = 2
//! long = 3
//!
//! [extract]
//! max_bytes = 52428800
//!
//! [server]
//! bind = "127.0.0.1:5000"
//! ```

use anyhow::{Context, Result};
use paraform_core::{LengthMap, ParagraphCount, SummaryLength};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paragraphs: ParagraphsConfig,
    #[serde(default)]
    pub lengths: LengthsConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ParagraphsConfig {
    #[serde(default)]
    pub default_length: SummaryLength,
}

/// Raw selector counts as written in the file. Validated into a
/// [`LengthMap`] by [`LengthsConfig::to_map`].
#[derive(Debug, Deserialize, Clone)]
pub struct LengthsConfig {
    #[serde(default = "default_short")]
    pub short: usize,
    #[serde(default = "default_medium")]
    pub medium: usize,
    #[serde(default = "default_long")]
    pub long: usize,
}

fn default_short() -> usize {
    1
}
fn default_medium() -> usize {
    2
}
fn default_long() -> usize {
    3
}

impl Default for LengthsConfig {
    fn default() -> Self {
        Self {
            short: default_short(),
            medium: default_medium(),
            long: default_long(),
        }
    }
}

impl LengthsConfig {
    pub fn to_map(&self) -> Result<LengthMap> {
        LengthMap::new(self.short, self.medium, self.long)
            .with_context(|| "lengths.short, lengths.medium and lengths.long must all be >= 1")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_max_bytes() -> u64 {
    50 * 1024 * 1024
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Config {
    /// The validated selector mapping.
    pub fn length_map(&self) -> Result<LengthMap> {
        self.lengths.to_map()
    }

    /// Resolve a requested paragraph count. An explicit `count` wins over
    /// `length`; with neither, `paragraphs.default_length` applies.
    pub fn paragraph_count(
        &self,
        length: Option<SummaryLength>,
        count: Option<usize>,
    ) -> Result<ParagraphCount> {
        if let Some(n) = count {
            return Ok(ParagraphCount::new(n)?);
        }
        let length = length.unwrap_or(self.paragraphs.default_length);
        Ok(self.length_map()?.count_for(length))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content).with_context(|| "Failed to parse config file")?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    config.length_map()?;

    if config.extract.max_bytes == 0 {
        anyhow::bail!("extract.max_bytes must be > 0");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}

/// Load `path` when given, otherwise use built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}
